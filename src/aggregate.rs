//! Recursive directory-tree aggregation.
//!
//! This module computes the total byte size, file count, and directory count
//! of a directory tree. Enumeration failures (permission denied, I/O errors,
//! a directory disappearing mid-scan) never abort the traversal: the
//! unreadable directory simply contributes nothing and the scan continues
//! with its siblings.

use std::{fs, path::Path};

use rayon::prelude::*;
use serde::Serialize;

/// Aggregate statistics for a directory tree.
///
/// `size` is the summed byte length of every regular file visited,
/// `file_count` and `dir_count` the number of files and subdirectories.
/// The all-zero default is the identity for [`DirStats::combine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DirStats {
    /// Total size of all files, in bytes
    pub size: u64,

    /// Number of regular files visited
    pub file_count: u64,

    /// Number of subdirectories visited
    pub dir_count: u64,
}

impl DirStats {
    /// Merge two results field-wise.
    ///
    /// Commutative and associative with `DirStats::default()` as identity,
    /// which is what lets [`aggregate_parallel`] reduce per-subdirectory
    /// results in any order.
    #[must_use]
    pub const fn combine(self, other: Self) -> Self {
        Self {
            size: self.size + other.size,
            file_count: self.file_count + other.file_count,
            dir_count: self.dir_count + other.dir_count,
        }
    }
}

/// Recursively aggregate a directory tree, depth-first and single-threaded.
///
/// The caller must pass a directory path; files and nonexistent paths simply
/// contribute nothing. Enumeration failures are swallowed: a directory that
/// cannot be opened contributes zero, and an error partway through a
/// directory's listing keeps whatever was already counted for it while
/// abandoning the rest. The function therefore always returns a result,
/// possibly an undercount.
///
/// Symbolic links are counted as the entries they are but never followed.
#[must_use]
pub fn aggregate(dir: &Path) -> DirStats {
    let mut stats = DirStats::default();

    let Ok(entries) = fs::read_dir(dir) else {
        return stats;
    };

    let mut subdirs = Vec::new();

    for entry in entries {
        // A failed entry read abandons the rest of this directory's listing;
        // the counts accumulated so far are kept.
        let Ok(entry) = entry else { break };

        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_file() {
            stats.file_count += 1;
            if let Ok(metadata) = entry.metadata() {
                stats.size += metadata.len();
            }
        } else if file_type.is_dir() {
            stats.dir_count += 1;
            subdirs.push(entry.path());
        }
    }

    for subdir in &subdirs {
        stats = stats.combine(aggregate(subdir));
    }

    stats
}

/// Like [`aggregate`], but subtrees of the root are processed on the rayon
/// thread pool and merged with [`DirStats::combine`].
///
/// Produces the same totals as the sequential version on an unchanged tree.
#[must_use]
pub fn aggregate_parallel(dir: &Path) -> DirStats {
    let mut stats = DirStats::default();

    let Ok(entries) = fs::read_dir(dir) else {
        return stats;
    };

    let mut subdirs = Vec::new();

    for entry in entries {
        let Ok(entry) = entry else { break };

        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_file() {
            stats.file_count += 1;
            if let Ok(metadata) = entry.metadata() {
                stats.size += metadata.len();
            }
        } else if file_type.is_dir() {
            stats.dir_count += 1;
            subdirs.push(entry.path());
        }
    }

    let merged = subdirs
        .par_iter()
        .map(|subdir| aggregate(subdir))
        .reduce(DirStats::default, DirStats::combine);

    stats.combine(merged)
}
