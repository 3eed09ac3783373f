//! Path classification and destination resolution helpers.
//!
//! Small free functions used by callers that copy or move files around the
//! aggregation core: classifying a path as directory, file, or missing, and
//! computing the effective destination file path for a copy/move operation.

use std::{
    fs,
    path::{Path, PathBuf},
};

/// What a path points at on disk, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathKind {
    /// The path exists and is a directory
    Directory,

    /// The path exists and is not a directory
    File,

    /// The path does not exist (or cannot be inspected)
    Missing,
}

/// Classify a path as directory, file, or missing.
///
/// Symbolic links are resolved, so a link to a directory classifies as
/// [`PathKind::Directory`]. A path whose metadata cannot be read (broken
/// link, permission failure on a parent) classifies as [`PathKind::Missing`].
#[must_use]
pub fn path_kind(path: &Path) -> PathKind {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => PathKind::Directory,
        Ok(_) => PathKind::File,
        Err(_) => PathKind::Missing,
    }
}

/// Compute the effective destination file path for a copy/move.
///
/// If `destination` is an existing directory, the source's file name is
/// appended to it; otherwise `destination` is returned unchanged, including
/// when it does not exist yet.
///
/// # Examples
///
/// ```
/// # use std::path::{Path, PathBuf};
/// # use dirstat::paths::resolve_destination;
/// let resolved = resolve_destination(Path::new("/src/report.txt"), Path::new("/tmp/out.txt"));
/// assert_eq!(resolved, PathBuf::from("/tmp/out.txt"));
/// ```
#[must_use]
pub fn resolve_destination(source: &Path, destination: &Path) -> PathBuf {
    if path_kind(destination) == PathKind::Directory
        && let Some(file_name) = source.file_name()
    {
        return destination.join(file_name);
    }
    destination.to_path_buf()
}
