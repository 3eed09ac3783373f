//! Structured JSON output for scripting and piping.
//!
//! This module provides serializable data structures that represent the
//! complete output of a scan. When the `--json` flag is passed, these
//! structures are serialized to stdout as a single JSON object, replacing
//! all human-readable output.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::{
    aggregate::DirStats,
    format::{UnitStyle, format_size},
};

/// The aggregation result for one scanned root directory.
#[derive(Clone, Debug)]
pub struct ScanReport {
    /// The root directory that was scanned
    pub path: PathBuf,

    /// Aggregate statistics for its tree
    pub stats: DirStats,
}

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// One entry per scanned root directory.
    pub entries: Vec<JsonDirEntry>,

    /// Aggregated totals across all scanned roots.
    pub totals: JsonTotals,
}

/// A single scanned root in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonDirEntry {
    /// The scanned root directory.
    pub path: String,

    /// Total size of the tree in bytes.
    pub size: u64,

    /// Human-readable formatted size (e.g. `"1.5 GiB"`).
    pub size_formatted: String,

    /// Number of regular files in the tree.
    pub file_count: u64,

    /// Number of subdirectories in the tree.
    pub directory_count: u64,
}

/// Aggregated totals across all scanned roots.
#[derive(Serialize, Debug)]
pub struct JsonTotals {
    /// Number of root directories scanned.
    pub roots_scanned: usize,

    /// Combined size in bytes.
    pub size: u64,

    /// Human-readable formatted combined size.
    pub size_formatted: String,

    /// Combined file count.
    pub file_count: u64,

    /// Combined subdirectory count.
    pub directory_count: u64,
}

impl JsonOutput {
    /// Build a `JsonOutput` from per-root scan reports.
    ///
    /// # Errors
    ///
    /// Returns an error when `decimals` is out of range for [`format_size`].
    pub fn from_reports(reports: &[ScanReport], style: UnitStyle, decimals: i32) -> Result<Self> {
        let entries = reports
            .iter()
            .map(|report| JsonDirEntry::from_report(report, style, decimals))
            .collect::<Result<Vec<_>>>()?;

        let combined = reports
            .iter()
            .fold(DirStats::default(), |acc, report| acc.combine(report.stats));

        Ok(Self {
            entries,
            totals: JsonTotals {
                roots_scanned: reports.len(),
                size: combined.size,
                size_formatted: format_size(combined.size, style, decimals)?,
                file_count: combined.file_count,
                directory_count: combined.dir_count,
            },
        })
    }
}

impl JsonDirEntry {
    /// Convert a [`ScanReport`] into a `JsonDirEntry`.
    ///
    /// # Errors
    ///
    /// Returns an error when `decimals` is out of range for [`format_size`].
    pub fn from_report(report: &ScanReport, style: UnitStyle, decimals: i32) -> Result<Self> {
        Ok(Self {
            path: report.path.display().to_string(),
            size: report.stats.size,
            size_formatted: format_size(report.stats.size, style, decimals)?,
            file_count: report.stats.file_count,
            directory_count: report.stats.dir_count,
        })
    }
}
