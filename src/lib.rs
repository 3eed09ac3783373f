//! # dirstat
//!
//! A CLI tool and library for reporting the aggregate size, file count, and
//! directory count of directory trees, with human-readable size formatting
//! in a selectable unit style.
//!
//! The two core pieces are independent and stateless:
//!
//! - [`format::format_size`] turns a raw byte count into a display string
//!   like `"1.5 GiB"` using one of three unit styles (Windows, binary/IEC,
//!   metric/SI), with exact-arithmetic rounding so a mantissa never displays
//!   as `"1000.0"` of a too-small unit.
//! - [`aggregate::aggregate`] walks a directory tree and totals file sizes,
//!   file counts, and directory counts, silently skipping subtrees it cannot
//!   read rather than failing the whole scan.
//!
//! A typical caller feeds the aggregator's total into the formatter. The
//! [`paths`] module carries small helpers for copy/move tooling built around
//! the same core.

pub mod aggregate;
pub mod config;
pub mod format;
pub mod output;
pub mod paths;

pub use aggregate::{DirStats, aggregate, aggregate_parallel};
pub use config::{FileConfig, ScanOptions};
pub use format::{UnitStyle, format_size};
pub use output::{JsonOutput, ScanReport};
pub use paths::{PathKind, path_kind, resolve_destination};
