//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/dirstat/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! # Single directory (legacy):
//! # dir = "~/Downloads"
//! # Multiple directories:
//! # dirs = ["~/Downloads", "~/Videos"]
//!
//! [output]
//! style = "binary"
//! decimals = 1
//!
//! [scanning]
//! threads = 4
//! verbose = true
//! sequential = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Default directories to report on (plural; takes priority over `dir`)
    pub dirs: Option<Vec<PathBuf>>,

    /// Default directory to report on (legacy single-dir; kept for backward compatibility)
    pub dir: Option<PathBuf>,

    /// Output options
    #[serde(default)]
    pub output: FileOutputConfig,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,
}

/// Output options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileOutputConfig {
    /// Size-unit style (`"windows"`, `"binary"`, `"metric"`)
    pub style: Option<String>,

    /// Number of fractional digits in formatted sizes
    pub decimals: Option<i32>,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileScanConfig {
    /// Number of threads for scanning
    pub threads: Option<usize>,

    /// Whether to report root paths that could not be scanned
    pub verbose: Option<bool>,

    /// Whether to disable the parallel traversal
    pub sequential: Option<bool>,
}

/// Resolved configuration for scanning behavior.
///
/// Built by layering CLI arguments over the config file; consumed by the
/// binary when sizing the thread pool and choosing the traversal mode.
#[derive(Clone, Copy, Debug)]
pub struct ScanOptions {
    /// Number of threads to use for scanning (0 = default)
    pub threads: usize,

    /// Whether to report root paths that could not be scanned
    pub verbose: bool,

    /// Whether to use the sequential traversal instead of the parallel one
    pub sequential: bool,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/dirstat/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux/macOS, `%APPDATA%` on Windows).
    ///
    /// # Returns
    ///
    /// `Some(PathBuf)` with the config file path, or `None` if the config
    /// directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dirstat").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    /// If the file exists but is malformed, returns an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file exists but cannot be read
    /// - The config file exists but contains invalid TOML or unexpected fields
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}
