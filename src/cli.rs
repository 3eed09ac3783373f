//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library. It provides structured access
//! to user input and handles argument conflicts and defaults.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use dirstat::config::{FileConfig, ScanOptions, expand_tilde};
use dirstat::format::UnitStyle;

/// Command-line arguments for controlling directory scanning behavior.
#[derive(Parser)]
struct ScanningArgs {
    /// The number of threads to use for directory scanning
    ///
    /// A value of 0 uses the default number of threads (typically the number of CPU cores).
    /// Higher values can improve scanning performance on systems with fast storage.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Report root paths that are missing or not directories
    ///
    /// When enabled, a warning is printed for every requested root that could
    /// not be scanned. Totals never include such roots either way.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Scan each tree sequentially instead of in parallel
    ///
    /// By default subtrees of each root are aggregated on a thread pool.
    /// This flag forces a single-threaded depth-first traversal.
    #[arg(long)]
    sequential: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// This struct defines the complete command-line interface for the dirstat tool.
/// Helper methods accept a [`FileConfig`] reference so that config-file values act
/// as defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "dirstat")]
#[command(
    about = "Report the aggregate size, file count, and directory count of directory trees"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// One or more directories to report on
    ///
    /// Defaults to the current directory if not specified. Multiple
    /// directories can be provided: `dirstat ~/Downloads ~/Videos`
    #[arg(num_args = 0..)]
    dirs: Vec<PathBuf>,

    /// Size-unit style used for formatted sizes
    ///
    /// `windows` and `binary` both scale by 1024 but label the units as
    /// KB/MB/... and KiB/MiB/... respectively; `metric` scales and labels
    /// in base 1000 (kB/MB/...).
    #[arg(short = 's', long, value_enum)]
    style: Option<UnitStyle>,

    /// Number of fractional digits in formatted sizes
    #[arg(short = 'n', long)]
    decimals: Option<i32>,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, all human-readable output (colors, progress spinner)
    /// is suppressed and a single JSON document is printed to stdout.
    #[arg(long)]
    json: bool,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Resolve the target directories from CLI args, config file, or default.
    ///
    /// Priority: CLI arguments > config file `dirs` > config file `dir` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn directories(&self, config: &FileConfig) -> Vec<PathBuf> {
        if !self.dirs.is_empty() {
            return self.dirs.clone();
        }

        if let Some(ref dirs) = config.dirs
            && !dirs.is_empty()
        {
            return dirs.iter().map(|d| expand_tilde(d)).collect();
        }

        if let Some(ref dir) = config.dir {
            return vec![expand_tilde(dir)];
        }

        vec![PathBuf::from(".")]
    }

    /// Resolve the size-unit style from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > default (`binary`).
    #[must_use]
    pub fn style(&self, config: &FileConfig) -> UnitStyle {
        self.style
            .or_else(|| {
                config
                    .output
                    .style
                    .as_ref()
                    .and_then(|s| UnitStyle::from_str(s, true).ok())
            })
            .unwrap_or_default()
    }

    /// Resolve the number of fractional digits from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > default (`1`). Out-of-range
    /// values are rejected later by the formatter, not here.
    #[must_use]
    pub fn decimals(&self, config: &FileConfig) -> i32 {
        self.decimals.or(config.output.decimals).unwrap_or(1)
    }

    /// Resolve scanning options from CLI args and config file.
    ///
    /// For boolean flags, the CLI flag (if set to `true`) takes priority,
    /// then the config file value, then `false`.
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        ScanOptions {
            threads: self
                .scanning
                .threads
                .or(config.scanning.threads)
                .unwrap_or(0),
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            sequential: self.scanning.sequential || config.scanning.sequential.unwrap_or(false),
        }
    }
}
