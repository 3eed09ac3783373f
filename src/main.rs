//! # dirstat
//!
//! A CLI tool for reporting the aggregate size, file count, and directory
//! count of directory trees, with human-readable sizes in a selectable unit
//! style (Windows, binary/IEC, or metric/SI).
//!
//! Unreadable subtrees never abort a scan: they simply contribute nothing to
//! the totals, so the tool always produces a result.
//!
//! ## Usage
//!
//! ```bash
//! # Report on the current directory
//! dirstat
//!
//! # Report on several trees in metric units with two decimals
//! dirstat ~/Downloads ~/Videos --style metric --decimals 2
//!
//! # Machine-readable output
//! dirstat /var/log --json
//! ```

mod cli;

use std::process::exit;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use dirstat::{
    aggregate::{aggregate, aggregate_parallel},
    config::{FileConfig, ScanOptions},
    format::{UnitStyle, format_size},
    output::{JsonOutput, ScanReport},
    paths::{PathKind, path_kind},
};
use indicatif::{ProgressBar, ProgressStyle};

/// Entry point for the dirstat application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// This function orchestrates the full pipeline: parse arguments, resolve the
/// layered configuration, scan the requested trees, and print either the
/// human-readable report or a single JSON document.
///
/// # Errors
///
/// Returns errors from thread-pool configuration, size formatting (invalid
/// decimal places), or JSON serialization. Filesystem errors during the scan
/// itself are absorbed into the totals, never returned.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);

    let dirs = args.directories(&file_config);
    let style = args.style(&file_config);
    let decimals = args.decimals(&file_config);
    let scan_options = args.scan_options(&file_config);

    // Surface a bad --decimals value before any scanning happens.
    format_size(0, style, decimals)?;

    if scan_options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(scan_options.threads)
            .build_global()?;
    }

    let reports = scan_directories(&dirs, &scan_options, json_mode);

    if json_mode {
        let output = JsonOutput::from_reports(&reports, style, decimals)?;
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("{}", "No scannable directories given".yellow());
        return Ok(());
    }

    print_reports(&reports, style, decimals)
}

// ── Scanning ────────────────────────────────────────────────────────────

/// Aggregate every requested root, skipping paths that are not directories.
///
/// Missing or non-directory roots are excluded from the result; in verbose
/// mode each one is reported on stderr.
fn scan_directories(
    dirs: &[std::path::PathBuf],
    scan_options: &ScanOptions,
    json_mode: bool,
) -> Vec<ScanReport> {
    let progress = if json_mode {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let mut reports = Vec::with_capacity(dirs.len());

    for dir in dirs {
        match path_kind(dir) {
            PathKind::Directory => {}
            PathKind::File => {
                if scan_options.verbose {
                    progress.suspend(|| {
                        eprintln!("{}", format!("Skipping file: {}", dir.display()).yellow());
                    });
                }
                continue;
            }
            PathKind::Missing => {
                if scan_options.verbose {
                    progress.suspend(|| {
                        eprintln!(
                            "{}",
                            format!("Skipping missing path: {}", dir.display()).yellow()
                        );
                    });
                }
                continue;
            }
        }

        progress.set_message(format!("Scanning {}", dir.display()));

        let stats = if scan_options.sequential {
            aggregate(dir)
        } else {
            aggregate_parallel(dir)
        };

        reports.push(ScanReport {
            path: dir.clone(),
            stats,
        });
    }

    progress.finish_and_clear();
    reports
}

// ── Human-readable output ───────────────────────────────────────────────

/// Print one line per scanned root plus a combined total.
fn print_reports(reports: &[ScanReport], style: UnitStyle, decimals: i32) -> Result<()> {
    for report in reports {
        println!(
            "{:>12}  {}  {}",
            format_size(report.stats.size, style, decimals)?.bold(),
            report.path.display(),
            format!(
                "({} files, {} dirs)",
                report.stats.file_count, report.stats.dir_count
            )
            .dimmed()
        );
    }

    if reports.len() > 1 {
        let total = reports
            .iter()
            .fold(dirstat::DirStats::default(), |acc, r| acc.combine(r.stats));

        println!(
            "{:>12}  {}  {}",
            format_size(total.size, style, decimals)?.bold().green(),
            "total".bold(),
            format!("({} files, {} dirs)", total.file_count, total.dir_count).dimmed()
        );
    }

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# dirstat configuration
# All values shown are their defaults. Uncomment and change as needed.

# Default directory to report on (defaults to current directory when not set)
# dir = "."
# Or several:
# dirs = ["~/Downloads", "~/Videos"]

[output]
# Size-unit style: windows (1024, KB/MB), binary (1024, KiB/MiB), metric (1000, kB/MB)
# style = "binary"

# Number of fractional digits in formatted sizes
# decimals = 1

[scanning]
# Number of threads to use for scanning (0 = all CPU cores)
# threads = 0

# Report root paths that could not be scanned
# verbose = false

# Disable the parallel traversal
# sequential = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_i32(val: Option<i32>, default: i32) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_usize(val: Option<usize>, default: &str) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let dir_str = config.dir.as_ref().map_or_else(
        || "\".\"  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );

    format!(
        "\
dir        = {dir}

[output]
style      = {style}
decimals   = {decimals}

[scanning]
threads    = {threads}
verbose    = {verbose}
sequential = {sequential}",
        dir = dir_str,
        style = show_str(config.output.style.as_deref(), "binary"),
        decimals = show_i32(config.output.decimals, 1),
        threads = show_usize(config.scanning.threads, "0 (all cores)"),
        verbose = show_bool(config.scanning.verbose, false),
        sequential = show_bool(config.scanning.sequential, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        anyhow::bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}
