// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `pipeviz`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pipeviz",
    version,
    about = "Export a data pipeline as a static visualization site.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    ///
    /// Default: `Pipeviz.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Name of the pipeline to visualize.
    ///
    /// If omitted, `config.default_pipeline` is used.
    #[arg(long, value_name = "NAME")]
    pub pipeline: Option<String>,

    /// Use a pre-built pipeline JSON file instead of building one.
    ///
    /// The file is validated and copied through unchanged.
    #[arg(long, value_name = "PATH")]
    pub load_file: Option<PathBuf>,

    /// Directory to write the static site to.
    #[arg(long, value_name = "PATH", default_value = "public")]
    pub directory: PathBuf,

    /// Write the pipeline JSON to this file instead of the site directory.
    #[arg(long, value_name = "PATH", conflicts_with = "site_template")]
    pub save_file: Option<PathBuf>,

    /// Prebuilt front-end copied into `--directory` before the graph is
    /// written. Replaces any existing directory.
    #[arg(long, value_name = "PATH")]
    pub site_template: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PIPEVIZ_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate, print a summary, but don't write anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
