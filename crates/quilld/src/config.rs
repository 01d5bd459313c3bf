//! Daemon configuration resolved from the command line.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Output format for stderr log lines.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    Display,
    EnumString,
    ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per line, suitable for log ingestion.
    #[default]
    Json,
    /// Single-line human-readable text.
    Compact,
}

/// Command-line arguments accepted by the daemon.
#[derive(Debug, Parser)]
#[command(
    name = "quilld",
    about = "Note server speaking JSON-RPC over stdio",
    version
)]
pub struct Cli {
    /// Log at info level instead of errors only.
    #[arg(long)]
    pub verbose: bool,

    /// Append debug-level logs to this file in addition to stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Output format for stderr logs.
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
}

/// Resolved daemon configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Surface info-level events on stderr rather than errors only.
    pub verbose: bool,
    /// Optional file receiving debug-level logs.
    pub log_file: Option<PathBuf>,
    /// Stderr log output format.
    pub log_format: LogFormat,
}

impl Config {
    /// Returns the stderr filter directive for this configuration.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose { "info" } else { "error" }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            verbose: cli.verbose,
            log_file: cli.log_file,
            log_format: cli.log_format,
        }
    }
}
