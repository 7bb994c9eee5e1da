//! CLI argument definitions for the mapping tool.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "aml",
    version,
    about = "AAS mapping language - map JSON payloads through aasx.map/v1 configurations",
    long_about = "Map JSON payloads into target documents using declarative aasx.map/v1 \
                  configurations (JSON or YAML).\n\n\
                  Can also infer the JSON Schema a configuration expects of its payloads."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of writing to stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

impl Cli {
    /// Logging setup implied by the flags.
    ///
    /// `--log-level` beats `-v`/`-q`; either one disables `RUST_LOG`.
    /// Colors follow `--color`, and in auto mode are only used on a
    /// terminal stderr.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            with_timestamps: self.log_timestamps,
            with_target: self.log_target,
            with_ansi,
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Map a payload through a configuration.
    Map(MapArgs),

    /// Export the JSON Schema a configuration expects of its payloads.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Mapping configuration (.json, .yaml or .yml).
    #[arg(long, value_name = "FILE")]
    pub config: PathBuf,

    /// JSON payload to map.
    #[arg(long, value_name = "FILE")]
    pub payload: PathBuf,

    /// Write the result to <DIR>/<name>.json instead of stdout.
    #[arg(long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Reject rules that use unsupported transform ops or constraint kinds.
    ///
    /// By default these are ignored: unknown ops leave the value unchanged
    /// and unknown constraints pass.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Mapping configuration (.json, .yaml or .yml).
    #[arg(long, value_name = "FILE")]
    pub config: PathBuf,

    /// Write the schema to this file instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
