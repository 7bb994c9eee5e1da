//! Logging setup for the `aml` binary.
//!
//! Libraries only emit `tracing` events; this module installs the one
//! subscriber that renders them.
//!
//! | level   | used for                                                        |
//! |---------|-----------------------------------------------------------------|
//! | `error` | failed loads and writes                                         |
//! | `warn`  | silent degrades: invalid regex, unknown zone, bad `apiVersion`  |
//! | `info`  | command progress and summary counts                             |
//! | `debug` | per-rule decisions (skipped, constraint failed)                 |
//! | `trace` | path and variable resolution                                    |
//!
//! `RUST_LOG` takes over filtering unless a level was given on the command line.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Crates whose events follow the configured level; everything else stays at `warn`.
const OWN_CRATES: [&str; 5] = ["aml_cli", "aml_map", "aml_model", "aml_schema", "aml_transform"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-field human output.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// Newline-delimited JSON, with span close events.
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for this tool's own crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace `level_filter` when it is set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    /// Directives used when `RUST_LOG` does not apply.
    pub fn directives(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        std::iter::once("warn".to_string())
            .chain(OWN_CRATES.iter().map(|name| format!("{name}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn env_filter(&self) -> EnvFilter {
        if self.use_env_filter
            && let Ok(filter) = EnvFilter::try_from_default_env()
        {
            return filter;
        }
        EnvFilter::new(self.directives())
    }
}

/// Installs the global subscriber. Call once, at startup.
///
/// # Errors
///
/// Fails when the log file cannot be opened for appending.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };
    init_logging_with_writer(config, writer);
    Ok(())
}

/// Installs the global subscriber, sending output to `writer`.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(format_layer(config, writer))
        .init();
}

fn format_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}
