//! Tracing configuration for the setup-jx binary.
//!
//! Diagnostics always go to stderr: stdout is reserved for runner workflow
//! commands, and a stray log line there could be interpreted as one.

use std::io;

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Tracing output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TracingFormat {
    /// Pretty-printed, multi-line format for local debugging.
    Pretty,
    /// Compact single-line format (default).
    Compact,
    /// Structured JSON, one event per line.
    Json,
}

/// Log level options for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Show all logs, including per-file trace events.
    Trace,
    /// Show debug and above.
    Debug,
    /// Show info and above (default).
    Info,
    /// Show warnings and above.
    Warn,
    /// Show errors only.
    Error,
}

impl LogLevel {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the CLI level when set. Must be called
/// at most once per process.
pub fn init_tracing(format: TracingFormat, level: LogLevel) -> miette::Result<()> {
    let level = level.as_str();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new(format!(
                "setup_jx={level},setup_jx_core={level},setup_jx_cache={level},setup_jx_github={level},setup_jx_fetch={level}"
            ))
        })
        .map_err(|e| miette::miette!("Failed to create tracing filter: {e}"))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        TracingFormat::Pretty => {
            let layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_target(true);
            registry.with(layer).init();
        }
        TracingFormat::Compact => {
            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(false);
            registry.with(layer).init();
        }
        TracingFormat::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true);
            registry.with(layer).init();
        }
    }

    Ok(())
}
