//! Diagnostics setup for the `reachgraph` binary.
//!
//! Rendered matrices own stdout, so every span and event goes to stderr.
//! The format comes from `REACHGRAPH_LOG_FORMAT`, the level filter from
//! `RUST_LOG`, and records from the `log` facade are forwarded into the same
//! subscriber.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "REACHGRAPH_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, including the span list.
    Json,
}

/// Reasons the diagnostics subscriber could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `REACHGRAPH_LOG_FORMAT` is set but is not valid UTF-8.
    #[error("`{name}` is not valid UTF-8: {source}")]
    InvalidUnicode {
        /// The variable that was read.
        name: &'static str,
        /// Error from `std::env::var`.
        #[source]
        source: env::VarError,
    },
    /// `REACHGRAPH_LOG_FORMAT` names neither `human` nor `json`.
    #[error("log format `{provided}` is not one of `human`, `json`")]
    UnsupportedFormat {
        /// The normalised value that was rejected.
        provided: String,
    },
    /// Another global subscriber already owns the dispatcher.
    #[error("tracing subscriber could not be installed: {source}")]
    InstallFailed {
        /// Error from `try_init`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Sets up the stderr subscriber once per process.
///
/// Later calls return immediately. When some other subscriber is already
/// the global default it stays in charge and this call still succeeds.
///
/// # Errors
/// Fails with [`LoggingError::InvalidUnicode`] or
/// [`LoggingError::UnsupportedFormat`] when `REACHGRAPH_LOG_FORMAT` cannot be
/// used.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    match install_subscriber(log_format_from_env()?) {
        Ok(()) | Err(LoggingError::InstallFailed { .. }) => {}
        Err(err) => return Err(err),
    }
    let _ = INITIALISED.set(());
    Ok(())
}

fn log_format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(err @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source: err,
        }),
    }
}

fn install_subscriber(format: LogFormat) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let fmt_layer = match format {
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Human => fmt_layer.boxed(),
    };

    // A `log` logger set by an embedding program wins.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}
