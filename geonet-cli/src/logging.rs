//! Structured logging setup for the `geonet` binary.
//!
//! A single global `tracing` subscriber writes to stderr, in human or JSON
//! form, and the `log` facade is bridged into it.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "GEONET_LOG_FORMAT";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Output encoding for log records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-field human-readable lines.
    #[default]
    Human,
    /// One JSON object per record, with the active span list.
    Json,
}

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoggingError {
    /// `GEONET_LOG_FORMAT` was not valid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8")]
    InvalidUnicode {
        /// Name of the offending variable.
        name: &'static str,
    },
    /// `GEONET_LOG_FORMAT` named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Value as supplied.
        provided: String,
    },
}

/// Installs the global subscriber once; later calls are no-ops.
///
/// `RUST_LOG` selects the filter and defaults to `info`. When another
/// subscriber already owns the global slot it is left in place.
///
/// # Errors
/// Returns [`LoggingError`] when `GEONET_LOG_FORMAT` is unreadable or names
/// an unsupported format.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    let format = format_from_env()?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
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

    let _ = LogTracer::init();
    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("global subscriber already installed; keeping it");
    }
    let _ = INITIALISED.set(());
    Ok(())
}

fn format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
        }),
    }
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "human" | "text" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}
