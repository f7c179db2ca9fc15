//! Global tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter `{filter}`: {reason}")]
    InvalidFilter { filter: String, reason: String },
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Filter built from `RUST_LOG` when set, otherwise from the configured level.
pub fn log_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = config.level.trim().to_ascii_lowercase();
    EnvFilter::try_new(&level)
        .map_err(|error| TelemetryError::InvalidFilter { filter: level, reason: error.to_string() })
}

/// Install the process-wide subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = log_filter(config)?;
    let builder = tracing_subscriber::fmt().with_target(false).with_env_filter(filter);

    let installed = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|error| TelemetryError::AlreadyInitialized(error.to_string()))
}
