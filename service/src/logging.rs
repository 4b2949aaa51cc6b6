//! Logging initialisation
//!
//! `LOG_LEVEL` takes precedence over `RUST_LOG`; both fall back to `info`.

use crate::error::ServiceError;
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Default filter directive when nothing is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human readable single-line output
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Build the filter from an explicit level, then `RUST_LOG`, then the default.
///
/// An unparsable explicit level falls through to the next source.
pub fn resolve_filter(level: Option<&str>) -> EnvFilter {
    level
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global tracing subscriber
pub fn init(level: Option<&str>, format: LogFormat) -> Result<(), ServiceError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(level))
        .with_target(true);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| ServiceError::Internal(format!("failed to initialize logging: {e}")))
}
