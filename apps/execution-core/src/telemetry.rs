//! Tracing Setup
//!
//! Installs a `tracing_subscriber::fmt` subscriber configured from
//! [`LoggingConfig`].
//!
//! # Configuration
//!
//! - `RUST_LOG`: filter directives; overrides `observability.logging.level`
//!
//! # Usage
//!
//! ```rust,ignore
//! use execution_core::telemetry::init_tracing;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = execution_core::config::load_config(None)?;
//!     init_tracing(&config.observability.logging)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::config::LoggingConfig;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level is not a valid filter directive.
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Offending filter.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// The format is not one of `pretty`, `json`, `compact`.
    #[error("Unknown log format '{0}'")]
    UnknownFormat(String),

    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Build the filter: `RUST_LOG` if set, otherwise the configured level.
///
/// # Errors
///
/// Returns `InvalidFilter` if the configured level does not parse.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidFilter {
            filter: config.level.clone(),
            reason: e.to_string(),
        })
    })
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error for an invalid level or format, or if a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let span_events = if config.include_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(span_events);

    let installed = match config.format.as_str() {
        "pretty" => builder.pretty().try_init(),
        "json" => builder.json().with_current_span(config.include_spans).try_init(),
        "compact" => builder.compact().try_init(),
        other => return Err(TelemetryError::UnknownFormat(other.to_string())),
    };
    installed.map_err(|e| TelemetryError::Install(e.to_string()))?;

    tracing::debug!(
        level = %config.level,
        format = %config.format,
        "Tracing initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str, format: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: format.to_string(),
            include_spans: false,
        }
    }

    #[test]
    fn unknown_format_rejected() {
        let err = init_tracing(&logging("info", "xml")).unwrap_err();
        assert!(matches!(err, TelemetryError::UnknownFormat(f) if f == "xml"));
    }

    #[test]
    fn second_install_fails() {
        let config = logging("warn", "compact");
        let first = init_tracing(&config);
        let second = init_tracing(&config);

        // Another test may have installed the global subscriber first.
        assert!(first.is_ok() || matches!(first, Err(TelemetryError::Install(_))));
        assert!(matches!(second, Err(TelemetryError::Install(_))));
    }
}
