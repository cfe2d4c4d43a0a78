//! Logging setup
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job. Filtering follows `RUST_LOG` when set, else the given
//! default directive.

use std::io;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Directive used when neither `RUST_LOG` nor the caller supplies one
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Errors raised while installing the log subscriber.
///
/// Error codes:
/// - DOCPAGE_OBSERVABILITY_FILTER
/// - DOCPAGE_OBSERVABILITY_INIT
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// The default directive does not parse
    #[error("invalid log filter '{directive}': {reason}")]
    Filter { directive: String, reason: String },

    /// A global subscriber is already installed
    #[error("log subscriber already installed: {0}")]
    Init(String),
}

impl ObservabilityError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            ObservabilityError::Filter { .. } => "DOCPAGE_OBSERVABILITY_FILTER",
            ObservabilityError::Init(_) => "DOCPAGE_OBSERVABILITY_INIT",
        }
    }
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Builds the event filter: `RUST_LOG` if set and valid, else `default_directive`
pub fn env_filter(default_directive: &str) -> ObservabilityResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive).map_err(|e| ObservabilityError::Filter {
            directive: default_directive.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Installs a global subscriber writing to stderr
pub fn init_logging(default_directive: &str, format: LogFormat) -> ObservabilityResult<()> {
    let filter = env_filter(default_directive)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| ObservabilityError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVE).is_ok());
    }

    #[test]
    fn test_error_codes() {
        let err = ObservabilityError::Init("twice".to_string());
        assert_eq!(err.code(), "DOCPAGE_OBSERVABILITY_INIT");
        assert!(err.to_string().contains("twice"));

        let err = ObservabilityError::Filter {
            directive: "x".to_string(),
            reason: "bad".to_string(),
        };
        assert_eq!(err.code(), "DOCPAGE_OBSERVABILITY_FILTER");
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init_logging(DEFAULT_DIRECTIVE, LogFormat::Text);
        let err = init_logging(DEFAULT_DIRECTIVE, LogFormat::Json).unwrap_err();
        assert_eq!(err.code(), "DOCPAGE_OBSERVABILITY_INIT");
    }
}
