//! Configuration error types
//!
//! Error codes:
//! - DOCPAGE_CONFIG_READ
//! - DOCPAGE_CONFIG_PARSE
//! - DOCPAGE_CONFIG_INVALID

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading a paginator configuration.
///
/// Pagination inputs never produce these; only configuration files do.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    /// The configuration file is not valid JSON for this schema
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create an invalid-value error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read(_) => "DOCPAGE_CONFIG_READ",
            ConfigError::Parse(_) => "DOCPAGE_CONFIG_PARSE",
            ConfigError::Invalid(_) => "DOCPAGE_CONFIG_INVALID",
        }
    }
}
