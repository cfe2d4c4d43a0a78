//! CLI-specific error types
//!
//! Error codes:
//! - DOCPAGE_CLI_CONFIG
//! - DOCPAGE_CLI_IO
//! - DOCPAGE_CLI_JSON
//! - DOCPAGE_CLI_INPUT
//! - DOCPAGE_CLI_EXECUTOR
//! - DOCPAGE_CLI_LOGGING

use std::io;

use thiserror::Error;

use crate::executor::ExecutorError;
use crate::observability::ObservabilityError;
use crate::options::ConfigError;

/// CLI error. Every CLI error ends the process with a non-zero status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed JSON of the wrong shape
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error(transparent)]
    Logging(#[from] ObservabilityError),
}

impl CliError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "DOCPAGE_CLI_CONFIG",
            CliError::Io(_) => "DOCPAGE_CLI_IO",
            CliError::Json(_) => "DOCPAGE_CLI_JSON",
            CliError::InvalidInput(_) => "DOCPAGE_CLI_INPUT",
            CliError::Executor(_) => "DOCPAGE_CLI_EXECUTOR",
            CliError::Logging(_) => "DOCPAGE_CLI_LOGGING",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
