//! Executor error types
//!
//! Error codes:
//! - DOCPAGE_EXECUTOR_INVALID_FILTER
//! - DOCPAGE_EXECUTOR_INVALID_SORT
//! - DOCPAGE_EXECUTOR_INVALID_PROJECTION
//! - DOCPAGE_EXECUTOR_UNAVAILABLE

use thiserror::Error;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Errors raised by the in-memory query executor.
///
/// The paginator hands these back to its caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// Filter document is malformed or uses an unknown operator
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Sort specification is malformed
    #[error("invalid sort: {0}")]
    InvalidSort(String),

    /// Projection is malformed or mixes inclusion and exclusion
    #[error("invalid projection: {0}")]
    InvalidProjection(String),

    /// The collection cannot serve requests
    #[error("collection unavailable: {0}")]
    Unavailable(String),
}

impl ExecutorError {
    pub fn invalid_filter(reason: impl Into<String>) -> Self {
        Self::InvalidFilter(reason.into())
    }

    pub fn invalid_sort(reason: impl Into<String>) -> Self {
        Self::InvalidSort(reason.into())
    }

    pub fn invalid_projection(reason: impl Into<String>) -> Self {
        Self::InvalidProjection(reason.into())
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::InvalidFilter(_) => "DOCPAGE_EXECUTOR_INVALID_FILTER",
            ExecutorError::InvalidSort(_) => "DOCPAGE_EXECUTOR_INVALID_SORT",
            ExecutorError::InvalidProjection(_) => "DOCPAGE_EXECUTOR_INVALID_PROJECTION",
            ExecutorError::Unavailable(_) => "DOCPAGE_EXECUTOR_UNAVAILABLE",
        }
    }
}
