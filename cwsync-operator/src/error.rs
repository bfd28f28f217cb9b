//! Error types for the cwsync operator.

use cwsync_core::TagError;
use thiserror::Error;

/// Errors that can occur during operator operations.
#[derive(Debug, Error)]
pub enum OperatorError {
    /// Tag reconciliation failed.
    #[error("Tag sync failed: {0}")]
    Tags(#[from] TagError),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl OperatorError {
    /// Whether the failure came from the caller cancelling the pass.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Tags(e) if e.is_interrupted())
    }
}

/// Result type for operator operations.
pub type OperatorResult<T> = Result<T, OperatorError>;

impl From<serde_yaml::Error> for OperatorError {
    fn from(err: serde_yaml::Error) -> Self {
        OperatorError::SerializationError(err.to_string())
    }
}
