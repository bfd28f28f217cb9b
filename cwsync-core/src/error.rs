//! Error types for tag reconciliation.
//!
//! Remote failures are carried verbatim from the tagging backend. The core
//! never retries them and never downgrades them to a no-op.

use thiserror::Error;

/// Error code the backend uses for a resource it does not know about.
pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// Errors that can occur while fetching or applying tags.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagError {
    /// The remote tagging service rejected or failed a call.
    #[error("{code}: {message}")]
    Remote {
        /// Service error code (e.g. `ThrottlingException`).
        code: String,
        /// Human readable message returned by the service.
        message: String,
    },

    /// The caller cancelled the operation.
    #[error("{operation} cancelled")]
    Cancelled {
        /// Remote operation that was abandoned.
        operation: &'static str,
    },

    /// The caller's deadline passed before the operation completed.
    #[error("{operation} exceeded its deadline")]
    DeadlineExceeded {
        /// Remote operation that was abandoned.
        operation: &'static str,
    },

    /// A tag received from or destined for the backend is malformed.
    #[error("Invalid tag: {0}")]
    InvalidTag(String),
}

impl TagError {
    /// Build a remote error from a service code and message.
    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether the backend reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote { code, .. } if code == RESOURCE_NOT_FOUND)
    }

    /// Whether the error came from the caller's context rather than the backend.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::DeadlineExceeded { .. })
    }
}

/// Result type for tag operations.
pub type TagResult<T> = Result<T, TagError>;
