//! Unified error types for the Warden workspace.
//!
//! Registry mutations fail with exactly one caller-visible kind,
//! [`WardenError::InvalidOperation`]; the remaining variants cover the
//! transport and serialization layers around the control protocol.

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum WardenError {
    /// A mutating request's precondition on current state was violated:
    /// duplicate tag, wrong source state for the requested transition,
    /// or an unknown tag.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Human-readable explanation of the rejected request.
        message: String,
    },

    /// A configuration value is invalid or unresolvable.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// An I/O operation on the control connection failed.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serialization or deserialization of a protocol message failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The peer broke the request/response framing contract.
    #[error("protocol error: {message}")]
    Protocol {
        /// Description of the framing violation.
        message: String,
    },
}

impl WardenError {
    /// Builds an [`WardenError::InvalidOperation`] from any message.
    #[must_use]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, WardenError>;
