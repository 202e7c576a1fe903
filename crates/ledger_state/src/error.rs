//! World-state error types

use thiserror::Error;

/// Errors that can occur against the world-state store
#[derive(Debug, Error)]
pub enum StateError {
    /// No value stored under the key, or the stored value is empty
    #[error("No record stored under key {key}")]
    NotFound { key: String },

    /// A stored value could not be encoded or decoded
    #[error("Codec failure for key {key}: {source}")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backing store reported a failure
    #[error("Store backend error: {message}")]
    Backend { message: String },
}

impl StateError {
    pub fn not_found(key: impl Into<String>) -> Self {
        StateError::NotFound { key: key.into() }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        StateError::Backend {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, StateError::NotFound { .. })
    }
}
