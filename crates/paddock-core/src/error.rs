//! Error types for the Paddock engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Paddock engine.
///
/// Only caller input errors are represented here. Best-effort operations
/// (remote text generation, sentiment analysis, unmapped reference keys)
/// degrade to deterministic defaults instead of returning an error.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PaddockError {
    /// A reference-data lookup key was not recognized
    #[error("Unknown {kind} key '{key}'")]
    InvalidKey { kind: String, key: String },

    /// A required input string was empty
    #[error("{field} must not be empty")]
    EmptyInput { field: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaddockError {
    /// Creates an InvalidKey error
    pub fn invalid_key(kind: impl Into<String>, key: impl Into<String>) -> Self {
        Self::InvalidKey {
            kind: kind.into(),
            key: key.into(),
        }
    }

    /// Creates an EmptyInput error
    pub fn empty_input(field: impl Into<String>) -> Self {
        Self::EmptyInput {
            field: field.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an InvalidKey error
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey { .. })
    }

    /// Check if this is an EmptyInput error
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}

/// A type alias for `Result<T, PaddockError>`.
pub type Result<T> = std::result::Result<T, PaddockError>;
