//! Model error types

use thiserror::Error;

/// Errors produced while decoding or validating entities
#[derive(Debug, Error)]
pub enum ModelError {
    /// Document could not be decoded into the entity type
    #[error("failed to decode {collection} document: {message}")]
    Decode {
        collection: &'static str,
        message: String,
    },

    /// A required field is missing or malformed on the write path
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },
}

impl ModelError {
    /// Create a decode error
    pub fn decode(collection: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            collection,
            message: message.into(),
        }
    }

    /// Create a field-scoped validation error
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
