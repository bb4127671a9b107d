//! Store error types

use thiserror::Error;

/// Errors from the document store
///
/// No retry or backoff lives here: an error surfaces once to the caller and
/// retry is an explicit user action.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] turso::Error),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Entity already exists
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// Store-request review attempted from a terminal state
    #[error("store request {id} is already {status}")]
    InvalidTransition { id: String, status: &'static str },

    /// Document failed to decode or validate
    #[error(transparent)]
    Model(#[from] wafr_model::ModelError),

    /// JSON serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a not found error
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create an already exists error
    pub fn already_exists(entity: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.into(),
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(id: impl Into<String>, status: &'static str) -> Self {
        Self::InvalidTransition {
            id: id.into(),
            status,
        }
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
