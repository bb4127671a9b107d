//! API error types
//!
//! Provides structured error responses for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use wafr_model::ModelError;
use wafr_store::StoreError;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Admin token missing or wrong
    #[error("authentication required")]
    Unauthorized,

    /// Admin surface has no token configured
    #[error("admin surface is disabled: no token configured")]
    AdminDisabled,

    /// Resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// This device already submitted a lead
    #[error("a lead already exists for this device")]
    LeadExists,

    /// Store-request review from a terminal state
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Validation error
    #[error("validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Catalog has not finished its initial load
    #[error("catalog is still loading")]
    CatalogLoading,

    /// Catalog's last load failed; retry is explicit
    #[error("catalog load failed: {0}")]
    CatalogFailed(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::AdminDisabled => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::LeadExists => StatusCode::CONFLICT,
            Self::InvalidTransition(_) => StatusCode::CONFLICT,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CatalogLoading => StatusCode::SERVICE_UNAVAILABLE,
            Self::CatalogFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::AdminDisabled => "ADMIN_DISABLED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::LeadExists => "LEAD_EXISTS",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::CatalogLoading => "CATALOG_LOADING",
            Self::CatalogFailed(_) => "CATALOG_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    // Helper constructors

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound(format!("{} '{}' not found", entity, id))
    }

    /// Create a bad request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create a validation error
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::not_found(entity, &id),
            StoreError::AlreadyExists { entity: "lead", .. } => Self::LeadExists,
            StoreError::AlreadyExists { entity, id } => {
                Self::BadRequest(format!("{} '{}' already exists", entity, id))
            }
            StoreError::InvalidTransition { id, status } => {
                Self::InvalidTransition(format!("store request {} is already {}", id, status))
            }
            StoreError::Model(model) => model.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation { field, message } => Self::Validation {
                field: field.to_string(),
                message,
            },
            other => Self::BadRequest(other.to_string()),
        }
    }
}

impl From<wafr_catalog::CatalogError> for ApiError {
    fn from(err: wafr_catalog::CatalogError) -> Self {
        match err {
            wafr_catalog::CatalogError::Loading => Self::CatalogLoading,
            wafr_catalog::CatalogError::Failed(message) => Self::CatalogFailed(message),
            wafr_catalog::CatalogError::Store(store) => store.into(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code (machine-readable)
    pub error: &'static str,
    /// Error message (human-readable)
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.code(),
            message: self.to_string(),
        };

        tracing::warn!(
            error_code = body.error,
            error_message = %body.message,
            status = %status,
            "API error"
        );

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
