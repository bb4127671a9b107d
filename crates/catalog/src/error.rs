//! Catalog error types

use thiserror::Error;

/// Errors from the catalog feed
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The feed has not completed its initial load yet
    #[error("catalog is still loading")]
    Loading,

    /// The last refresh failed; retry is explicit
    #[error("catalog load failed: {0}")]
    Failed(String),

    /// Underlying store error
    #[error(transparent)]
    Store(#[from] wafr_store::StoreError),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
