//! Application state
//!
//! Shared state for API handlers: the document store, the live catalog
//! handle, and the admin token.

use std::sync::Arc;

use wafr_catalog::{CatalogState, LiveCatalog, Snapshot};
use wafr_store::DataPlane;

use crate::error::{ApiError, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Document store
    pub plane: Arc<DataPlane>,
    /// Live catalog feed
    pub catalog: Arc<LiveCatalog>,
    /// Bearer token for the admin surface; `None` disables it
    pub admin_token: Option<String>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        plane: Arc<DataPlane>,
        catalog: Arc<LiveCatalog>,
        admin_token: Option<String>,
    ) -> Self {
        Self {
            plane,
            catalog,
            admin_token,
        }
    }

    /// The current catalog snapshot
    ///
    /// Errors while the feed is still warming or parked on a failed load,
    /// so handlers turn those states into 503s uniformly.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        match self.catalog.state() {
            CatalogState::Ready(snapshot) => Ok(snapshot),
            CatalogState::Loading => Err(ApiError::CatalogLoading),
            CatalogState::Failed { message } => Err(ApiError::CatalogFailed(message)),
        }
    }
}
