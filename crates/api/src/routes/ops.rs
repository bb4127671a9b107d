//! Operations routes
//!
//! Health check endpoint for monitoring. No authentication.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use wafr_catalog::CatalogState;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Catalog feed readiness: ready, loading, or failed
    pub catalog: &'static str,
}

/// Operations routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = match state.catalog.state() {
        CatalogState::Ready(_) => "ready",
        CatalogState::Loading => "loading",
        CatalogState::Failed { .. } => "failed",
    };
    Json(HealthResponse {
        status: "ok",
        catalog,
    })
}
