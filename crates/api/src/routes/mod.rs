//! API routes
//!
//! Domain-grouped HTTP route handlers.

pub mod admin;
pub mod catalog;
pub mod device;
pub mod ops;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the complete API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Operations routes (health - no auth)
        .merge(ops::routes())
        // Device surface (catalog reads + device-scoped writes)
        .nest("/api/v1", catalog::routes().merge(device::routes()))
        // Admin surface (bearer token)
        .nest("/api/v1/admin", admin::routes())
        // Browser clients call both surfaces directly
        .layer(CorsLayer::permissive())
        .with_state(state)
}
