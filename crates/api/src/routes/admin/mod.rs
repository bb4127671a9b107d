//! Admin routes
//!
//! Everything behind the bearer token: entity CRUD, moderation queues,
//! usage views, and the manual catalog refresh. Handlers take the
//! [`AdminToken`](crate::extract::AdminToken) extractor, so an absent or
//! wrong token rejects before any handler body runs.

pub mod entities;
pub mod moderation;
pub mod usage;

use axum::Router;

use crate::state::AppState;

/// Build the admin router
pub fn routes() -> Router<AppState> {
    entities::routes()
        .merge(moderation::routes())
        .merge(usage::routes())
}
