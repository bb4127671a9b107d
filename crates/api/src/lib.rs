//! Wafr API
//!
//! HTTP surface for the coupon backend, built on Axum. Two audiences share
//! one router:
//!
//! - the **device surface** under `/api/v1` — catalog reads, usage events,
//!   onboarding, store requests, notifications; identified by an
//!   `X-Device-Id` header, no accounts;
//! - the **admin surface** under `/api/v1/admin` — entity CRUD, moderation,
//!   usage views; a single bearer token from config.
//!
//! # Usage
//!
//! ```ignore
//! use wafr_api::{build_router, AppState};
//!
//! let state = AppState::new(plane, catalog, admin_token);
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

// Re-exports
pub use error::{ApiError, Result};
pub use extract::{AdminToken, DeviceId};
pub use routes::build_router;
pub use state::AppState;
