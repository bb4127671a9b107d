//! Entity CRUD endpoints
//!
//! One generic handler set serves the four catalog collections through
//! `DataPlane::docs::<T>()`. Writes go through each entity's own
//! `validate()`, so e.g. a coupon with two default variants is rejected
//! here with a field-scoped 422.
//!
//! Deletes are hard deletes; deactivation is an update with
//! `isActive: false`, which keeps the document (and its relations)
//! around.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::Value;
use wafr_model::{AppSettings, Category, Country, Coupon, Store};
use wafr_store::CatalogEntity;

use crate::error::Result;
use crate::extract::AdminToken;
use crate::state::AppState;

/// Entity CRUD routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list::<Country>).post(create::<Country>))
        .route(
            "/countries/{id}",
            put(update::<Country>).delete(remove::<Country>),
        )
        .route(
            "/categories",
            get(list::<Category>).post(create::<Category>),
        )
        .route(
            "/categories/{id}",
            put(update::<Category>).delete(remove::<Category>),
        )
        .route("/stores", get(list::<Store>).post(create::<Store>))
        .route(
            "/stores/{id}",
            put(update::<Store>).delete(remove::<Store>),
        )
        .route("/coupons", get(list::<Coupon>).post(create::<Coupon>))
        .route(
            "/coupons/{id}",
            put(update::<Coupon>).delete(remove::<Coupon>),
        )
        .route("/settings", put(put_settings))
}

/// GET list, inactive entities included (the admin sees everything)
async fn list<T: CatalogEntity>(
    _admin: AdminToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<T>>> {
    Ok(Json(state.plane.docs::<T>().list_all().await?))
}

/// POST create
///
/// The body may carry its own id (imports, fixtures); otherwise one is
/// generated.
async fn create<T: CatalogEntity>(
    _admin: AdminToken,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<T>)> {
    let id = body
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let entity = T::decode(&id, &body)?;
    state.plane.docs::<T>().put(&entity).await?;
    Ok((StatusCode::CREATED, Json(entity)))
}

/// PUT update
///
/// The path id wins over anything in the body. Full replace,
/// last-writer-wins; concurrent admin edits are not arbitrated.
async fn update<T: CatalogEntity>(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<T>> {
    let entity = T::decode(&id, &body)?;
    state.plane.docs::<T>().put(&entity).await?;
    Ok(Json(entity))
}

/// DELETE
async fn remove<T: CatalogEntity>(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.plane.docs::<T>().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/settings
async fn put_settings(
    _admin: AdminToken,
    State(state): State<AppState>,
    Json(settings): Json<AppSettings>,
) -> Result<Json<AppSettings>> {
    state.plane.settings().put(&settings).await?;
    Ok(Json(settings))
}
