//! Public catalog routes
//!
//! Read-only views over the current snapshot. Every endpoint answers 503
//! `CATALOG_LOADING` until the feed's initial load completes; clients show
//! their loading state and retry explicitly.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use wafr_catalog::{CodeRow, RowQuery, ScopeFilter, SortMode};
use wafr_model::{AppSettings, Category, Country, Store};

use crate::error::Result;
use crate::state::AppState;

/// Public catalog routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/catalog/coupons", get(list_coupons))
        .route("/catalog/stores", get(list_stores))
        .route("/catalog/categories", get(list_categories))
        .route("/catalog/countries", get(list_countries))
        .route("/settings", get(get_settings))
}

/// Coupon list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct CouponListParams {
    /// Free-text search over code and store name
    pub q: Option<String>,
    pub category: Option<String>,
    pub store: Option<String>,
    pub country: Option<String>,
    /// popular (default), a-z, z-a, newest
    pub sort: Option<String>,
}

impl CouponListParams {
    fn into_query(self) -> RowQuery {
        RowQuery {
            search: self.q.unwrap_or_default(),
            category: ScopeFilter::parse(self.category.as_deref()),
            store: ScopeFilter::parse(self.store.as_deref()),
            country: ScopeFilter::parse(self.country.as_deref()),
            sort: SortMode::parse(self.sort.as_deref()),
        }
    }
}

/// GET /api/v1/catalog/coupons
async fn list_coupons(
    State(state): State<AppState>,
    Query(params): Query<CouponListParams>,
) -> Result<Json<Vec<CodeRow>>> {
    let snapshot = state.snapshot()?;
    Ok(Json(params.into_query().apply(&snapshot.rows)))
}

#[derive(Debug, Default, Deserialize)]
struct StoreListParams {
    country: Option<String>,
}

/// GET /api/v1/catalog/stores
async fn list_stores(
    State(state): State<AppState>,
    Query(params): Query<StoreListParams>,
) -> Result<Json<Vec<Store>>> {
    let snapshot = state.snapshot()?;
    let country = ScopeFilter::parse(params.country.as_deref());
    let stores = snapshot
        .stores
        .iter()
        .filter(|s| match &country {
            ScopeFilter::Any => true,
            ScopeFilter::Id(id) => &s.country_id == id,
        })
        .cloned()
        .collect();
    Ok(Json(stores))
}

/// GET /api/v1/catalog/categories
async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let snapshot = state.snapshot()?;
    let mut categories = snapshot.categories.clone();
    categories.sort_by_key(|c| c.sort_order);
    Ok(Json(categories))
}

/// GET /api/v1/catalog/countries
async fn list_countries(State(state): State<AppState>) -> Result<Json<Vec<Country>>> {
    let snapshot = state.snapshot()?;
    Ok(Json(snapshot.countries.clone()))
}

/// GET /api/v1/settings
///
/// App settings with banners in display order. Served from the store, not
/// the snapshot, so it works even while the catalog is warming.
async fn get_settings(State(state): State<AppState>) -> Result<Json<AppSettings>> {
    let mut settings = state.plane.settings().get().await?;
    settings.banners = settings.sorted_banners();
    Ok(Json(settings))
}
