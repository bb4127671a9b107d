//! Usage views and catalog controls
//!
//! Event-derived usage grouped by store, dashboard stats, and the manual
//! catalog refresh.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use wafr_catalog::{attach_usage, group_by_store, CatalogStats, CodeRow, RowQuery, ScopeFilter};
use wafr_usage::UsageMap;

use crate::error::Result;
use crate::extract::AdminToken;
use crate::state::AppState;

/// Usage view routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/usage", get(usage_by_store))
        .route("/stats", get(catalog_stats))
        .route("/catalog/refresh", post(refresh_catalog))
}

/// Usage view query parameters
#[derive(Debug, Default, Deserialize)]
pub struct UsageParams {
    pub q: Option<String>,
    pub store: Option<String>,
    pub country: Option<String>,
    /// How many rows per group the client has revealed; 0 or absent means
    /// the first page
    #[serde(default)]
    pub shown: usize,
}

/// One store's usage rows, paged
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageGroup {
    pub store_id: String,
    pub store_name: String,
    pub total_uses: u64,
    pub rows: Vec<CodeRow>,
    /// Rows hidden behind "show more"
    pub remaining: usize,
}

/// GET /api/v1/admin/usage
///
/// Live event-derived counts, not the stored `usageCount` field: the full
/// event log is re-aggregated per request. Groups order by total uses,
/// rows within a group by uses then recency.
async fn usage_by_store(
    _admin: AdminToken,
    State(state): State<AppState>,
    Query(params): Query<UsageParams>,
) -> Result<Json<Vec<UsageGroup>>> {
    let snapshot = state.snapshot()?;
    let events = state.plane.events().list_since(None).await?;
    let usage = UsageMap::aggregate(&events);

    let query = RowQuery {
        search: params.q.unwrap_or_default(),
        store: ScopeFilter::parse(params.store.as_deref()),
        country: ScopeFilter::parse(params.country.as_deref()),
        ..Default::default()
    };
    let mut rows = query.apply(&snapshot.rows);
    attach_usage(&mut rows, &usage);

    let groups = group_by_store(rows)
        .into_iter()
        .map(|group| {
            let page = group.page(params.shown);
            UsageGroup {
                rows: page.rows.to_vec(),
                remaining: page.remaining,
                store_id: group.store_id.clone(),
                store_name: group.store_name.clone(),
                total_uses: group.total_uses,
            }
        })
        .collect();

    Ok(Json(groups))
}

/// GET /api/v1/admin/stats
async fn catalog_stats(
    _admin: AdminToken,
    State(state): State<AppState>,
) -> Result<Json<CatalogStats>> {
    let snapshot = state.snapshot()?;
    Ok(Json(CatalogStats::compute(&snapshot)))
}

/// Refresh response: feed state after the reload
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub catalog: &'static str,
}

/// POST /api/v1/admin/catalog/refresh
///
/// Synchronous full reload; the retry path for a failed snapshot.
async fn refresh_catalog(
    _admin: AdminToken,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<RefreshResponse>)> {
    state.catalog.refresh_now().await?;

    let catalog = match state.catalog.state() {
        wafr_catalog::CatalogState::Ready(_) => "ready",
        wafr_catalog::CatalogState::Loading => "loading",
        wafr_catalog::CatalogState::Failed { .. } => "failed",
    };
    Ok((StatusCode::OK, Json(RefreshResponse { catalog })))
}
