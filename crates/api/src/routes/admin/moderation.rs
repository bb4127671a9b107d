//! Moderation endpoints
//!
//! Leads, code reports, and the store-request review queue.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use wafr_model::{Lead, Report, RequestStatus, Store, StoreRequest};
use wafr_store::NewStoreDetails;

use crate::error::Result;
use crate::extract::AdminToken;
use crate::state::AppState;

/// Reviewer stamp on approvals/rejections. The admin surface has one
/// shared token, so there is no finer identity to record.
const REVIEWER: &str = "admin";

/// Moderation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leads", get(list_leads))
        .route("/reports", get(list_reports))
        .route("/reports/{id}/resolve", post(resolve_report))
        .route("/reports/{id}", delete(delete_report))
        .route("/store-requests", get(list_requests))
        .route("/store-requests/{id}/approve", post(approve_request))
        .route("/store-requests/{id}/reject", post(reject_request))
}

/// GET /api/v1/admin/leads
async fn list_leads(_admin: AdminToken, State(state): State<AppState>) -> Result<Json<Vec<Lead>>> {
    Ok(Json(state.plane.leads().list_all().await?))
}

/// GET /api/v1/admin/reports
async fn list_reports(
    _admin: AdminToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<Report>>> {
    Ok(Json(state.plane.reports().list_all().await?))
}

/// POST /api/v1/admin/reports/{id}/resolve
async fn resolve_report(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Report>> {
    Ok(Json(state.plane.reports().resolve(&id).await?))
}

/// DELETE /api/v1/admin/reports/{id}
async fn delete_report(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.plane.reports().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
struct RequestListParams {
    /// pending, approved, or rejected; absent means all
    status: Option<String>,
}

/// GET /api/v1/admin/store-requests
async fn list_requests(
    _admin: AdminToken,
    State(state): State<AppState>,
    Query(params): Query<RequestListParams>,
) -> Result<Json<Vec<StoreRequest>>> {
    let status = params.status.as_deref().map(RequestStatus::parse);
    Ok(Json(state.plane.store_requests().list(status).await?))
}

/// Approve request body: the store to create
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveRequestBody {
    pub name_ar: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub website_url: String,
}

/// Approval response: the stamped request and the store it created
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalResponse {
    pub request: StoreRequest,
    pub store: Store,
}

/// POST /api/v1/admin/store-requests/{id}/approve
///
/// Creates exactly one store and stamps the request terminal. A request
/// already reviewed answers 409 `INVALID_TRANSITION`.
async fn approve_request(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ApproveRequestBody>,
) -> Result<Json<ApprovalResponse>> {
    let details = NewStoreDetails {
        name_ar: body.name_ar,
        name_en: body.name_en,
        logo_url: body.logo_url,
        website_url: body.website_url,
    };
    let (request, store) = state
        .plane
        .store_requests()
        .approve(&id, details, REVIEWER)
        .await?;
    Ok(Json(ApprovalResponse { request, store }))
}

/// Reject request body
#[derive(Debug, Deserialize)]
pub struct RejectRequestBody {
    /// Shown to the requesting device in its notification
    pub reply: String,
}

/// POST /api/v1/admin/store-requests/{id}/reject
async fn reject_request(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RejectRequestBody>,
) -> Result<Json<StoreRequest>> {
    let request = state
        .plane
        .store_requests()
        .reject(&id, body.reply, REVIEWER)
        .await?;
    Ok(Json(request))
}
