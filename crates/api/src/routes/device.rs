//! Device-scoped routes
//!
//! Writes and personal reads for the app: usage events, code reports,
//! onboarding leads, store requests, and notifications. Every endpoint
//! requires an `X-Device-Id` header.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use wafr_model::{Lead, Notification, Report, StoreRequest};
use wafr_usage::{EventKind, UsageEvent};

use crate::error::{ApiError, Result};
use crate::extract::DeviceId;
use crate::state::AppState;

/// Device surface routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(record_event))
        .route("/reports", post(file_report))
        .route("/leads", post(submit_lead))
        .route(
            "/store-requests",
            get(list_own_requests).post(submit_request),
        )
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", post(mark_notification_read))
}

// =============================================================================
// Usage events
// =============================================================================

/// Record event request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordEventRequest {
    pub coupon_id: String,
    pub variant_id: Option<String>,
    pub kind: EventKind,
}

/// Created resource response
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// POST /api/v1/events
///
/// Appends a usage event. Store, category, and country ids are stamped
/// from the coupon document server-side; the client only names the coupon
/// and the variant.
async fn record_event(
    device: DeviceId,
    State(state): State<AppState>,
    Json(body): Json<RecordEventRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let coupon = state
        .plane
        .coupons()
        .get(&body.coupon_id)
        .await?
        .ok_or_else(|| ApiError::not_found("coupon", &body.coupon_id))?;

    if let Some(variant_id) = &body.variant_id
        && !coupon.variants.iter().any(|v| &v.id == variant_id)
    {
        return Err(ApiError::validation(
            "variantId",
            format!("coupon has no variant '{}'", variant_id),
        ));
    }

    let mut event = UsageEvent::new(&coupon.id, body.kind).with_device(device.as_str());
    if let Some(variant_id) = body.variant_id {
        event = event.with_variant(variant_id);
    }
    event.store_id = coupon.store_id.clone();
    event.category_id = coupon.category_id.clone();
    event.country_id = coupon.country_id.clone();

    let id = state.plane.events().append(&event).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

// =============================================================================
// Reports
// =============================================================================

/// File report request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReportRequest {
    pub coupon_id: String,
    pub variant_id: Option<String>,
    /// The code as the user saw it, for triage
    pub code: String,
}

/// POST /api/v1/reports
async fn file_report(
    _device: DeviceId,
    State(state): State<AppState>,
    Json(body): Json<FileReportRequest>,
) -> Result<(StatusCode, Json<Report>)> {
    let mut report = Report::new(body.coupon_id, body.code);
    report.variant_id = body.variant_id;
    state.plane.reports().create(&report).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

// =============================================================================
// Leads
// =============================================================================

/// Submit lead request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeadRequest {
    pub name: String,
    /// E.164, e.g. "+96550001234"
    pub phone: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub country: String,
}

/// POST /api/v1/leads
///
/// Onboarding. One lead per device: a second submit answers 409
/// `LEAD_EXISTS`.
async fn submit_lead(
    device: DeviceId,
    State(state): State<AppState>,
    Json(body): Json<SubmitLeadRequest>,
) -> Result<(StatusCode, Json<Lead>)> {
    let mut lead = Lead::new(body.name, body.phone, device.as_str());
    lead.country_code = body.country_code;
    lead.country = body.country;
    state.plane.leads().create(&lead).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

// =============================================================================
// Store requests
// =============================================================================

/// Submit store request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStoreRequest {
    pub store_name: String,
    pub store_url: Option<String>,
    pub notes: Option<String>,
    pub country_id: String,
}

/// POST /api/v1/store-requests
async fn submit_request(
    device: DeviceId,
    State(state): State<AppState>,
    Json(body): Json<SubmitStoreRequest>,
) -> Result<(StatusCode, Json<StoreRequest>)> {
    let mut request = StoreRequest::new(body.store_name, body.country_id, device.as_str());
    request.store_url = body.store_url;
    request.notes = body.notes;
    state.plane.store_requests().create(&request).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/store-requests
///
/// The calling device's own requests, newest first.
async fn list_own_requests(
    device: DeviceId,
    State(state): State<AppState>,
) -> Result<Json<Vec<StoreRequest>>> {
    let requests = state
        .plane
        .store_requests()
        .list_for_device(device.as_str())
        .await?;
    Ok(Json(requests))
}

// =============================================================================
// Notifications
// =============================================================================

/// GET /api/v1/notifications
async fn list_notifications(
    device: DeviceId,
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>> {
    let notes = state
        .plane
        .notifications()
        .list_for_device(device.as_str())
        .await?;
    Ok(Json(notes))
}

/// POST /api/v1/notifications/{id}/read
///
/// Another device's notification answers 404, same as a missing one;
/// existence is not revealed across devices.
async fn mark_notification_read(
    device: DeviceId,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notification>> {
    let note = state
        .plane
        .notifications()
        .get(&id)
        .await?
        .filter(|n| n.device_id == device.as_str())
        .ok_or_else(|| ApiError::not_found("notification", &id))?;

    let updated = state.plane.notifications().mark_read(&note.id).await?;
    Ok(Json(updated))
}
