//! Store request repository and review lifecycle
//!
//! Requests move `pending -> approved` or `pending -> rejected`, and stay
//! there. Approval creates exactly one store and notifies the requesting
//! device; rejection only stamps the reply and notifies.

use chrono::Utc;
use serde_json::Value;
use tracing::info;
use wafr_model::{Entity, Notification, RequestStatus, Store, StoreRequest};

use crate::error::{Result, StoreError};
use crate::plane::{Collection, DataPlane};
use crate::repos::text_column;

/// Store fields an admin fills in when approving a request
#[derive(Debug, Clone)]
pub struct NewStoreDetails {
    pub name_ar: String,
    pub name_en: String,
    pub logo_url: String,
    pub website_url: String,
}

/// Store request repository
pub struct StoreRequestRepo<'a> {
    plane: &'a DataPlane,
}

impl<'a> StoreRequestRepo<'a> {
    pub(crate) fn new(plane: &'a DataPlane) -> Self {
        Self { plane }
    }

    /// File a new request
    pub async fn create(&self, request: &StoreRequest) -> Result<()> {
        request.validate()?;
        self.write(request, false).await?;
        Ok(())
    }

    /// Get a request by id
    pub async fn get(&self, id: &str) -> Result<Option<StoreRequest>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query("SELECT id, data FROM store_requests WHERE id = ?1", [id])
            .await?;

        match rows.next().await? {
            Some(row) => {
                let id = text_column(&row, 0)?;
                Ok(Some(decode(&id, &text_column(&row, 1)?)?))
            }
            None => Ok(None),
        }
    }

    /// All requests, optionally filtered by status, newest first
    pub async fn list(&self, status: Option<RequestStatus>) -> Result<Vec<StoreRequest>> {
        let conn = self.plane.db().connect()?;
        let mut rows = match status {
            Some(status) => {
                conn.query(
                    "SELECT id, data FROM store_requests WHERE status = ?1 ORDER BY created_at DESC",
                    [status.as_str()],
                )
                .await?
            }
            None => {
                conn.query(
                    "SELECT id, data FROM store_requests ORDER BY created_at DESC",
                    (),
                )
                .await?
            }
        };

        let mut requests = Vec::new();
        while let Some(row) = rows.next().await? {
            let id = text_column(&row, 0)?;
            requests.push(decode(&id, &text_column(&row, 1)?)?);
        }
        Ok(requests)
    }

    /// Requests filed by one device, newest first
    pub async fn list_for_device(&self, device_id: &str) -> Result<Vec<StoreRequest>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query(
                "SELECT id, data FROM store_requests WHERE device_id = ?1 ORDER BY created_at DESC",
                [device_id],
            )
            .await?;

        let mut requests = Vec::new();
        while let Some(row) = rows.next().await? {
            let id = text_column(&row, 0)?;
            requests.push(decode(&id, &text_column(&row, 1)?)?);
        }
        Ok(requests)
    }

    /// Approve a pending request
    ///
    /// Creates exactly one store, stamps the request terminal, and writes
    /// an approval notification to the requesting device.
    pub async fn approve(
        &self,
        id: &str,
        details: NewStoreDetails,
        reviewed_by: impl Into<String>,
    ) -> Result<(StoreRequest, Store)> {
        let mut request = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found("store request", id))?;
        if !request.is_pending() {
            return Err(StoreError::invalid_transition(id, request.status.as_str()));
        }

        let mut store = Store::new(details.name_ar, details.name_en, &request.country_id);
        store.logo_url = details.logo_url;
        store.website_url = details.website_url;
        self.plane.stores().put(&store).await?;

        request.status = RequestStatus::Approved;
        request.store_id = Some(store.id.clone());
        request.reviewed_at = Some(Utc::now());
        request.reviewed_by = Some(reviewed_by.into());
        self.write(&request, true).await?;

        let mut note = Notification::new(
            &request.device_id,
            "تمت إضافة المتجر",
            format!("تمت الموافقة على طلبك: {}", request.store_name),
            "store_request",
        );
        note.related_id = Some(request.id.clone());
        self.plane.notifications().create(&note).await?;

        info!(request_id = id, store_id = %store.id, "store request approved");
        Ok((request, store))
    }

    /// Reject a pending request
    ///
    /// Never creates a store; stamps the reply and notifies the device.
    pub async fn reject(
        &self,
        id: &str,
        admin_reply: impl Into<String>,
        reviewed_by: impl Into<String>,
    ) -> Result<StoreRequest> {
        let mut request = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found("store request", id))?;
        if !request.is_pending() {
            return Err(StoreError::invalid_transition(id, request.status.as_str()));
        }

        let reply = admin_reply.into();
        request.status = RequestStatus::Rejected;
        request.admin_reply = Some(reply.clone());
        request.reviewed_at = Some(Utc::now());
        request.reviewed_by = Some(reviewed_by.into());
        self.write(&request, true).await?;

        let mut note = Notification::new(
            &request.device_id,
            "بخصوص طلبك",
            reply,
            "store_request",
        );
        note.related_id = Some(request.id.clone());
        self.plane.notifications().create(&note).await?;

        info!(request_id = id, "store request rejected");
        Ok(request)
    }

    async fn write(&self, request: &StoreRequest, replace: bool) -> Result<()> {
        let data = serde_json::to_string(request)?;
        let created_at = request.created_at.to_rfc3339();
        let conn = self.plane.db().connect()?;

        let params = [
            request.id.as_str(),
            request.device_id.as_str(),
            request.status.as_str(),
            created_at.as_str(),
            data.as_str(),
        ];
        let insert = "INSERT INTO store_requests (id, device_id, status, created_at, data) \
                      VALUES (?1, ?2, ?3, ?4, ?5)";

        if replace {
            let updated = conn
                .execute(
                    "UPDATE store_requests SET device_id = ?2, status = ?3, created_at = ?4, \
                     data = ?5 WHERE id = ?1",
                    params,
                )
                .await?;
            if updated == 0 {
                conn.execute(insert, params).await?;
            }
        } else {
            conn.execute(insert, params).await?;
        }

        self.plane.publish(Collection::StoreRequests, &request.id);
        Ok(())
    }
}

fn decode(id: &str, data: &str) -> Result<StoreRequest> {
    let value: Value = serde_json::from_str(data)?;
    Ok(StoreRequest::decode(id, &value)?)
}
