//! Store request entity
//!
//! A user-submitted suggestion to add a new store. State machine:
//! `pending -> approved` (a Store is created, `store_id` stamped) or
//! `pending -> rejected` (`admin_reply` stamped). Terminal once reviewed;
//! there is no reopening path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de;
use crate::display::is_blank;
use crate::error::{ModelError, Result};
use crate::Entity;

/// A suggestion to add a store, subject to admin review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRequest {
    /// Unique identifier (UUID)
    pub id: String,
    /// Suggested store name
    #[serde(default)]
    pub store_name: String,
    /// Suggested store URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,
    /// Free-text notes from the requester
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Country the store would belong to
    #[serde(default)]
    pub country_id: String,
    /// Requesting device
    #[serde(default)]
    pub device_id: String,
    /// Review status
    #[serde(default)]
    pub status: RequestStatus,
    /// When the request was reviewed
    #[serde(default, deserialize_with = "de::opt_datetime")]
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Who reviewed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    /// Admin reply shown to the requester (rejections)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_reply: Option<String>,
    /// The store created by an approval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Submission timestamp
    #[serde(default = "Utc::now", deserialize_with = "de::datetime_or_now")]
    pub created_at: DateTime<Utc>,
}

impl StoreRequest {
    /// Create a new pending request
    pub fn new(
        store_name: impl Into<String>,
        country_id: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            store_name: store_name.into(),
            store_url: None,
            notes: None,
            country_id: country_id.into(),
            device_id: device_id.into(),
            status: RequestStatus::Pending,
            reviewed_at: None,
            reviewed_by: None,
            admin_reply: None,
            store_id: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the request is still awaiting review
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

impl Entity for StoreRequest {
    const COLLECTION: &'static str = "store_requests";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<()> {
        if is_blank(&self.store_name) {
            return Err(ModelError::validation("storeName", "must not be blank"));
        }
        if is_blank(&self.country_id) {
            return Err(ModelError::validation("countryId", "must not be blank"));
        }
        if is_blank(&self.device_id) {
            return Err(ModelError::validation("deviceId", "must not be blank"));
        }
        Ok(())
    }
}

/// Review status of a store request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a stored status; unknown input reads as pending rather than
    /// failing the document
    pub fn parse(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}
