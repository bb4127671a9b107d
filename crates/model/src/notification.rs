//! Notification entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de;
use crate::Entity;

/// A message addressed to one device
///
/// Created by admin-side workflows (store-request review and the like) and
/// consumed by the owning device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier (UUID)
    pub id: String,
    /// Addressed device
    #[serde(default)]
    pub device_id: String,
    /// Short title
    #[serde(default)]
    pub title: String,
    /// Body text
    #[serde(default)]
    pub message: String,
    /// Notification kind ("store_request", ...)
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Related entity id, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
    /// Read marker, set by the owning device
    #[serde(default)]
    pub is_read: bool,
    /// Creation timestamp
    #[serde(default = "Utc::now", deserialize_with = "de::datetime_or_now")]
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new unread notification for a device
    pub fn new(
        device_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            device_id: device_id.into(),
            title: title.into(),
            message: message.into(),
            kind: kind.into(),
            related_id: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

impl Entity for Notification {
    const COLLECTION: &'static str = "notifications";

    fn id(&self) -> &str {
        &self.id
    }
}
