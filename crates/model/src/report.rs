//! Report entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de;
use crate::Entity;

/// A user report that a code did not work
///
/// Created append-only from the report-issue action; admins may resolve or
/// delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique identifier (UUID)
    pub id: String,
    /// Coupon the report is about
    #[serde(default)]
    pub coupon_id: String,
    /// The code as the user saw it
    #[serde(default)]
    pub code: String,
    /// Variant the code belonged to; absent means the base code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Submission timestamp
    #[serde(default = "Utc::now", deserialize_with = "de::datetime_or_now")]
    pub created_at: DateTime<Utc>,
    /// Set by an admin once handled
    #[serde(default)]
    pub is_resolved: bool,
}

impl Report {
    /// Create a new unresolved report
    pub fn new(coupon_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            coupon_id: coupon_id.into(),
            code: code.into(),
            variant_id: None,
            created_at: Utc::now(),
            is_resolved: false,
        }
    }
}

impl Entity for Report {
    const COLLECTION: &'static str = "reports";

    fn id(&self) -> &str {
        &self.id
    }
}
