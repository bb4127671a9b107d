//! Usage events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the user did with a code
///
/// Unknown kinds round-trip untouched so that old readers never drop events
/// written by newer apps; they just don't count toward usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Code copied to the clipboard
    Copy,
    /// Code copied and the affiliate link followed
    CopyAndShop,
    /// Any other event kind, preserved verbatim
    #[serde(untagged)]
    Other(String),
}

impl EventKind {
    /// Only copy and copy_and_shop count toward usage statistics
    pub fn counts_toward_usage(&self) -> bool {
        matches!(self, Self::Copy | Self::CopyAndShop)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Copy => "copy",
            Self::CopyAndShop => "copy_and_shop",
            Self::Other(s) => s,
        }
    }
}

/// One discrete usage event, appended per user action
///
/// Append-only: nothing in the user-facing flow updates or deletes these.
/// `variant_id` absent means the event belongs to the coupon's base code.
/// `device_id` absent means the event does not contribute to distinct-device
/// cardinality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    /// Coupon the code belongs to
    pub coupon_id: String,
    /// Variant the code belongs to; absent means the base code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Denormalized from the coupon at append time
    #[serde(default)]
    pub store_id: String,
    /// Denormalized from the coupon at append time
    #[serde(default)]
    pub country_id: String,
    /// Denormalized from the coupon at append time
    #[serde(default)]
    pub category_id: String,
    /// Acting device, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// What happened
    #[serde(rename = "eventType")]
    pub kind: EventKind,
    /// When it happened
    pub created_at: DateTime<Utc>,
}

impl UsageEvent {
    /// Create a base-code event
    pub fn new(coupon_id: impl Into<String>, kind: EventKind) -> Self {
        Self {
            coupon_id: coupon_id.into(),
            variant_id: None,
            store_id: String::new(),
            country_id: String::new(),
            category_id: String::new(),
            device_id: None,
            kind,
            created_at: Utc::now(),
        }
    }

    /// Scope the event to a variant
    pub fn with_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    /// Attribute the event to a device
    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(serde_json::to_string(&EventKind::Copy).unwrap(), "\"copy\"");
        assert_eq!(
            serde_json::to_string(&EventKind::CopyAndShop).unwrap(),
            "\"copy_and_shop\""
        );
    }

    #[test]
    fn test_unknown_kind_preserved() {
        let kind: EventKind = serde_json::from_str("\"impression\"").unwrap();
        assert_eq!(kind, EventKind::Other("impression".to_string()));
        assert!(!kind.counts_toward_usage());
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"impression\"");
    }

    #[test]
    fn test_usage_kinds() {
        assert!(EventKind::Copy.counts_toward_usage());
        assert!(EventKind::CopyAndShop.counts_toward_usage());
    }
}
