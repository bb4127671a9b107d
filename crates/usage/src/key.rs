//! Row keys
//!
//! `(coupon_id, variant_id-or-base)` uniquely identifies a code row. The
//! rendered form is `{coupon_id}::{variant_id}` or `{coupon_id}::base`; it
//! is the join key between expanded rows and aggregated events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::UsageEvent;

/// Marker for the base-code segment of a row key
pub const BASE_SEGMENT: &str = "base";

/// Compound identity of a code row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowKey {
    coupon_id: String,
    /// None means the coupon's base code
    variant_id: Option<String>,
}

impl RowKey {
    /// Key for a coupon's base code
    pub fn base(coupon_id: impl Into<String>) -> Self {
        Self {
            coupon_id: coupon_id.into(),
            variant_id: None,
        }
    }

    /// Key for one of a coupon's variants
    pub fn variant(coupon_id: impl Into<String>, variant_id: impl Into<String>) -> Self {
        Self {
            coupon_id: coupon_id.into(),
            variant_id: Some(variant_id.into()),
        }
    }

    /// The key an event counts toward
    ///
    /// An absent or empty variant id belongs to the base code.
    pub fn of(event: &UsageEvent) -> Self {
        match event.variant_id.as_deref() {
            Some(vid) if !vid.is_empty() => Self::variant(&event.coupon_id, vid),
            _ => Self::base(&event.coupon_id),
        }
    }

    pub fn coupon_id(&self) -> &str {
        &self.coupon_id
    }

    pub fn variant_id(&self) -> Option<&str> {
        self.variant_id.as_deref()
    }

    /// Whether this key names a base code
    pub fn is_base(&self) -> bool {
        self.variant_id.is_none()
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant_id {
            Some(vid) => write!(f, "{}::{}", self.coupon_id, vid),
            None => write!(f, "{}::{}", self.coupon_id, BASE_SEGMENT),
        }
    }
}
