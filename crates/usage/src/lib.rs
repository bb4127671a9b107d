//! Wafr usage events and aggregation
//!
//! Every "copy" and "copy and shop" action appends a [`UsageEvent`]. This
//! crate folds that append-only stream into per-row usage counters.
//!
//! # Row keys
//!
//! The unit of statistics is a code row: a coupon's base code or one of its
//! variants, identified by the compound key `(coupon_id, variant_id-or-base)`
//! ([`RowKey`]). The same key joins rows to events everywhere downstream.
//!
//! # Aggregation
//!
//! [`UsageMap`] is a pure fold: count + distinct-device-set union + max
//! timestamp per key. It is order-independent and merges associatively, so
//! re-running over the same events always produces the same map. Duplicate
//! events double-count on purpose (the metric is a click count, not a
//! deduplicated reach figure).

mod aggregate;
mod event;
mod key;


pub use aggregate::{RowUsage, UsageMap};
pub use event::{EventKind, UsageEvent};
pub use key::RowKey;
