//! Usage aggregation
//!
//! A commutative-monoid fold over the event stream: per row key, sum of
//! counting events, union of device ids, max of timestamps. Input order
//! never changes the result, and folding two event lists separately then
//! merging equals folding their concatenation.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::event::UsageEvent;
use crate::key::RowKey;

/// Aggregated usage for one code row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowUsage {
    /// Number of counting events (duplicates double-count by design)
    pub uses: u64,
    /// Devices seen for this row; events without a device id don't add here
    pub devices: HashSet<String>,
    /// Most recent event timestamp
    pub last_used_at: Option<DateTime<Utc>>,
}

impl RowUsage {
    /// Cardinality of the device set
    pub fn distinct_devices(&self) -> usize {
        self.devices.len()
    }

    fn absorb(&mut self, event: &UsageEvent) {
        self.uses += 1;
        if let Some(device) = &event.device_id {
            self.devices.insert(device.clone());
        }
        self.last_used_at = Some(match self.last_used_at {
            Some(prev) => prev.max(event.created_at),
            None => event.created_at,
        });
    }

    fn merge(&mut self, other: RowUsage) {
        self.uses += other.uses;
        self.devices.extend(other.devices);
        self.last_used_at = match (self.last_used_at, other.last_used_at) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }
}

/// Per-row usage, keyed by [`RowKey`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageMap {
    rows: HashMap<RowKey, RowUsage>,
}

impl UsageMap {
    /// Fold an event stream into a usage map
    ///
    /// Non-counting event kinds are ignored.
    pub fn aggregate<'a>(events: impl IntoIterator<Item = &'a UsageEvent>) -> Self {
        let mut map = Self::default();
        for event in events {
            map.absorb(event);
        }
        map
    }

    /// Fold a single event in
    pub fn absorb(&mut self, event: &UsageEvent) {
        if !event.kind.counts_toward_usage() {
            return;
        }
        self.rows.entry(RowKey::of(event)).or_default().absorb(event);
    }

    /// Merge another map in; equivalent to having folded both inputs
    pub fn merge(&mut self, other: UsageMap) {
        for (key, usage) in other.rows {
            self.rows.entry(key).or_default().merge(usage);
        }
    }

    /// Usage for one row, if any counting event was seen
    pub fn get(&self, key: &RowKey) -> Option<&RowUsage> {
        self.rows.get(key)
    }

    /// Total uses across all of a coupon's rows (base plus variants)
    pub fn coupon_total(&self, coupon_id: &str) -> u64 {
        self.rows
            .iter()
            .filter(|(key, _)| key.coupon_id() == coupon_id)
            .map(|(_, usage)| usage.uses)
            .sum()
    }

    /// Number of rows with any usage
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over all rows
    pub fn iter(&self) -> impl Iterator<Item = (&RowKey, &RowUsage)> {
        self.rows.iter()
    }
}
