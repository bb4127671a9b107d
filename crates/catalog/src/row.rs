//! Code rows and variant expansion
//!
//! A coupon with `N` variants expands to exactly `N + 1` rows: the base
//! code first, then the variants in their stored order. Rows carry every
//! display field downstream consumers need, so nothing after expansion
//! re-joins.

use chrono::{DateTime, Utc};
use serde::Serialize;
use wafr_usage::{RowKey, UsageMap};

use crate::resolve::DisplayCoupon;

/// Whether a row is the coupon's base code or one of its variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Base,
    Variant,
}

/// One displayable/countable code row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRow {
    /// Compound row identity, rendered `{coupon}::{variant-or-base}`
    #[serde(rename = "key")]
    pub key_text: String,
    #[serde(skip)]
    pub key: RowKey,
    pub kind: RowKind,
    pub coupon_id: String,
    /// Present on variant rows only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Row title: the coupon title, suffixed with the variant label
    pub title: String,
    pub code: String,
    pub discount_label: String,
    pub description: String,
    pub link_url: String,
    pub store_id: String,
    pub store_name: String,
    pub store_logo: String,
    pub category_id: String,
    pub category_name: String,
    pub country_id: String,
    pub country_name: String,
    pub is_popular: bool,
    pub created_at: DateTime<Utc>,
    /// Usage counter: the coupon's stored counter on the base row, zero on
    /// variant rows, until [`attach_usage`] overlays live counts
    pub uses: u64,
    /// Distinct devices seen, filled by [`attach_usage`]
    pub distinct_devices: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Expand a resolved coupon into its code rows, base first
pub fn expand(display: &DisplayCoupon) -> Vec<CodeRow> {
    let coupon = &display.coupon;
    let mut rows = Vec::with_capacity(coupon.variants.len() + 1);

    let base_key = RowKey::base(&coupon.id);
    rows.push(CodeRow {
        key_text: base_key.to_string(),
        key: base_key,
        kind: RowKind::Base,
        coupon_id: coupon.id.clone(),
        variant_id: None,
        title: coupon.title_ar.clone(),
        code: coupon.code.clone(),
        discount_label: coupon.discount_label.clone(),
        description: coupon.description_ar.clone(),
        link_url: coupon.link_url.clone(),
        store_id: coupon.store_id.clone(),
        store_name: display.store_name.clone(),
        store_logo: display.store_logo.clone(),
        category_id: coupon.category_id.clone(),
        category_name: display.category_name.clone(),
        country_id: coupon.country_id.clone(),
        country_name: display.country_name.clone(),
        is_popular: coupon.is_popular,
        created_at: coupon.created_at,
        uses: coupon.usage_count,
        distinct_devices: 0,
        last_used_at: None,
    });

    for (index, variant) in coupon.variants.iter().enumerate() {
        // A variant with a blank id still needs a stable key
        let variant_id = if variant.id.is_empty() {
            format!("v{}", index)
        } else {
            variant.id.clone()
        };
        let key = RowKey::variant(&coupon.id, &variant_id);

        let title = if variant.label_ar.is_empty() {
            coupon.title_ar.clone()
        } else {
            format!("{} — {}", coupon.title_ar, variant.label_ar)
        };

        rows.push(CodeRow {
            key_text: key.to_string(),
            key,
            kind: RowKind::Variant,
            coupon_id: coupon.id.clone(),
            variant_id: Some(variant_id),
            title,
            code: variant.code.clone(),
            // A variant inherits the coupon's label/link where it leaves
            // them unset
            discount_label: if variant.discount_label.is_empty() {
                coupon.discount_label.clone()
            } else {
                variant.discount_label.clone()
            },
            description: variant
                .description_ar
                .clone()
                .unwrap_or_else(|| coupon.description_ar.clone()),
            link_url: variant
                .link_url
                .clone()
                .unwrap_or_else(|| coupon.link_url.clone()),
            store_id: coupon.store_id.clone(),
            store_name: display.store_name.clone(),
            store_logo: display.store_logo.clone(),
            category_id: coupon.category_id.clone(),
            category_name: display.category_name.clone(),
            country_id: coupon.country_id.clone(),
            country_name: display.country_name.clone(),
            is_popular: coupon.is_popular,
            created_at: coupon.created_at,
            uses: 0,
            distinct_devices: 0,
            last_used_at: None,
        });
    }

    rows
}

/// Overlay live event-derived usage onto rows
///
/// Replaces the stored counters wholesale: a row with no events reads as
/// zero uses, regardless of the admin-entered count.
pub fn attach_usage(rows: &mut [CodeRow], usage: &UsageMap) {
    for row in rows {
        match usage.get(&row.key) {
            Some(row_usage) => {
                row.uses = row_usage.uses;
                row.distinct_devices = row_usage.distinct_devices() as u64;
                row.last_used_at = row_usage.last_used_at;
            }
            None => {
                row.uses = 0;
                row.distinct_devices = 0;
                row.last_used_at = None;
            }
        }
    }
}
