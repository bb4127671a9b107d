//! Relation resolution
//!
//! Joins a coupon to its store/category/country by id and copies the
//! display fields down. A missing relation is never fatal: the row renders
//! with fallback text and a warning goes to the log.

use tracing::warn;
use wafr_model::{Coupon, NAME_FALLBACK, UNKNOWN_STORE};

use crate::index::EntityIndexes;

/// A coupon with its relations denormalized for display
#[derive(Debug, Clone)]
pub struct DisplayCoupon {
    pub coupon: Coupon,
    /// Resolved store name, or the unknown-store fallback
    pub store_name: String,
    /// Resolved store logo URL, empty when missing (placeholder glyph)
    pub store_logo: String,
    /// Resolved category name, or the dash fallback
    pub category_name: String,
    /// Resolved country name, or the dash fallback
    pub country_name: String,
}

/// Resolve a coupon's relations against the snapshot indexes
pub fn resolve(coupon: &Coupon, indexes: &EntityIndexes) -> DisplayCoupon {
    let (store_name, store_logo) = match indexes.store(&coupon.store_id) {
        Some(store) => (
            store.display_name_ar().to_string(),
            store.logo_url.clone(),
        ),
        None => {
            warn!(
                coupon_id = %coupon.id,
                store_id = %coupon.store_id,
                "coupon references a missing store"
            );
            (UNKNOWN_STORE.to_string(), String::new())
        }
    };

    let category_name = match indexes.category(&coupon.category_id) {
        Some(category) => category.display_name_ar().to_string(),
        None => {
            warn!(
                coupon_id = %coupon.id,
                category_id = %coupon.category_id,
                "coupon references a missing category"
            );
            NAME_FALLBACK.to_string()
        }
    };

    let country_name = match indexes.country(&coupon.country_id) {
        Some(country) => country.display_name_ar().to_string(),
        None => NAME_FALLBACK.to_string(),
    };

    DisplayCoupon {
        coupon: coupon.clone(),
        store_name,
        store_logo,
        category_name,
        country_name,
    }
}
