//! Coupon and variant entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de;
use crate::display::is_blank;
use crate::error::{ModelError, Result};
use crate::Entity;

/// A discount code for a store
///
/// A coupon carries one base code plus zero or more variants, each with its
/// own code/discount/link bundle. The unit of display and statistics is a
/// "code row": the base code or one variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Unique identifier (UUID)
    pub id: String,
    /// Arabic title
    #[serde(default)]
    pub title_ar: String,
    /// English title
    #[serde(default)]
    pub title_en: String,
    /// Arabic description, stored as HTML verbatim (sanitisation is the
    /// client's concern)
    #[serde(default)]
    pub description_ar: String,
    /// The base discount code
    #[serde(default)]
    pub code: String,
    /// Free-text discount label, may embed "NN%"
    #[serde(default)]
    pub discount_label: String,
    /// Store this coupon belongs to
    #[serde(default)]
    pub store_id: String,
    /// Category this coupon belongs to
    #[serde(default)]
    pub category_id: String,
    /// Country this coupon belongs to
    #[serde(default)]
    pub country_id: String,
    /// Affiliate link for "copy and shop"
    #[serde(default)]
    pub link_url: String,
    /// Optional banner image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    /// Optional expiry date
    #[serde(default, deserialize_with = "de::opt_datetime")]
    pub expiry_date: Option<DateTime<Utc>>,
    /// Terms and conditions lines
    #[serde(default)]
    pub terms: Vec<String>,
    /// Featured on the popular shelf
    #[serde(default)]
    pub is_popular: bool,
    /// Soft-deactivation flag
    #[serde(default = "de::default_true")]
    pub is_active: bool,
    /// Admin-maintained usage counter, distinct from live event-derived
    /// usage
    #[serde(default)]
    pub usage_count: u64,
    /// Creation timestamp
    #[serde(default = "Utc::now", deserialize_with = "de::datetime_or_now")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(default = "Utc::now", deserialize_with = "de::datetime_or_now")]
    pub updated_at: DateTime<Utc>,
    /// Audience-segmented alternate codes
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Coupon {
    /// Create a new active coupon with defaults
    pub fn new(
        title_ar: impl Into<String>,
        code: impl Into<String>,
        store_id: impl Into<String>,
        category_id: impl Into<String>,
        country_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title_ar: title_ar.into(),
            title_en: String::new(),
            description_ar: String::new(),
            code: code.into(),
            discount_label: String::new(),
            store_id: store_id.into(),
            category_id: category_id.into(),
            country_id: country_id.into(),
            link_url: String::new(),
            banner_url: None,
            expiry_date: None,
            terms: Vec::new(),
            is_popular: false,
            is_active: true,
            usage_count: 0,
            created_at: now,
            updated_at: now,
            variants: Vec::new(),
        }
    }

    /// The default variant, if any variants exist
    ///
    /// The variant flagged `is_default`, else the first by convention.
    /// Stored data predating the write-time uniqueness check may carry no
    /// flag at all; the convention covers it.
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.variants.first())
    }
}

impl Entity for Coupon {
    const COLLECTION: &'static str = "coupons";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<()> {
        if is_blank(&self.title_ar) && is_blank(&self.title_en) {
            return Err(ModelError::validation(
                "titleAr",
                "coupon needs a title in at least one language",
            ));
        }
        if is_blank(&self.code) {
            return Err(ModelError::validation("code", "must not be blank"));
        }
        if is_blank(&self.store_id) {
            return Err(ModelError::validation("storeId", "must not be blank"));
        }
        if is_blank(&self.category_id) {
            return Err(ModelError::validation("categoryId", "must not be blank"));
        }
        if is_blank(&self.country_id) {
            return Err(ModelError::validation("countryId", "must not be blank"));
        }
        let defaults = self.variants.iter().filter(|v| v.is_default).count();
        if defaults > 1 {
            return Err(ModelError::validation(
                "variants",
                "at most one variant may be the default",
            ));
        }
        for variant in &self.variants {
            if is_blank(&variant.code) {
                return Err(ModelError::validation(
                    "variants",
                    "variant code must not be blank",
                ));
            }
        }
        Ok(())
    }

    fn active(&self) -> bool {
        self.is_active
    }
}

/// An alternate code/discount/link bundle attached to a coupon
///
/// Typically audience-segmented (new vs. returning user). Embedded in the
/// coupon document, not a top-level entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Identifier, unique within the coupon
    #[serde(default)]
    pub id: String,
    /// Arabic audience label ("للمستخدمين الجدد", ...)
    #[serde(default)]
    pub label_ar: String,
    /// The variant's discount code
    #[serde(default)]
    pub code: String,
    /// Free-text discount label
    #[serde(default)]
    pub discount_label: String,
    /// Optional Arabic description overriding the coupon's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,
    /// Optional affiliate link overriding the coupon's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// Default-selection flag; at most one per coupon
    #[serde(default)]
    pub is_default: bool,
}

impl Variant {
    /// Create a new variant
    pub fn new(label_ar: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            label_ar: label_ar.into(),
            code: code.into(),
            discount_label: String::new(),
            description_ar: None,
            link_url: None,
            is_default: false,
        }
    }
}
