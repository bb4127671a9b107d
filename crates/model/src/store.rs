//! Store entity

use serde::{Deserialize, Serialize};

use crate::de;
use crate::display::{display_or_dash, is_blank};
use crate::error::{ModelError, Result};
use crate::Entity;

/// A merchant whose coupons the app lists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Unique identifier (UUID)
    pub id: String,
    /// Arabic display name
    #[serde(default)]
    pub name_ar: String,
    /// English display name
    #[serde(default)]
    pub name_en: String,
    /// Logo image URL; empty means render a placeholder glyph
    #[serde(default)]
    pub logo_url: String,
    /// Optional banner image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    /// Merchant website
    #[serde(default)]
    pub website_url: String,
    /// Country this store belongs to
    #[serde(default)]
    pub country_id: String,
    /// Soft-deactivation flag
    #[serde(default = "de::default_true")]
    pub is_active: bool,
}

impl Store {
    /// Create a new active store
    pub fn new(
        name_ar: impl Into<String>,
        name_en: impl Into<String>,
        country_id: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name_ar: name_ar.into(),
            name_en: name_en.into(),
            logo_url: String::new(),
            banner_url: None,
            website_url: String::new(),
            country_id: country_id.into(),
            is_active: true,
        }
    }

    /// Arabic name with blank fallback
    pub fn display_name_ar(&self) -> &str {
        display_or_dash(&self.name_ar)
    }

    /// Whether a logo image is available (false means placeholder glyph)
    pub fn has_logo(&self) -> bool {
        !is_blank(&self.logo_url)
    }
}

impl Entity for Store {
    const COLLECTION: &'static str = "stores";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<()> {
        if is_blank(&self.name_ar) && is_blank(&self.name_en) {
            return Err(ModelError::validation(
                "nameAr",
                "store needs a name in at least one language",
            ));
        }
        if is_blank(&self.country_id) {
            return Err(ModelError::validation("countryId", "must not be blank"));
        }
        Ok(())
    }

    fn active(&self) -> bool {
        self.is_active
    }
}
