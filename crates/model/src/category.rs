//! Category entity

use serde::{Deserialize, Serialize};

use crate::de;
use crate::display::{display_or_dash, is_blank};
use crate::error::{ModelError, Result};
use crate::Entity;

/// A coupon category (fashion, electronics, food, ...)
///
/// `sort_order` drives display order, ascending; ties keep insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier (UUID)
    pub id: String,
    /// Arabic display name
    #[serde(default)]
    pub name_ar: String,
    /// English display name
    #[serde(default)]
    pub name_en: String,
    /// Icon name or emoji
    #[serde(default)]
    pub icon: String,
    /// Display order, ascending
    #[serde(default)]
    pub sort_order: i64,
    /// Soft-deactivation flag
    #[serde(default = "de::default_true")]
    pub is_active: bool,
}

impl Category {
    /// Create a new active category
    pub fn new(name_ar: impl Into<String>, name_en: impl Into<String>, sort_order: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name_ar: name_ar.into(),
            name_en: name_en.into(),
            icon: String::new(),
            sort_order,
            is_active: true,
        }
    }

    /// Arabic name with blank fallback
    pub fn display_name_ar(&self) -> &str {
        display_or_dash(&self.name_ar)
    }
}

impl Entity for Category {
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<()> {
        if is_blank(&self.name_ar) && is_blank(&self.name_en) {
            return Err(ModelError::validation(
                "nameAr",
                "category needs a name in at least one language",
            ));
        }
        Ok(())
    }

    fn active(&self) -> bool {
        self.is_active
    }
}
