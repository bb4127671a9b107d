//! Country entity

use serde::{Deserialize, Serialize};

use crate::de;
use crate::display::{display_or_dash, is_blank};
use crate::error::{ModelError, Result};
use crate::Entity;

/// A country the app operates in
///
/// Stores and coupons reference countries by id. Countries are
/// soft-deactivated via `is_active`; nothing checks outstanding references
/// before a deactivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Unique identifier (UUID)
    pub id: String,
    /// Arabic display name
    #[serde(default)]
    pub name_ar: String,
    /// English display name
    #[serde(default)]
    pub name_en: String,
    /// Flag emoji shown next to the name
    #[serde(default)]
    pub flag_emoji: String,
    /// Soft-deactivation flag
    #[serde(default = "de::default_true")]
    pub is_active: bool,
}

impl Country {
    /// Create a new active country
    pub fn new(name_ar: impl Into<String>, name_en: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name_ar: name_ar.into(),
            name_en: name_en.into(),
            flag_emoji: String::new(),
            is_active: true,
        }
    }

    /// Arabic name with blank fallback
    pub fn display_name_ar(&self) -> &str {
        display_or_dash(&self.name_ar)
    }
}

impl Entity for Country {
    const COLLECTION: &'static str = "countries";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<()> {
        if is_blank(&self.name_ar) && is_blank(&self.name_en) {
            return Err(ModelError::validation(
                "nameAr",
                "country needs a name in at least one language",
            ));
        }
        Ok(())
    }

    fn active(&self) -> bool {
        self.is_active
    }
}
