//! Lead entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de;
use crate::display::is_blank;
use crate::error::{ModelError, Result};
use crate::Entity;

/// A name-and-phone record captured once per device during onboarding
///
/// Device identity gates all non-onboarding routes; the lead is the record
/// behind that gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Unique identifier (UUID)
    pub id: String,
    /// Visitor's name
    #[serde(default)]
    pub name: String,
    /// Phone number in E.164 form
    #[serde(default)]
    pub phone: String,
    /// Dialing prefix selected during onboarding (e.g. "+966")
    #[serde(default)]
    pub country_code: String,
    /// ISO-2 country of the selected prefix
    #[serde(default)]
    pub country: String,
    /// Submitting device
    #[serde(default)]
    pub device_id: String,
    /// Submission timestamp
    #[serde(default = "Utc::now", deserialize_with = "de::datetime_or_now")]
    pub created_at: DateTime<Utc>,
}

impl Lead {
    /// Create a new lead
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            phone: phone.into(),
            country_code: String::new(),
            country: String::new(),
            device_id: device_id.into(),
            created_at: Utc::now(),
        }
    }
}

impl Entity for Lead {
    const COLLECTION: &'static str = "leads";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<()> {
        if is_blank(&self.name) {
            return Err(ModelError::validation("name", "must not be blank"));
        }
        if is_blank(&self.device_id) {
            return Err(ModelError::validation("deviceId", "must not be blank"));
        }
        validate_e164(&self.phone)
    }
}

/// E.164 shape check: a `+` followed by 8-15 digits
///
/// Full phone-number parsing (carrier rules, regional formats) is out of
/// scope; this catches the obviously malformed input before any write.
fn validate_e164(phone: &str) -> Result<()> {
    let Some(digits) = phone.strip_prefix('+') else {
        return Err(ModelError::validation("phone", "must start with '+'"));
    };
    let len = digits.len();
    if !(8..=15).contains(&len) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ModelError::validation(
            "phone",
            "must be 8-15 digits after '+'",
        ));
    }
    Ok(())
}
