//! Lenient deserialization helpers
//!
//! Timestamps in stored documents come from multiple writers; a malformed
//! stamp degrades to a sensible value instead of failing the document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

pub(crate) fn default_true() -> bool {
    true
}

/// Deserialize an RFC 3339 timestamp, falling back to now when absent or
/// malformed.
pub(crate) fn datetime_or_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now))
}

/// Deserialize an optional RFC 3339 timestamp; malformed input becomes None.
pub(crate) fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}
