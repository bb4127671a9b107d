//! Wafr entity model
//!
//! Typed records for every backend collection, decoded from loosely-shaped
//! JSON documents at the boundary.
//!
//! # Overview
//!
//! The backend stores JSON documents with camelCase keys and no schema
//! enforcement. This crate is the single place where those documents become
//! strict Rust types:
//!
//! - **Decode**: one [`Entity::decode`] per collection. Missing optional
//!   fields take defaults, unknown fields are ignored, malformed timestamps
//!   degrade instead of failing the whole document.
//! - **Validate**: write-time checks ([`Entity::validate`]) with
//!   field-scoped errors, run before anything reaches the store.
//! - **Display fallbacks**: helpers for rendering records with blank names
//!   or missing logos ([`display_or_dash`], [`UNKNOWN_STORE`]).
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use wafr_model::{Country, Entity};
//!
//! let doc = json!({ "nameAr": "السعودية", "nameEn": "Saudi Arabia", "flagEmoji": "🇸🇦" });
//! let country = Country::decode("c-1", &doc).unwrap();
//! assert_eq!(country.id, "c-1");
//! assert!(country.is_active); // defaults to active
//! ```

mod category;
mod country;
mod coupon;
mod de;
mod display;
mod error;
mod lead;
mod notification;
mod report;
mod request;
mod settings;
mod store;

#[cfg(test)]
mod decode_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use category::Category;
pub use country::Country;
pub use coupon::{Coupon, Variant};
pub use display::{NAME_FALLBACK, UNKNOWN_STORE, display_or_dash, is_blank};
pub use error::{ModelError, Result};
pub use lead::Lead;
pub use notification::Notification;
pub use report::Report;
pub use request::{RequestStatus, StoreRequest};
pub use settings::{AppSettings, Banner};
pub use store::Store;

/// A typed record stored in a backend collection.
///
/// Decoding is tolerant by design: the documents were written by multiple
/// app versions and by hand, so absence of optional fields is never an
/// error. Validation is strict by design: it runs on the write path, where
/// rejecting bad data is cheap.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Backend collection this entity lives in.
    const COLLECTION: &'static str;

    /// The document id (the collection key, not part of the stored body).
    fn id(&self) -> &str;

    /// Decode a raw document into a typed record.
    ///
    /// The id comes from the collection key and is injected into the
    /// document before deserialization, overriding any stale `id` field in
    /// the body.
    fn decode(id: &str, data: &Value) -> Result<Self> {
        let mut doc = match data {
            Value::Object(map) => map.clone(),
            _ => {
                return Err(ModelError::decode(
                    Self::COLLECTION,
                    "document body is not an object",
                ));
            }
        };
        doc.insert("id".to_string(), Value::String(id.to_string()));
        serde_json::from_value(Value::Object(doc))
            .map_err(|e| ModelError::decode(Self::COLLECTION, e.to_string()))
    }

    /// Validate the record before it is written.
    ///
    /// Returns the first field-scoped problem found.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Whether the record is live. Soft-deactivated records return false;
    /// entities without a lifecycle flag are always live.
    fn active(&self) -> bool {
        true
    }
}
