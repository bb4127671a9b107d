//! Wafr device-side state
//!
//! Everything the app keeps on the device itself: identity, language,
//! country selection, favorites, and the onboarding marker. One JSON file,
//! typed accessors, atomic writes. Losing the file only re-runs onboarding;
//! nothing here is the source of truth for anything server-side.

mod error;
mod vault;

#[cfg(test)]
mod vault_test;

pub use error::{DeviceError, Result};
pub use vault::{DeviceVault, Language, LeadMarker};
