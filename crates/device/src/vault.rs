//! The device vault
//!
//! A single JSON file behind a mutex. Every mutation rewrites the whole
//! file through a temp-and-rename so a crash mid-write leaves either the
//! old state or the new one, never a torn file.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// App display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Arabic, the default
    #[default]
    Ar,
    En,
}

/// Proof that onboarding ran on this device
///
/// The submitted flag is this marker's presence; there is no separate
/// boolean to drift out of sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadMarker {
    pub lead_id: String,
    pub submitted_at: DateTime<Utc>,
    pub app_version: String,
}

/// The persisted shape
///
/// Unknown fields from newer app versions are dropped on load, which is
/// acceptable for reconstructible state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VaultState {
    device_id: String,
    language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_country: Option<String>,
    favorites: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lead_marker: Option<LeadMarker>,
}

/// JSON-file-backed device state with typed accessors
pub struct DeviceVault {
    path: Option<PathBuf>,
    state: Mutex<VaultState>,
}

impl DeviceVault {
    /// Open the vault at `path`, starting empty when the file is missing
    /// or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = load_state(&path);
        Self {
            path: Some(path),
            state: Mutex::new(state),
        }
    }

    /// An unpersisted vault for tests
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Mutex::new(VaultState::default()),
        }
    }

    /// The device's stable identifier, generated on first access
    pub fn device_id(&self) -> Result<String> {
        let mut state = self.state.lock();
        if state.device_id.is_empty() {
            state.device_id = uuid::Uuid::new_v4().to_string();
            self.persist(&state)?;
        }
        Ok(state.device_id.clone())
    }

    pub fn language(&self) -> Language {
        self.state.lock().language
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        let mut state = self.state.lock();
        state.language = language;
        self.persist(&state)
    }

    pub fn selected_country(&self) -> Option<String> {
        self.state.lock().selected_country.clone()
    }

    pub fn set_selected_country(&self, country_id: Option<String>) -> Result<()> {
        let mut state = self.state.lock();
        state.selected_country = country_id;
        self.persist(&state)
    }

    /// Favorited coupon ids, sorted
    pub fn favorites(&self) -> Vec<String> {
        self.state.lock().favorites.iter().cloned().collect()
    }

    pub fn is_favorite(&self, coupon_id: &str) -> bool {
        self.state.lock().favorites.contains(coupon_id)
    }

    /// Flip a coupon's favorite bit; returns the new value
    pub fn toggle_favorite(&self, coupon_id: &str) -> Result<bool> {
        let mut state = self.state.lock();
        let now_favorite = if state.favorites.remove(coupon_id) {
            false
        } else {
            state.favorites.insert(coupon_id.to_string());
            true
        };
        self.persist(&state)?;
        Ok(now_favorite)
    }

    pub fn lead_marker(&self) -> Option<LeadMarker> {
        self.state.lock().lead_marker.clone()
    }

    /// Whether onboarding already ran here
    pub fn has_submitted_lead(&self) -> bool {
        self.state.lock().lead_marker.is_some()
    }

    pub fn set_lead_marker(&self, marker: LeadMarker) -> Result<()> {
        let mut state = self.state.lock();
        state.lead_marker = Some(marker);
        self.persist(&state)
    }

    fn persist(&self, state: &VaultState) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(state)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Load state from disk, treating anything unreadable as empty
fn load_state(path: &Path) -> VaultState {
    if !path.exists() {
        return VaultState::default();
    }
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "corrupt device state, starting empty");
                VaultState::default()
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unreadable device state, starting empty");
            VaultState::default()
        }
    }
}
