//! Catalog feed configuration

use std::time::Duration;

use serde::Deserialize;

/// Catalog section
///
/// # Example
///
/// ```toml
/// [catalog]
/// refresh_debounce_ms = 250
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// How long to coalesce change-feed bursts before reloading
    /// Default: 250
    pub refresh_debounce_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            refresh_debounce_ms: 250,
        }
    }
}

impl CatalogConfig {
    /// The debounce window as a `Duration`
    pub fn refresh_debounce(&self) -> Duration {
        Duration::from_millis(self.refresh_debounce_ms)
    }
}
