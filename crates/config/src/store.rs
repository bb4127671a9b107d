//! Backing store configuration

use serde::Deserialize;

/// Store section
///
/// # Example
///
/// ```toml
/// [store]
/// data_dir = "data"
/// memory = false
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the database file
    /// Default: data
    pub data_dir: String,

    /// Keep everything in memory instead (nothing survives a restart)
    /// Default: false
    pub memory: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            memory: false,
        }
    }
}
