//! Wafr configuration
//!
//! TOML-based configuration loading with sensible defaults. A missing or
//! empty file just works; only specify what you need to change.
//!
//! # Example
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//!
//! [store]
//! data_dir = "data"
//!
//! [admin]
//! token = "change-me"
//!
//! [log]
//! level = "info"
//! format = "console"
//!
//! [catalog]
//! refresh_debounce_ms = 250
//! ```

mod admin;
mod catalog;
mod error;
mod log;
mod server;
mod store;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use admin::AdminConfig;
pub use catalog::CatalogConfig;
pub use error::{ConfigError, Result};
pub use log::{LogConfig, LogFormat, LogLevel};
pub use server::ServerConfig;
pub use store::StoreConfig;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Backing store settings
    pub store: StoreConfig,

    /// Admin surface settings
    pub admin: AdminConfig,

    /// Logging configuration
    pub log: LogConfig,

    /// Catalog feed settings
    pub catalog: CatalogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
