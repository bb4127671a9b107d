//! CLI commands

pub mod seed;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use wafr_config::Config;

/// Default config path checked when none is given
pub const DEFAULT_CONFIG_PATH: &str = "configs/wafr.toml";

/// Load config from the given path, the default path, or defaults
///
/// An explicitly named file must exist; the default path is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Config::from_file(default)
                    .with_context(|| format!("loading config from {}", default.display()))
            } else {
                Ok(Config::default())
            }
        }
    }
}
