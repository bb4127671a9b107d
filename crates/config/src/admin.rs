//! Admin surface configuration

use serde::Deserialize;

/// Admin section
///
/// The admin API stays disabled until a token is configured.
///
/// # Example
///
/// ```toml
/// [admin]
/// token = "change-me"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Bearer token for the admin API
    /// Default: unset (admin surface disabled)
    pub token: Option<String>,
}

impl AdminConfig {
    /// Whether the admin surface is usable at all
    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }
}
