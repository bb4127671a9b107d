//! HTTP server configuration

use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Server section
///
/// # Example
///
/// ```toml
/// [server]
/// bind = "0.0.0.0:8080"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind
    /// Default: 127.0.0.1:8080
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ServerConfig {
    /// The bind address, parsed
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::invalid_value("server", "bind", "not a socket address"))
    }
}
