//! Configuration validation
//!
//! Checks for:
//! - The bind address parses as a socket address
//! - A present admin token is non-blank (an unset token disables the
//!   admin surface; a blank one is a mistake)
//! - The catalog debounce window is non-zero

use crate::Config;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    config.server.bind_addr()?;

    if let Some(token) = &config.admin.token
        && token.trim().is_empty()
    {
        return Err(ConfigError::invalid_value(
            "admin",
            "token",
            "must not be blank; omit it to disable the admin surface",
        ));
    }

    if config.catalog.refresh_debounce_ms == 0 {
        return Err(ConfigError::invalid_value(
            "catalog",
            "refresh_debounce_ms",
            "must be greater than zero",
        ));
    }

    Ok(())
}
