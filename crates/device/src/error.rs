//! Device state error types

use thiserror::Error;

/// Errors from the device vault
#[derive(Debug, Error)]
pub enum DeviceError {
    /// State file could not be written
    #[error("state file i/o: {0}")]
    Io(#[from] std::io::Error),

    /// State could not be serialized
    #[error("state serialization: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for device state operations
pub type Result<T> = std::result::Result<T, DeviceError>;
