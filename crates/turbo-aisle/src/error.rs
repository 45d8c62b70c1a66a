//! Engine error types.
//!
//! Malformed catalog attributes, invalid mutation arguments, and corrupt
//! stored carts are never errors; they degrade to defaults or no-ops.
//! Only persistence writes and configuration loading can fail.

use thiserror::Error;
use turbo_cache::CacheError;

/// Errors that can occur in engine operations.
#[derive(Error, Debug)]
pub enum AisleError {
    /// Durable storage rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(#[from] CacheError),

    /// A whole document (catalog or config) failed to parse.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration file could not be used.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for AisleError {
    fn from(e: serde_json::Error) -> Self {
        AisleError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for AisleError {
    fn from(e: toml::de::Error) -> Self {
        AisleError::ConfigError(e.to_string())
    }
}
