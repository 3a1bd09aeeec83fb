//! Core error types for futurefeed-core.
//!
//! Provider-side failures never appear here: the provider boundary absorbs
//! them and substitutes fallback content. These errors cover the ambient
//! concerns (configuration, credentials, serialization, IO), none of which
//! are fatal to the session.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for futurefeed-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Credential-store errors
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to prepare the data directory
    #[error("Failed to prepare data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },
}

/// Credential-store errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The OS keyring rejected the operation
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
