//! Error types for the CornuScore service.

use cornuscore_core::{ConfigError, StoreError};
use thiserror::Error;

/// Common error type for service and CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Match configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Profile store error
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Rejected input
    #[error("invalid input: {0}")]
    Validation(String),
}

/// Result type alias using the CornuScore Error.
pub type Result<T> = std::result::Result<T, Error>;
