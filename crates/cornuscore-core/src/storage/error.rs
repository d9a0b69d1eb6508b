//! Storage error types

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Profile with this ID already exists
    #[error("profile already exists: {0}")]
    AlreadyExists(String),

    /// Profile not found
    #[error("profile not found: {0}")]
    NotFound(String),

    /// Invalid profile data
    #[error("invalid profile data: {0}")]
    InvalidData(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
