//! Cache Error Module
//!
//! Errors raised by cache store backends and the cache-aside helper.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The cache store could not be reached
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),

    /// The cache store rejected or failed a command
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),

    /// A cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// == Result Type Alias ==
/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
