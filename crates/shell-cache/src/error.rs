//! Cache error types.

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur when using a cache store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open or create a partition.
    #[error("failed to open partition {partition}: {reason}")]
    Open {
        /// Partition name.
        partition: String,
        /// What went wrong.
        reason: String,
    },

    /// Failed to serialize or deserialize a stored response.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::Storage(err.to_string())
    }
}
