//! Error types for forest persistence.

use thiserror::Error;

/// Errors that can occur while loading or saving a forest.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend is unusable (for example a poisoned lock).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
