//! Error types for marker hosts.

use thiserror::Error;

/// Errors that can occur while reading or writing marked text.
#[derive(Debug, Error)]
pub enum RefError {
    /// The host has nothing at the requested location.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// The backend is unusable (for example a poisoned lock).
    #[error("host backend error: {0}")]
    Backend(String),

    /// I/O error during file-based operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for marker host operations.
pub type RefResult<T> = std::result::Result<T, RefError>;
