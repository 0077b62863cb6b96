use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid state token: {0:?}")]
    InvalidToken(String),

    #[error("state token out of range: {0:?}")]
    TokenOutOfRange(String),
}
