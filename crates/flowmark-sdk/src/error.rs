use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("no workflow marker at {0}")]
    NoMarker(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("chain error: {0}")]
    Chain(#[from] flowmark_chain::ChainError),

    #[error("store error: {0}")]
    Store(#[from] flowmark_store::StoreError),

    #[error("marker host error: {0}")]
    Ref(#[from] flowmark_refs::RefError),
}

pub type SdkResult<T> = Result<T, SdkError>;
