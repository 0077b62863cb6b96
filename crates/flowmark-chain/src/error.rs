//! Error types for chain operations.

use flowmark_types::StateId;

/// Errors that can occur while querying or editing chains.
///
/// Every variant is recoverable: a failed operation leaves the forest exactly
/// as it was before the call.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    /// Caller-supplied data was rejected (blank label, bad branch id).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No chain has the given head id.
    #[error("chain not found: {0}")]
    ChainNotFound(StateId),

    /// The state is not part of the named chain.
    #[error("state {state} not found in chain {chain}")]
    StateNotFound {
        /// Head id of the chain that was searched.
        chain: StateId,
        /// The missing state.
        state: StateId,
    },

    /// No chain in the forest contains the id.
    #[error("state not found: {0}")]
    NotFound(StateId),

    /// A defensive check failed (stale reference, colliding ids).
    #[error("inconsistent chain structure: {0}")]
    Inconsistent(String),
}

impl ChainError {
    /// Returns `true` for every "absent" flavour of error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ChainNotFound(_) | Self::StateNotFound { .. } | Self::NotFound(_)
        )
    }
}

/// Convenience alias for chain results.
pub type ChainResult<T> = Result<T, ChainError>;
