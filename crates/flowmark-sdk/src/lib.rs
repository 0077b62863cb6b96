//! High-level SDK for Flowmark.
//!
//! A [`Session`] owns one workflow forest and the store it came from. Every
//! mutation is applied to the in-memory forest first and persisted once the
//! forest is consistent again. Markers found in host text are resolved
//! against the session's forest and moved along their chains by the
//! transition helpers.

pub mod config;
pub mod error;
pub mod resolution;
pub mod session;
pub mod transition;

pub use config::SessionConfig;
pub use error::{SdkError, SdkResult};
pub use resolution::{resolve_marker, Resolved, UNKNOWN_COLOR, UNKNOWN_LABEL};
pub use session::Session;
pub use transition::{advance, toggle_checkbox};

// Re-export key types
pub use flowmark_chain::{ChainEntry, ChainForest, DeleteOutcome, StateNode, StatePatch};
pub use flowmark_refs::{MarkerHost, MarkerRef};
pub use flowmark_types::{Color, StateId};
