//! Resolving markers to states.
//!
//! A marker's token is tried first. If the marker has no token, or the token
//! does not name a state in the forest, the label is tried. A marker that
//! matches neither resolves to [`Resolved::Unknown`], which callers present
//! as the unknown-state sentinel.

use flowmark_chain::{ChainForest, StateNode};
use flowmark_refs::MarkerRef;
use flowmark_types::StateId;
use tracing::debug;

/// Default label of the unknown-state sentinel.
pub const UNKNOWN_LABEL: &str = "✕ Unknown State";

/// Default color of the unknown-state sentinel.
pub const UNKNOWN_COLOR: &str = "#bf3232";

/// How a marker was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The token named a live state.
    ById(&'a StateNode),
    /// The token was missing or stale; the label matched.
    ByLabel(&'a StateNode),
    /// Nothing matched.
    Unknown,
}

impl<'a> Resolved<'a> {
    /// The resolved state, if any.
    pub fn state(&self) -> Option<&'a StateNode> {
        match self {
            Self::ById(node) | Self::ByLabel(node) => Some(node),
            Self::Unknown => None,
        }
    }

    /// Returns `true` unless nothing matched.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Resolve `marker` against `forest`.
pub fn resolve_marker<'a>(forest: &'a ChainForest, marker: &MarkerRef) -> Resolved<'a> {
    let id = marker.state_id();
    if id != StateId::UNKNOWN {
        if let Some(node) = forest.resolve(id) {
            return Resolved::ById(node);
        }
        debug!(id = %id, label = %marker.label, "marker token is stale, trying label");
    }
    match forest.resolve_by_label(marker.label.trim()) {
        Some(node) => Resolved::ByLabel(node),
        None => Resolved::Unknown,
    }
}
