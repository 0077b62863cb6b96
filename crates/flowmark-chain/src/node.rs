//! The atomic unit of a workflow chain.
//!
//! A [`StateNode`] is a plain value. Its `next` link is an id resolved inside
//! the owning [`Chain`](crate::Chain), so copying a node never aliases another
//! chain's structure. Traversal compares nodes by id only; two nodes with the
//! same label and color are still distinct states.

use serde::{Deserialize, Serialize};

use flowmark_types::{Color, StateId};

/// One state of a workflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateNode {
    /// Unique within the owning forest. Negative for checkbox-branch states.
    pub id: StateId,
    /// Display keyword.
    pub label: String,
    /// Presentation color, never interpreted by the chain model.
    pub color: Color,
    /// Successor in forward traversal order.
    pub next: Option<StateId>,
    /// Whether the chain closes back on its head. Authoritative on the head;
    /// kept in sync on every other node by the mutation engine.
    pub circular: bool,
    /// Whether the chain offers a checkbox side transition.
    pub has_checkbox_branch: bool,
    /// The checkbox side state. Its own `next` is always `None`.
    pub checkbox_branch: Option<Box<StateNode>>,
}

impl StateNode {
    /// Create an unlinked state with no chain policy.
    pub fn new(id: StateId, label: impl Into<String>, color: impl Into<Color>) -> Self {
        Self {
            id,
            label: label.into(),
            color: color.into(),
            next: None,
            circular: false,
            has_checkbox_branch: false,
            checkbox_branch: None,
        }
    }

    /// Create a checkbox-branch leaf. The id should be negative.
    pub fn checkbox(id: StateId, label: impl Into<String>, color: impl Into<Color>) -> Self {
        Self::new(id, label, color)
    }

    /// Returns `true` if this node is a checkbox-branch state.
    pub fn is_checkbox(&self) -> bool {
        self.id.is_checkbox()
    }

    /// The checkbox branch offered from this node, if the policy is enabled.
    pub fn checkbox_state(&self) -> Option<&StateNode> {
        if self.has_checkbox_branch {
            self.checkbox_branch.as_deref()
        } else {
            None
        }
    }

    /// Returns `true` if `next` points at `id`.
    pub fn points_to(&self, id: StateId) -> bool {
        self.next == Some(id)
    }

    /// The reference token for this state.
    pub fn token(&self) -> String {
        self.id.to_token()
    }

    /// A one-line human-readable summary.
    pub fn summary(&self) -> String {
        match self.next {
            Some(next) => format!("{} [{}] -> {}", self.label, self.token(), next.to_token()),
            None => format!("{} [{}]", self.label, self.token()),
        }
    }
}
