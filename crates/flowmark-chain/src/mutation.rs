//! Pure chain-level edits.
//!
//! Every method here borrows the current chain and returns a new one; the
//! original is never touched. Structural edits that change chain-wide policy
//! rebuild the chain from a forward copy: fresh node values with the same ids,
//! linked in walk order, with the head's policy stamped on every node.
//!
//! A forward copy also notices a link back to the head that the head's flag
//! does not admit to, and normalizes it into an explicit circular flag.

use tracing::debug;

use flowmark_types::{Color, StateId};

use crate::chain::{Chain, ChainPolicy};
use crate::error::{ChainError, ChainResult};
use crate::node::StateNode;

/// Replacement fields for one state. Linkage cannot be changed this way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatePatch {
    /// The state to update.
    pub id: StateId,
    /// New label, if any.
    pub label: Option<String>,
    /// New color, if any.
    pub color: Option<Color>,
}

impl StatePatch {
    /// An empty patch for `id`.
    pub fn new(id: StateId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Set the replacement label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the replacement color.
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn apply(&self, node: &mut StateNode) -> ChainResult<()> {
        if let Some(label) = &self.label {
            node.label = validated_label(label)?;
        }
        if let Some(color) = &self.color {
            node.color = color.clone();
        }
        Ok(())
    }
}

impl From<&StateNode> for StatePatch {
    fn from(node: &StateNode) -> Self {
        Self {
            id: node.id,
            label: Some(node.label.clone()),
            color: Some(node.color.clone()),
        }
    }
}

/// Characters a marker body cannot carry inside a label.
const RESERVED_LABEL_CHARS: [char; 2] = [',', '}'];

/// Trim a label and reject it if nothing is left or if it could not be
/// read back out of a marker.
pub(crate) fn validated_label(label: &str) -> ChainResult<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(ChainError::InvalidInput("label must not be empty".into()));
    }
    if let Some(c) = trimmed.chars().find(|c| RESERVED_LABEL_CHARS.contains(c)) {
        return Err(ChainError::InvalidInput(format!("label must not contain '{c}'")));
    }
    Ok(trimmed.to_string())
}

/// Forward copy of a chain.
struct ForwardCopy {
    head: StateNode,
    rest: Vec<StateNode>,
    closes_on_head: bool,
}

impl ForwardCopy {
    fn of(chain: &Chain) -> Self {
        let head_id = chain.head_id();
        let mut walk = chain.walk();
        let head = walk.next().cloned().unwrap_or_else(|| chain.head().clone());
        let rest: Vec<StateNode> = walk.by_ref().cloned().collect();
        let closes_on_head = walk.closed_on_head() || head.points_to(head_id);
        Self {
            head,
            rest,
            closes_on_head,
        }
    }

    /// The source chain's policy, with an undeclared closing edge promoted
    /// to an explicit circular flag.
    fn normalized_policy(&self, source: &Chain) -> ChainPolicy {
        let mut policy = source.policy();
        if self.closes_on_head && !policy.circular {
            debug!(head = %source.head_id(), "normalizing undeclared cycle into circular flag");
            policy.circular = true;
        }
        policy
    }

    fn find_mut(&mut self, id: StateId) -> Option<&mut StateNode> {
        std::iter::once(&mut self.head)
            .chain(self.rest.iter_mut())
            .find(|node| node.id == id)
    }

    fn link(self, policy: &ChainPolicy) -> Chain {
        Chain::linked(self.head, self.rest, policy)
    }
}

impl Chain {
    /// A fully rebuilt copy: fresh links in walk order, policy normalized and
    /// stamped on every node.
    pub fn rebuilt(&self) -> Chain {
        let copy = ForwardCopy::of(self);
        let policy = copy.normalized_policy(self);
        copy.link(&policy)
    }

    /// Append `node` after the current tail.
    ///
    /// The new state inherits the head's policy. If the tail closed the loop
    /// back to the head, the new state takes over that closing edge, so the
    /// insertion happens before the loop closes rather than after it.
    pub fn with_appended(&self, mut node: StateNode) -> Chain {
        let head = self.head();
        let tail = self.tail();
        let tail_id = tail.id;

        ChainPolicy::of(head).apply_to(&mut node);
        node.next = tail.points_to(head.id).then_some(head.id);

        let mut chain = self.clone();
        if let Some(tail) = chain.node_mut(tail_id) {
            tail.next = Some(node.id);
        }
        debug!(head = %head.id, tail = %tail_id, state = %node.id, "appended state");
        chain.insert_node(node);
        chain
    }

    /// Rebuild the chain with circularity set to `circular`.
    pub fn with_circular(&self, circular: bool) -> Chain {
        let copy = ForwardCopy::of(self);
        let policy = ChainPolicy {
            circular,
            ..copy.normalized_policy(self)
        };
        copy.link(&policy)
    }

    /// Rebuild the chain with the checkbox branch set to `branch` (or
    /// cleared). The branch is stored as an unlinked leaf.
    pub fn with_checkbox_branch(&self, branch: Option<StateNode>) -> Chain {
        let copy = ForwardCopy::of(self);
        let mut policy = copy.normalized_policy(self);
        match branch {
            Some(mut leaf) => {
                ChainPolicy::default().apply_to(&mut leaf);
                leaf.next = None;
                policy.has_checkbox_branch = true;
                policy.checkbox_branch = Some(Box::new(leaf));
            }
            None => {
                policy.has_checkbox_branch = false;
                policy.checkbox_branch = None;
            }
        }
        copy.link(&policy)
    }

    /// Rebuild the chain with one state's label and color replaced.
    ///
    /// The patched state keeps its position; if the chain was circular the
    /// closing edge is re-established in the rebuilt chain. Patching the
    /// checkbox branch's id updates the branch on every node.
    pub fn with_state_updated(&self, patch: &StatePatch) -> ChainResult<Chain> {
        if let Some(branch) = self.checkbox_branch() {
            if branch.id == patch.id {
                let mut branch = branch.clone();
                patch.apply(&mut branch)?;
                return Ok(self.with_checkbox_branch(Some(branch)));
            }
        }

        let mut copy = ForwardCopy::of(self);
        let policy = copy.normalized_policy(self);
        let target = copy
            .find_mut(patch.id)
            .ok_or(ChainError::StateNotFound {
                chain: self.head_id(),
                state: patch.id,
            })?;
        patch.apply(target)?;
        Ok(copy.link(&policy))
    }

    /// Remove a non-head state, relinking its predecessor to its successor.
    ///
    /// Removing the state that closed a circular chain leaves the predecessor
    /// pointing at the head, so the chain stays circular with a shorter loop.
    /// Removing the only other state of a two-state circular chain leaves a
    /// circular single-state chain.
    pub fn without_state(&self, id: StateId) -> ChainResult<Chain> {
        if id == self.head_id() {
            return Err(ChainError::InvalidInput(
                "the head state is removed by deleting its chain".into(),
            ));
        }
        let not_found = || ChainError::StateNotFound {
            chain: self.head_id(),
            state: id,
        };
        let predecessor = self.predecessor_of(id).ok_or_else(not_found)?.id;
        let successor = self.node(id).ok_or_else(not_found)?.next;

        let mut chain = self.clone();
        if let Some(node) = chain.node_mut(predecessor) {
            node.next = successor;
        }
        chain.remove_node(id);
        debug!(head = %self.head_id(), state = %id, predecessor = %predecessor, "removed state");
        Ok(chain.rebuilt())
    }
}
