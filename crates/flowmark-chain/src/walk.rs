//! Cycle-safe chain traversal.
//!
//! [`Walk`] is the single place where a chain is followed link by link. It
//! records every visited id and stops as soon as a link is absent, dangles, or
//! leads to an id it has already seen, so it terminates on any input,
//! including malformed cycles that do not pass through the head.
//!
//! [`materialize`] turns a walk into the presentation sequence: the states in
//! forward order, a synthetic loop marker when a circular chain closes on its
//! head, and the checkbox branch last.

use std::collections::HashSet;

use flowmark_types::StateId;

use crate::chain::Chain;
use crate::node::StateNode;

/// Forward iterator over the reachable states of a chain.
#[derive(Debug)]
pub struct Walk<'a> {
    chain: &'a Chain,
    current: Option<StateId>,
    visited: HashSet<StateId>,
    revisited: Option<StateId>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(chain: &'a Chain) -> Self {
        Self {
            chain,
            current: Some(chain.head_id()),
            visited: HashSet::new(),
            revisited: None,
        }
    }

    /// The already-visited id that stopped the walk, if it stopped on a cycle.
    pub fn revisited(&self) -> Option<StateId> {
        self.revisited
    }

    /// Returns `true` once the walk has stopped by returning to the head.
    pub fn closed_on_head(&self) -> bool {
        self.revisited == Some(self.chain.head_id())
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a StateNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current.take()?;
        if !self.visited.insert(id) {
            self.revisited = Some(id);
            return None;
        }
        let node = self.chain.node(id)?;
        self.current = node.next;
        Some(node)
    }
}

/// One entry of a materialized chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainEntry<'a> {
    /// A real state, in forward order.
    State(&'a StateNode),
    /// Synthetic marker for the edge closing a circular chain. Carries the
    /// head it returns to; it is not a node of its own.
    LoopBack(&'a StateNode),
    /// The chain's checkbox branch, always last.
    Checkbox(&'a StateNode),
}

impl<'a> ChainEntry<'a> {
    /// The node this entry presents.
    pub fn node(&self) -> &'a StateNode {
        match self {
            Self::State(node) | Self::LoopBack(node) | Self::Checkbox(node) => node,
        }
    }

    /// Returns `true` for the synthetic loop marker.
    pub fn is_loop_marker(&self) -> bool {
        matches!(self, Self::LoopBack(_))
    }
}

/// Materialize a chain for presentation.
///
/// A head whose `next` is itself is the single-state circular case and
/// yields the head followed by a loop marker without further traversal.
pub fn materialize(chain: &Chain) -> Vec<ChainEntry<'_>> {
    let head = chain.head();
    let mut entries = Vec::new();

    if head.points_to(head.id) {
        entries.push(ChainEntry::State(head));
        entries.push(ChainEntry::LoopBack(head));
    } else {
        let mut walk = chain.walk();
        entries.extend(walk.by_ref().map(ChainEntry::State));
        if walk.closed_on_head() && head.circular {
            entries.push(ChainEntry::LoopBack(head));
        }
    }

    if let Some(branch) = head.checkbox_state() {
        entries.push(ChainEntry::Checkbox(branch));
    }
    entries
}
