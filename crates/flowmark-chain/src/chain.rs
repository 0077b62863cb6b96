//! The [`Chain`] arena.
//!
//! A chain owns its nodes in a map keyed by id and remembers which id is the
//! head. Links are ids, so a chain may be circular (the tail points back at
//! the head) without any shared ownership.
//!
//! # Invariants
//!
//! - The head id is always present in the arena.
//! - Ids are unique within the chain, including the checkbox branch id.
//! - Nodes that are not reachable from the head are ignored by every query;
//!   they only survive until the next structural edit rebuilds the chain.

use std::collections::HashMap;

use tracing::warn;

use flowmark_types::StateId;

use crate::node::StateNode;
use crate::walk::Walk;

/// Chain-wide policy, carried by the head and mirrored on every node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainPolicy {
    /// Whether the tail links back to the head.
    pub circular: bool,
    /// Whether the checkbox side transition is offered.
    pub has_checkbox_branch: bool,
    /// The checkbox side state.
    pub checkbox_branch: Option<Box<StateNode>>,
}

impl ChainPolicy {
    /// The policy currently carried by `node`.
    pub fn of(node: &StateNode) -> Self {
        Self {
            circular: node.circular,
            has_checkbox_branch: node.has_checkbox_branch,
            checkbox_branch: node.checkbox_branch.clone(),
        }
    }

    /// Copy this policy onto `node`.
    pub fn apply_to(&self, node: &mut StateNode) {
        node.circular = self.circular;
        node.has_checkbox_branch = self.has_checkbox_branch;
        node.checkbox_branch = self.checkbox_branch.clone();
    }
}

/// One workflow: a head plus every node reachable from it.
#[derive(Clone, Debug)]
pub struct Chain {
    head: StateId,
    nodes: HashMap<StateId, StateNode>,
}

impl Chain {
    /// A chain holding a single, unlinked state.
    pub fn single(mut node: StateNode) -> Self {
        node.next = None;
        node.circular = false;
        let head = node.id;
        Self {
            head,
            nodes: HashMap::from([(head, node)]),
        }
    }

    /// Link `head` followed by `rest` in order and stamp `policy` on every
    /// node. When the policy is circular the last node links back to the
    /// head; otherwise its `next` is cleared.
    pub fn linked(head: StateNode, rest: Vec<StateNode>, policy: &ChainPolicy) -> Self {
        let head_id = head.id;
        let mut order = Vec::with_capacity(rest.len() + 1);
        order.push(head);
        order.extend(rest);

        let successors: Vec<Option<StateId>> = order
            .iter()
            .skip(1)
            .map(|node| Some(node.id))
            .chain(std::iter::once(policy.circular.then_some(head_id)))
            .collect();

        let mut nodes = HashMap::with_capacity(order.len());
        for (mut node, next) in order.into_iter().zip(successors) {
            node.next = next;
            policy.apply_to(&mut node);
            nodes.insert(node.id, node);
        }

        Self {
            head: head_id,
            nodes,
        }
    }

    /// Assemble a chain from already-linked nodes, as read back from storage.
    ///
    /// Returns `None` when no node carries `head`. If two nodes share an id
    /// the first one wins.
    pub fn from_nodes(head: StateId, nodes: impl IntoIterator<Item = StateNode>) -> Option<Self> {
        let mut arena: HashMap<StateId, StateNode> = HashMap::new();
        for node in nodes {
            if arena.contains_key(&node.id) {
                warn!(id = %node.id, "duplicate state id in chain; keeping the first");
                continue;
            }
            arena.insert(node.id, node);
        }
        arena.contains_key(&head).then_some(Self { head, nodes: arena })
    }

    /// Id of the head state.
    pub fn head_id(&self) -> StateId {
        self.head
    }

    /// The head state.
    pub fn head(&self) -> &StateNode {
        // The head is present by construction.
        &self.nodes[&self.head]
    }

    /// The chain-wide policy, as carried by the head.
    pub fn policy(&self) -> ChainPolicy {
        ChainPolicy::of(self.head())
    }

    /// Returns `true` if the head says the chain is circular.
    pub fn is_circular(&self) -> bool {
        self.head().circular
    }

    /// The checkbox branch, if the chain offers one.
    pub fn checkbox_branch(&self) -> Option<&StateNode> {
        self.head().checkbox_state()
    }

    /// Cycle-safe forward walk starting at the head.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// Number of states reachable by forward traversal (checkbox excluded).
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    /// Always `false`: a chain has at least its head.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The last state before the walk stops.
    pub fn tail(&self) -> &StateNode {
        self.walk().last().unwrap_or_else(|| self.head())
    }

    /// Returns `true` if forward traversal returns to the head.
    pub fn closes_on_head(&self) -> bool {
        let mut walk = self.walk();
        walk.by_ref().for_each(drop);
        walk.closed_on_head()
    }

    /// Find a reachable state (or the checkbox branch) by id.
    pub fn find(&self, id: StateId) -> Option<&StateNode> {
        for node in self.walk() {
            if node.id == id {
                return Some(node);
            }
            if let Some(branch) = node.checkbox_state() {
                if branch.id == id {
                    return Some(branch);
                }
            }
        }
        None
    }

    /// Returns `true` if `id` is reachable by forward traversal.
    pub fn links(&self, id: StateId) -> bool {
        self.walk().any(|node| node.id == id)
    }

    /// The reachable state whose `next` is `id`.
    pub fn predecessor_of(&self, id: StateId) -> Option<&StateNode> {
        self.walk().find(|node| node.points_to(id))
    }

    /// Every id used by this chain: reachable states plus checkbox branches.
    pub fn ids(&self) -> Vec<StateId> {
        let mut ids = Vec::new();
        for node in self.walk() {
            ids.push(node.id);
            if let Some(branch) = node.checkbox_state() {
                if !ids.contains(&branch.id) {
                    ids.push(branch.id);
                }
            }
        }
        ids
    }

    /// Arena lookup, including unreachable nodes. Only the walk uses this.
    pub(crate) fn node(&self, id: StateId) -> Option<&StateNode> {
        self.nodes.get(&id)
    }

    /// Mutable arena lookup for the mutation engine.
    pub(crate) fn node_mut(&mut self, id: StateId) -> Option<&mut StateNode> {
        self.nodes.get_mut(&id)
    }

    pub(crate) fn insert_node(&mut self, node: StateNode) {
        self.nodes.insert(node.id, node);
    }

    pub(crate) fn remove_node(&mut self, id: StateId) -> Option<StateNode> {
        if id == self.head {
            return None;
        }
        self.nodes.remove(&id)
    }
}
