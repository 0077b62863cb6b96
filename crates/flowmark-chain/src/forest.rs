//! The chain forest: every workflow of a session, in order.
//!
//! [`ChainForest`] is the only owner of chains. Callers read through shared
//! references and change the forest exclusively through the mutation entry
//! points below; each entry point builds a new chain value and swaps it in,
//! so a failed call leaves the forest untouched and no caller ever holds a
//! node that a later edit could change underneath it.
//!
//! # Invariants
//!
//! - Chain order is insertion order (it drives quick-insert ordering).
//! - No id appears in two chains, counting checkbox-branch ids.
//! - Fresh ids are never zero and ordinary ids stay token-encodable.

use std::collections::HashSet;

use tracing::{debug, warn};

use flowmark_types::{Color, IdSource, StateId};

use crate::chain::Chain;
use crate::error::{ChainError, ChainResult};
use crate::mutation::{validated_label, StatePatch};
use crate::node::StateNode;

/// Upper bound on candidates drawn from an [`IdSource`] for one allocation.
const MAX_ID_ATTEMPTS: usize = 1_000;

/// What [`ChainForest::delete_state`] removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The head was named, so the whole chain is gone.
    ChainRemoved(StateId),
    /// A single state was excised; the chain with this head remains.
    StateRemoved {
        /// Head of the surviving chain.
        head: StateId,
        /// The removed state.
        state: StateId,
    },
}

/// Ordered collection of independent chains.
#[derive(Clone, Debug, Default)]
pub struct ChainForest {
    chains: Vec<Chain>,
}

impl ChainForest {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns `true` if the forest has no chains.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// All chains in forest order.
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Chain heads in forest order.
    pub fn heads(&self) -> impl Iterator<Item = &StateNode> {
        self.chains.iter().map(Chain::head)
    }

    /// The chain whose head is `head`.
    pub fn chain(&self, head: StateId) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.head_id() == head)
    }

    /// The chain containing `id` as a reachable state or checkbox branch.
    pub fn chain_of(&self, id: StateId) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.find(id).is_some())
    }

    /// Every id in use across the forest.
    pub fn ids(&self) -> HashSet<StateId> {
        self.chains.iter().flat_map(Chain::ids).collect()
    }

    /// Returns `true` if any chain uses `id`.
    pub fn contains_id(&self, id: StateId) -> bool {
        self.chains.iter().any(|chain| chain.find(id).is_some())
    }

    /// Add an existing chain at the end of the forest.
    ///
    /// Fails with [`ChainError::Inconsistent`] if any of its ids is already
    /// used by another chain.
    pub fn insert_chain(&mut self, chain: Chain) -> ChainResult<()> {
        let used = self.ids();
        if let Some(clash) = chain.ids().into_iter().find(|id| used.contains(id)) {
            return Err(ChainError::Inconsistent(format!(
                "chain {} reuses state id {clash}",
                chain.head_id()
            )));
        }
        self.chains.push(chain);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Registry
    // ---------------------------------------------------------------

    /// Resolve an id to a state anywhere in the forest.
    ///
    /// Chains are searched in order; each visited state is checked both for
    /// its own id and for its checkbox branch. A checkbox match is returned
    /// directly. An ordinary match is confirmed by a second walk from the
    /// chain head and reported as [`ChainError::Inconsistent`] if it is not
    /// actually linked into the chain.
    pub fn try_resolve(&self, id: StateId) -> ChainResult<&StateNode> {
        for chain in &self.chains {
            let Some(found) = chain.find(id) else {
                continue;
            };
            if found.id.is_checkbox() {
                return Ok(found);
            }
            if chain.links(found.id) {
                return Ok(found);
            }
            warn!(id = %id, head = %chain.head_id(), "state matched but is not linked from its head");
            return Err(ChainError::Inconsistent(format!(
                "state {id} is not reachable from head {}",
                chain.head_id()
            )));
        }
        Err(ChainError::NotFound(id))
    }

    /// Resolve an id, treating every failure as "not found".
    pub fn resolve(&self, id: StateId) -> Option<&StateNode> {
        self.try_resolve(id).ok()
    }

    /// Resolve by label, used when a reference carries no usable id.
    ///
    /// Chains are searched in order; within a chain the forward states come
    /// first and the checkbox branch last. The first exact match wins.
    pub fn resolve_by_label(&self, label: &str) -> Option<&StateNode> {
        self.chains.iter().find_map(|chain| {
            chain
                .walk()
                .find(|node| node.label == label)
                .or_else(|| chain.checkbox_branch().filter(|branch| branch.label == label))
        })
    }

    /// The state that owns the checkbox branch `branch`: the first state a
    /// forward walk meets that offers it.
    pub fn checkbox_owner(&self, branch: StateId) -> Option<&StateNode> {
        self.chains.iter().find_map(|chain| {
            chain
                .walk()
                .find(|node| node.checkbox_state().is_some_and(|b| b.id == branch))
        })
    }

    /// Every label in forest order, main states before each chain's
    /// checkbox branch, without duplicates.
    pub fn distinct_labels(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut labels = Vec::new();
        for chain in &self.chains {
            let branch = chain.checkbox_branch();
            for node in chain.walk().chain(branch) {
                if seen.insert(node.label.as_str()) {
                    labels.push(node.label.as_str());
                }
            }
        }
        labels
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Draw a fresh id that is non-zero, encodable, unused, and not the
    /// unknown-state sentinel.
    fn fresh_id(&self, ids: &mut impl IdSource, checkbox: bool) -> ChainResult<StateId> {
        let used = self.ids();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = ids.next_id();
            let candidate = if checkbox && candidate.get() > 0 {
                candidate.negated()
            } else {
                candidate
            };
            if candidate.is_unset()
                || candidate == StateId::UNKNOWN
                || !candidate.is_encodable()
                || used.contains(&candidate)
            {
                continue;
            }
            if checkbox != candidate.is_checkbox() {
                continue;
            }
            return Ok(candidate);
        }
        Err(ChainError::Inconsistent(
            "id source produced no unused identifier".into(),
        ))
    }

    fn position(&self, head: StateId) -> ChainResult<usize> {
        self.chains
            .iter()
            .position(|chain| chain.head_id() == head)
            .ok_or(ChainError::ChainNotFound(head))
    }

    fn replace(&mut self, index: usize, chain: Chain) -> &Chain {
        self.chains[index] = chain;
        &self.chains[index]
    }

    /// Start a new single-state chain at the end of the forest.
    pub fn create_chain(
        &mut self,
        ids: &mut impl IdSource,
        label: &str,
        color: Color,
    ) -> ChainResult<&Chain> {
        let label = validated_label(label)?;
        let id = self.fresh_id(ids, false)?;
        debug!(head = %id, label = %label, "created chain");
        self.chains.push(Chain::single(StateNode::new(id, label, color)));
        let index = self.chains.len() - 1;
        Ok(&self.chains[index])
    }

    /// Append a new state to the chain headed by `head`.
    ///
    /// Returns the updated chain; its tail is the new state.
    pub fn append_state(
        &mut self,
        ids: &mut impl IdSource,
        head: StateId,
        label: &str,
        color: Color,
    ) -> ChainResult<&Chain> {
        let index = self.position(head)?;
        let label = validated_label(label)?;
        let id = self.fresh_id(ids, false)?;
        let chain = self.chains[index].with_appended(StateNode::new(id, label, color));
        Ok(self.replace(index, chain))
    }

    /// Make the chain headed by `head` circular or linear.
    pub fn set_circular(&mut self, head: StateId, circular: bool) -> ChainResult<&Chain> {
        let index = self.position(head)?;
        debug!(head = %head, circular, "setting circularity");
        let chain = self.chains[index].with_circular(circular);
        Ok(self.replace(index, chain))
    }

    /// Enable or disable the checkbox branch of the chain headed by `head`.
    ///
    /// When enabling, `branch` supplies the branch label and color. A branch
    /// with an unset id gets a fresh negative id; a negative id is kept, which
    /// lets callers restyle the existing branch. Enabling without a branch
    /// re-uses the chain's current branch if it has one. Disabling clears the
    /// branch and leaves every other id alone.
    pub fn set_checkbox_branch(
        &mut self,
        ids: &mut impl IdSource,
        head: StateId,
        enabled: bool,
        branch: Option<StateNode>,
    ) -> ChainResult<&Chain> {
        let index = self.position(head)?;
        let current = &self.chains[index];

        if !enabled {
            debug!(head = %head, "disabling checkbox branch");
            let chain = current.with_checkbox_branch(None);
            return Ok(self.replace(index, chain));
        }

        let mut leaf = match branch {
            Some(leaf) => leaf,
            None => current
                .head()
                .checkbox_branch
                .as_deref()
                .cloned()
                .ok_or_else(|| {
                    ChainError::InvalidInput("enabling a checkbox branch needs a state".into())
                })?,
        };
        leaf.label = validated_label(&leaf.label)?;

        if leaf.id.is_unset() {
            leaf.id = self.fresh_id(ids, true)?;
        } else if !leaf.id.is_checkbox() {
            return Err(ChainError::InvalidInput(format!(
                "checkbox branch id {} must be negative",
                leaf.id
            )));
        } else if leaf.id == StateId::UNKNOWN {
            return Err(ChainError::InvalidInput(format!(
                "checkbox branch id {} is reserved",
                leaf.id
            )));
        } else {
            let own = current.head().checkbox_branch.as_ref().map(|b| b.id);
            if own != Some(leaf.id) && self.contains_id(leaf.id) {
                return Err(ChainError::InvalidInput(format!(
                    "checkbox branch id {} is already in use",
                    leaf.id
                )));
            }
        }

        debug!(head = %head, branch = %leaf.id, "enabling checkbox branch");
        let chain = self.chains[index].with_checkbox_branch(Some(leaf));
        Ok(self.replace(index, chain))
    }

    /// Replace the label and color of one state of the chain headed by `head`.
    pub fn update_state(&mut self, head: StateId, patch: &StatePatch) -> ChainResult<&Chain> {
        let index = self.position(head)?;
        let chain = self.chains[index].with_state_updated(patch)?;
        debug!(head = %head, state = %patch.id, "updated state");
        Ok(self.replace(index, chain))
    }

    /// Delete a state. Naming the head deletes the whole chain.
    pub fn delete_state(&mut self, head: StateId, state: StateId) -> ChainResult<DeleteOutcome> {
        let index = self.position(head)?;
        if head == state {
            self.chains.remove(index);
            debug!(head = %head, "deleted chain through its head");
            return Ok(DeleteOutcome::ChainRemoved(head));
        }
        let chain = self.chains[index].without_state(state)?;
        self.replace(index, chain);
        Ok(DeleteOutcome::StateRemoved { head, state })
    }

    /// Delete the chain headed by `head`. Returns `false` if it was absent.
    pub fn delete_chain(&mut self, head: StateId) -> bool {
        let before = self.chains.len();
        self.chains.retain(|chain| chain.head_id() != head);
        let removed = self.chains.len() != before;
        if removed {
            debug!(head = %head, "deleted chain");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::materialize;
    use flowmark_types::SequentialIds;

    fn color() -> Color {
        Color::new("#2D3748")
    }

    /// A forest with one chain A -> B -> C built through the public API.
    fn abc() -> (ChainForest, SequentialIds, StateId) {
        let mut forest = ChainForest::new();
        let mut ids = SequentialIds::starting_at(100);
        let head = forest.create_chain(&mut ids, "A", color()).unwrap().head_id();
        forest.append_state(&mut ids, head, "B", color()).unwrap();
        forest.append_state(&mut ids, head, "C", color()).unwrap();
        (forest, ids, head)
    }

    fn labels(forest: &ChainForest, head: StateId) -> Vec<String> {
        materialize(forest.chain(head).unwrap())
            .iter()
            .map(|entry| {
                if entry.is_loop_marker() {
                    "loop".to_string()
                } else {
                    entry.node().label.clone()
                }
            })
            .collect()
    }

    // ---- create / append ----

    #[test]
    fn states_materialize_in_insertion_order() {
        let (forest, _, head) = abc();
        assert_eq!(labels(&forest, head), vec!["A", "B", "C"]);
    }

    #[test]
    fn create_rejects_blank_label() {
        let mut forest = ChainForest::new();
        let err = forest
            .create_chain(&mut SequentialIds::default(), "  ", color())
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidInput(_)));
        assert!(forest.is_empty());
    }

    #[test]
    fn append_to_missing_chain_fails() {
        let (mut forest, mut ids, _) = abc();
        let err = forest
            .append_state(&mut ids, StateId::new(4242), "X", color())
            .unwrap_err();
        assert_eq!(err, ChainError::ChainNotFound(StateId::new(4242)));
        assert!(err.is_not_found());
    }

    #[test]
    fn append_to_circular_pair_keeps_loop() {
        let mut forest = ChainForest::new();
        let mut ids = SequentialIds::starting_at(1);
        let head = forest.create_chain(&mut ids, "A", color()).unwrap().head_id();
        forest.append_state(&mut ids, head, "B", color()).unwrap();
        forest.set_circular(head, true).unwrap();

        let chain = forest.append_state(&mut ids, head, "C", color()).unwrap();
        assert_eq!(chain.tail().label, "C");
        assert_eq!(chain.tail().next, Some(head));
        assert_eq!(labels(&forest, head), vec!["A", "B", "C", "loop"]);
    }

    #[test]
    fn fresh_ids_skip_used_and_zero() {
        let mut forest = ChainForest::new();
        let mut zero_first = SequentialIds::starting_at(0);
        let head = forest.create_chain(&mut zero_first, "A", color()).unwrap().head_id();
        assert_eq!(head, StateId::new(1));

        let mut replay = SequentialIds::starting_at(1);
        let second = forest.create_chain(&mut replay, "B", color()).unwrap().head_id();
        assert_eq!(second, StateId::new(2));
    }

    #[test]
    fn exhausted_id_source_is_reported() {
        struct Stuck;
        impl IdSource for Stuck {
            fn next_id(&mut self) -> StateId {
                StateId::new(5)
            }
        }
        let mut forest = ChainForest::new();
        forest.create_chain(&mut Stuck, "A", color()).unwrap();
        let err = forest.create_chain(&mut Stuck, "B", color()).unwrap_err();
        assert!(matches!(err, ChainError::Inconsistent(_)));
        assert_eq!(forest.len(), 1);
    }

    // ---- circularity ----

    #[test]
    fn circular_on_and_off() {
        let (mut forest, _, head) = abc();
        forest.set_circular(head, true).unwrap();
        assert_eq!(labels(&forest, head), vec!["A", "B", "C", "loop"]);

        let chain = forest.set_circular(head, false).unwrap();
        assert!(chain.tail().next.is_none());
        assert_eq!(labels(&forest, head), vec!["A", "B", "C"]);
    }

    #[test]
    fn circular_toggle_does_not_alias_previous_view() {
        let (mut forest, _, head) = abc();
        let before = forest.chain(head).unwrap().clone();
        forest.set_circular(head, true).unwrap();
        assert!(!before.is_circular());
        assert!(before.tail().next.is_none());
    }

    // ---- checkbox branch ----

    #[test]
    fn checkbox_branch_gets_negative_id_and_resolves() {
        let (mut forest, mut ids, head) = abc();
        let draft = StateNode::checkbox(StateId::UNSET, "BLOCKED", "#bf3232");
        let chain = forest
            .set_checkbox_branch(&mut ids, head, true, Some(draft))
            .unwrap();
        let branch_id = chain.checkbox_branch().unwrap().id;
        assert!(branch_id.is_checkbox());
        assert_eq!(labels(&forest, head), vec!["A", "B", "C", "BLOCKED"]);

        let resolved = forest.resolve(branch_id).unwrap();
        assert_eq!(resolved.label, "BLOCKED");
        assert_eq!(forest.checkbox_owner(branch_id).map(|n| n.id), Some(head));
    }

    #[test]
    fn checkbox_disable_keeps_state_ids() {
        let (mut forest, mut ids, head) = abc();
        let before: Vec<StateId> = forest.chain(head).unwrap().walk().map(|n| n.id).collect();
        let draft = StateNode::checkbox(StateId::UNSET, "X", "#000000");
        forest.set_checkbox_branch(&mut ids, head, true, Some(draft)).unwrap();
        let chain = forest.set_checkbox_branch(&mut ids, head, false, None).unwrap();
        let after: Vec<StateId> = chain.walk().map(|n| n.id).collect();
        assert_eq!(before, after);
        assert!(chain.checkbox_branch().is_none());
    }

    #[test]
    fn checkbox_restyle_keeps_branch_id() {
        let (mut forest, mut ids, head) = abc();
        let draft = StateNode::checkbox(StateId::UNSET, "X", "#000000");
        let branch_id = forest
            .set_checkbox_branch(&mut ids, head, true, Some(draft))
            .unwrap()
            .checkbox_branch()
            .unwrap()
            .id;
        let restyled = StateNode::checkbox(branch_id, "X", "#ffffff");
        let chain = forest
            .set_checkbox_branch(&mut ids, head, true, Some(restyled))
            .unwrap();
        let branch = chain.checkbox_branch().unwrap();
        assert_eq!(branch.id, branch_id);
        assert_eq!(branch.color.as_str(), "#ffffff");
    }

    #[test]
    fn checkbox_rejects_bad_drafts() {
        let (mut forest, mut ids, head) = abc();
        let err = forest.set_checkbox_branch(&mut ids, head, true, None).unwrap_err();
        assert!(matches!(err, ChainError::InvalidInput(_)));

        let positive = StateNode::checkbox(StateId::new(7), "X", "#000000");
        let err = forest
            .set_checkbox_branch(&mut ids, head, true, Some(positive))
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidInput(_)));

        let blank = StateNode::checkbox(StateId::UNSET, " ", "#000000");
        let err = forest
            .set_checkbox_branch(&mut ids, head, true, Some(blank))
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidInput(_)));
    }

    #[test]
    fn checkbox_ids_never_take_the_unknown_sentinel() {
        let (mut forest, _, head) = abc();
        let mut ids = SequentialIds::starting_at(999);
        let draft = StateNode::checkbox(StateId::UNSET, "BLOCKED", "#bf3232");
        let branch = forest
            .set_checkbox_branch(&mut ids, head, true, Some(draft))
            .unwrap()
            .checkbox_branch()
            .unwrap()
            .id;
        assert_ne!(branch, StateId::UNKNOWN);
        assert_eq!(branch, StateId::new(-1000));

        let reserved = StateNode::checkbox(StateId::UNKNOWN, "BLOCKED", "#bf3232");
        let err = forest
            .set_checkbox_branch(&mut ids, head, true, Some(reserved))
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidInput(_)));
        assert_eq!(forest.chain(head).unwrap().checkbox_branch().unwrap().id, branch);
    }

    #[test]
    fn checkbox_owner_is_first_state_offering_the_branch() {
        let mut head = StateNode::new(StateId::new(1), "A", color());
        head.next = Some(StateId::new(2));
        let mut second = StateNode::new(StateId::new(2), "B", color());
        second.has_checkbox_branch = true;
        let branch = StateNode::checkbox(StateId::new(-7), "X", color());
        second.checkbox_branch = Some(Box::new(branch));
        let chain = Chain::from_nodes(head.id, vec![head, second]).unwrap();
        let mut forest = ChainForest::new();
        forest.insert_chain(chain).unwrap();

        let owner = forest.checkbox_owner(StateId::new(-7)).map(|n| n.id);
        assert_eq!(owner, Some(StateId::new(2)));
        assert!(forest.checkbox_owner(StateId::new(-8)).is_none());
    }

    // ---- update ----

    #[test]
    fn update_state_in_forest() {
        let (mut forest, _, head) = abc();
        forest.set_circular(head, true).unwrap();
        let b = forest.resolve_by_label("B").unwrap().id;
        let chain = forest
            .update_state(head, &StatePatch::new(b).with_label("REVIEW"))
            .unwrap();
        assert!(chain.closes_on_head());
        assert_eq!(labels(&forest, head), vec!["A", "REVIEW", "C", "loop"]);
    }

    // ---- delete ----

    #[test]
    fn deleting_head_of_pair_removes_chain() {
        let mut forest = ChainForest::new();
        let mut ids = SequentialIds::starting_at(1);
        let head = forest.create_chain(&mut ids, "A", color()).unwrap().head_id();
        forest.append_state(&mut ids, head, "B", color()).unwrap();

        let outcome = forest.delete_state(head, head).unwrap();
        assert_eq!(outcome, DeleteOutcome::ChainRemoved(head));
        assert!(forest.is_empty());
    }

    #[test]
    fn deleting_unlinked_state_fails_without_change() {
        let (mut forest, _, head) = abc();
        let err = forest.delete_state(head, StateId::new(999)).unwrap_err();
        assert!(matches!(err, ChainError::StateNotFound { .. }));
        assert_eq!(labels(&forest, head), vec!["A", "B", "C"]);
    }

    #[test]
    fn deleting_last_state_of_circular_chain_recloses_loop() {
        let (mut forest, _, head) = abc();
        forest.set_circular(head, true).unwrap();
        let c = forest.resolve_by_label("C").unwrap().id;
        forest.delete_state(head, c).unwrap();
        assert_eq!(labels(&forest, head), vec!["A", "B", "loop"]);
        assert!(forest.chain(head).unwrap().walk().all(|n| n.circular));
    }

    #[test]
    fn delete_chain_is_idempotent() {
        let (mut forest, _, head) = abc();
        assert!(forest.delete_chain(head));
        assert!(!forest.delete_chain(head));
        assert!(forest.is_empty());
    }

    // ---- registry ----

    #[test]
    fn resolve_searches_every_chain() {
        let (mut forest, mut ids, _) = abc();
        let other = forest.create_chain(&mut ids, "NOW", color()).unwrap().head_id();
        assert_eq!(forest.resolve(other).map(|n| n.label.as_str()), Some("NOW"));
        assert!(forest.resolve(StateId::new(31337)).is_none());
        assert_eq!(
            forest.try_resolve(StateId::new(31337)).unwrap_err(),
            ChainError::NotFound(StateId::new(31337))
        );
    }

    #[test]
    fn resolve_flags_positive_id_hidden_in_checkbox_slot() {
        let mut head = StateNode::new(StateId::new(1), "A", color());
        head.has_checkbox_branch = true;
        head.checkbox_branch = Some(Box::new(StateNode::new(StateId::new(50), "odd", color())));
        let chain = Chain::from_nodes(head.id, vec![head]).unwrap();
        let mut forest = ChainForest::new();
        forest.insert_chain(chain).unwrap();
        assert!(matches!(
            forest.try_resolve(StateId::new(50)),
            Err(ChainError::Inconsistent(_))
        ));
        assert!(forest.resolve(StateId::new(50)).is_none());
    }

    #[test]
    fn resolve_by_label_prefers_forest_order() {
        let (mut forest, mut ids, head) = abc();
        let second = forest.create_chain(&mut ids, "C", color()).unwrap().head_id();
        let found = forest.resolve_by_label("C").unwrap();
        assert_ne!(found.id, second);
        assert!(forest.chain(head).unwrap().links(found.id));
    }

    #[test]
    fn distinct_labels_deduplicate() {
        let (mut forest, mut ids, head) = abc();
        let other = forest.create_chain(&mut ids, "B", color()).unwrap().head_id();
        forest.append_state(&mut ids, other, "Z", color()).unwrap();
        let draft = StateNode::checkbox(StateId::UNSET, "X", "#000000");
        forest.set_checkbox_branch(&mut ids, head, true, Some(draft)).unwrap();
        assert_eq!(forest.distinct_labels(), vec!["A", "B", "C", "X", "Z"]);
    }

    #[test]
    fn insert_chain_rejects_id_collisions() {
        let (mut forest, _, head) = abc();
        let clash = Chain::single(StateNode::new(head, "dup", color()));
        assert!(matches!(
            forest.insert_chain(clash),
            Err(ChainError::Inconsistent(_))
        ));
        let fine = Chain::single(StateNode::new(StateId::new(1), "ok", color()));
        forest.insert_chain(fine).unwrap();
        assert_eq!(forest.len(), 2);
    }
}
