//! Moving a state along its chain.
//!
//! Both helpers take the current state's id and look the state up again, so
//! a caller holding an outdated copy still moves from the live state.

use flowmark_chain::{ChainForest, StateNode};
use flowmark_types::StateId;

/// The forward successor of `current`.
///
/// Returns `None` when the state is unknown, is a checkbox state, has no
/// successor, or links to itself.
pub fn advance(forest: &ChainForest, current: StateId) -> Option<&StateNode> {
    let live = forest.resolve(current)?;
    if live.is_checkbox() {
        return None;
    }
    let next = live.next.filter(|&next| next != current)?;
    forest.chain_of(current)?.find(next)
}

/// The checkbox counterpart of `current`.
///
/// A checkbox state returns to the state that offers it. An ordinary state
/// with an enabled branch moves to the branch. Anything else has no
/// counterpart.
pub fn toggle_checkbox(forest: &ChainForest, current: StateId) -> Option<&StateNode> {
    if current.is_checkbox() {
        return forest.checkbox_owner(current);
    }
    forest.resolve(current)?.checkbox_state()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowmark_chain::default_forest;
    use flowmark_types::{Color, SequentialIds};

    fn with_branch() -> (ChainForest, StateId) {
        let mut forest = default_forest();
        let draft = StateNode::checkbox(StateId::UNSET, "BLOCKED", "#bf3232");
        let branch = forest
            .set_checkbox_branch(&mut SequentialIds::starting_at(40), StateId::new(1), true, Some(draft))
            .unwrap()
            .checkbox_branch()
            .unwrap()
            .id;
        (forest, branch)
    }

    #[test]
    fn advance_follows_next() {
        let forest = default_forest();
        assert_eq!(advance(&forest, StateId::new(1)).map(|n| n.id), Some(StateId::new(2)));
        assert!(advance(&forest, StateId::new(3)).is_none());
        assert!(advance(&forest, StateId::new(404)).is_none());
    }

    #[test]
    fn advance_wraps_on_circular_chain() {
        let mut forest = default_forest();
        forest.set_circular(StateId::new(1), true).unwrap();
        assert_eq!(advance(&forest, StateId::new(3)).map(|n| n.id), Some(StateId::new(1)));
    }

    #[test]
    fn advance_skips_self_loop() {
        let mut forest = ChainForest::new();
        let head = forest
            .create_chain(&mut SequentialIds::default(), "ONLY", Color::new("#000000"))
            .unwrap()
            .head_id();
        forest.set_circular(head, true).unwrap();
        assert!(advance(&forest, head).is_none());
    }

    #[test]
    fn checkbox_round_trip() {
        let (forest, branch) = with_branch();
        let checked = toggle_checkbox(&forest, StateId::new(2)).unwrap();
        assert_eq!(checked.id, branch);
        assert!(advance(&forest, branch).is_none());

        let unchecked = toggle_checkbox(&forest, branch).unwrap();
        assert_eq!(unchecked.id, StateId::new(1));
    }

    #[test]
    fn no_branch_no_toggle() {
        let (forest, _) = with_branch();
        assert!(toggle_checkbox(&forest, StateId::new(4)).is_none());
        assert!(toggle_checkbox(&forest, StateId::new(-31337)).is_none());
    }
}
