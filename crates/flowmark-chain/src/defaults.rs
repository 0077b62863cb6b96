//! The workflows seeded into an empty store.

use tracing::warn;

use flowmark_types::{Color, StateId};

use crate::chain::{Chain, ChainPolicy};
use crate::forest::ChainForest;
use crate::node::StateNode;

/// `(id, label, color)` for each seeded state, one slice per chain.
const DEFAULT_CHAINS: &[&[(i64, &str, &str)]] = &[
    &[(1, "TODO", "#3182CE"), (2, "DOING", "#DD6B20"), (3, "DONE", "#38A169")],
    &[(4, "NOW", "#805AD5"), (5, "LATER", "#718096"), (6, "DONE", "#38A169")],
];

/// Two linear chains: TODO → DOING → DONE and NOW → LATER → DONE.
pub fn default_forest() -> ChainForest {
    let mut forest = ChainForest::new();
    for states in DEFAULT_CHAINS {
        let mut nodes = states
            .iter()
            .map(|&(id, label, color)| StateNode::new(StateId::new(id), label, Color::new(color)));
        let Some(head) = nodes.next() else {
            continue;
        };
        let chain = Chain::linked(head, nodes.collect(), &ChainPolicy::default());
        if let Err(err) = forest.insert_chain(chain) {
            warn!(error = %err, "skipping default chain");
        }
    }
    forest
}
