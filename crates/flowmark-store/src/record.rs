//! Flat storage records and the chain codec.
//!
//! [`serialize`] writes one record per state reached by forward traversal;
//! [`deserialize`] rebuilds the chain in two passes so forward references to
//! records later in the list resolve.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use flowmark_chain::{Chain, StateNode};
use flowmark_types::{Color, StateId};

/// The checkbox branch as stored on each record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
    pub id: StateId,
    #[serde(rename = "keyword")]
    pub label: String,
    pub color: Color,
}

/// One stored state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    pub id: StateId,
    #[serde(rename = "keyword")]
    pub label: String,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<StateId>,
    #[serde(default)]
    pub circular: bool,
    #[serde(default)]
    pub has_checkbox: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox_state: Option<BranchRecord>,
}

impl From<&StateNode> for BranchRecord {
    fn from(node: &StateNode) -> Self {
        Self {
            id: node.id,
            label: node.label.clone(),
            color: node.color.clone(),
        }
    }
}

impl From<&BranchRecord> for StateNode {
    fn from(record: &BranchRecord) -> Self {
        StateNode::checkbox(record.id, record.label.clone(), record.color.clone())
    }
}

impl From<&StateNode> for StateRecord {
    fn from(node: &StateNode) -> Self {
        Self {
            id: node.id,
            label: node.label.clone(),
            color: node.color.clone(),
            next_id: node.next,
            circular: node.circular,
            has_checkbox: node.has_checkbox_branch,
            checkbox_state: node.checkbox_branch.as_deref().map(BranchRecord::from),
        }
    }
}

impl StateRecord {
    /// The node described by this record, with its link left unset.
    fn unlinked_node(&self) -> StateNode {
        let mut node = StateNode::new(self.id, self.label.clone(), self.color.clone());
        node.circular = self.circular;
        node.has_checkbox_branch = self.has_checkbox;
        node.checkbox_branch = self
            .checkbox_state
            .as_ref()
            .map(|branch| Box::new(StateNode::from(branch)));
        node
    }
}

/// Flatten a chain into records in forward traversal order.
pub fn serialize(chain: &Chain) -> Vec<StateRecord> {
    chain.walk().map(StateRecord::from).collect()
}

/// Rebuild a chain from records. The first record is the head.
///
/// Links whose target is not among the records are dropped. Returns `None`
/// for an empty record list.
pub fn deserialize(records: &[StateRecord]) -> Option<Chain> {
    let head = records.first()?.id;
    let known: HashSet<StateId> = records.iter().map(|record| record.id).collect();

    let nodes = records.iter().map(|record| {
        let mut node = record.unlinked_node();
        match record.next_id {
            Some(next) if known.contains(&next) => node.next = Some(next),
            Some(next) => warn!(state = %record.id, next = %next, "dropping dangling link"),
            None => {}
        }
        node
    });
    Chain::from_nodes(head, nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowmark_chain::{materialize, ChainPolicy};

    fn state(id: i64, label: &str) -> StateNode {
        StateNode::new(StateId::new(id), label, "#3182CE")
    }

    fn roundtrip(chain: &Chain) -> Chain {
        deserialize(&serialize(chain)).unwrap()
    }

    fn shape(chain: &Chain) -> Vec<(StateId, Option<StateId>, bool)> {
        chain.walk().map(|n| (n.id, n.next, n.circular)).collect()
    }

    fn linear() -> Chain {
        Chain::linked(
            state(1, "TODO"),
            vec![state(2, "DOING"), state(3, "DONE")],
            &ChainPolicy::default(),
        )
    }

    #[test]
    fn linear_roundtrip() {
        let chain = linear();
        let back = roundtrip(&chain);
        assert_eq!(shape(&back), shape(&chain));
        assert_eq!(serialize(&back), serialize(&chain));
    }

    #[test]
    fn circular_roundtrip_keeps_loop_marker() {
        let policy = ChainPolicy {
            circular: true,
            ..ChainPolicy::default()
        };
        let chain = Chain::linked(state(1, "A"), vec![state(2, "B")], &policy);
        let records = serialize(&chain);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].next_id, Some(StateId::new(1)));

        let back = roundtrip(&chain);
        assert_eq!(shape(&back), shape(&chain));
        assert_eq!(materialize(&back).len(), 3);
    }

    #[test]
    fn self_loop_roundtrip() {
        let policy = ChainPolicy {
            circular: true,
            ..ChainPolicy::default()
        };
        let chain = Chain::linked(state(7, "ONLY"), vec![], &policy);
        let back = roundtrip(&chain);
        assert_eq!(back.head().next, Some(StateId::new(7)));
        assert_eq!(serialize(&back), serialize(&chain));
    }

    #[test]
    fn checkbox_branch_roundtrip() {
        let policy = ChainPolicy {
            circular: false,
            has_checkbox_branch: true,
            checkbox_branch: Some(Box::new(StateNode::checkbox(StateId::new(-12), "WAIT", "#bf3232"))),
        };
        let chain = Chain::linked(state(1, "A"), vec![state(2, "B")], &policy);
        let back = roundtrip(&chain);
        let branch = back.checkbox_branch().unwrap();
        assert_eq!(branch.id, StateId::new(-12));
        assert_eq!(branch.label, "WAIT");
        assert!(back.walk().all(|n| n.has_checkbox_branch));
    }

    #[test]
    fn dangling_link_is_dropped() {
        let mut records = serialize(&linear());
        records[2].next_id = Some(StateId::new(404));
        let chain = deserialize(&records).unwrap();
        assert_eq!(chain.len(), 3);
        assert!(chain.tail().next.is_none());
    }

    #[test]
    fn records_may_link_forward() {
        let mut records = serialize(&linear());
        records.swap(1, 2);
        let chain = deserialize(&records).unwrap();
        let labels: Vec<&str> = chain.walk().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["TODO", "DOING", "DONE"]);
    }

    #[test]
    fn empty_records_yield_nothing() {
        assert!(deserialize(&[]).is_none());
    }

    #[test]
    fn reads_legacy_json() {
        let json = r##"[
            {"id": 1, "keyword": "TODO", "color": "#3182CE", "nextId": 2},
            {"id": 2, "keyword": "DONE", "color": "#38A169",
             "hasCheckbox": true,
             "checkboxState": {"id": -5, "keyword": "X", "color": "#000000"}}
        ]"##;
        let records: Vec<StateRecord> = serde_json::from_str(json).unwrap();
        let chain = deserialize(&records).unwrap();
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_circular());
        assert_eq!(chain.tail().checkbox_state().map(|b| b.id), Some(StateId::new(-5)));

        let written = serde_json::to_value(serialize(&chain)).unwrap();
        assert_eq!(written[0]["keyword"], "TODO");
        assert_eq!(written[0]["nextId"], 2);
        assert!(written[1].get("nextId").is_none());
    }
}
