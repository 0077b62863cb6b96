//! The persisted forest document.

use serde::{Deserialize, Serialize};
use tracing::warn;

use flowmark_chain::ChainForest;

use crate::error::StoreResult;
use crate::record::{deserialize, serialize, StateRecord};

/// Every chain of a forest, each as its flat record list.
///
/// A document without the `serializedWorkflows` key holds no forest at all,
/// which is different from holding an empty one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestDocument {
    #[serde(
        rename = "serializedWorkflows",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub workflows: Option<Vec<Vec<StateRecord>>>,
}

impl ForestDocument {
    /// Capture a forest.
    pub fn from_forest(forest: &ChainForest) -> Self {
        Self {
            workflows: Some(forest.chains().iter().map(serialize).collect()),
        }
    }

    /// Rebuild the stored forest, or `None` if the document holds none.
    ///
    /// Empty record lists and chains whose ids collide with an earlier chain
    /// are skipped.
    pub fn to_forest(&self) -> Option<ChainForest> {
        let workflows = self.workflows.as_ref()?;
        let mut forest = ChainForest::new();
        for (index, records) in workflows.iter().enumerate() {
            let Some(chain) = deserialize(records) else {
                warn!(index, "skipping empty stored workflow");
                continue;
            };
            if let Err(err) = forest.insert_chain(chain) {
                warn!(index, error = %err, "skipping conflicting stored workflow");
            }
        }
        Some(forest)
    }

    /// Decode a document from JSON.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode this document as pretty-printed JSON.
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
