//! In-memory forest store for testing and ephemeral use.
//!
//! [`InMemoryForestStore`] keeps the encoded document behind a `RwLock`, so
//! every load goes through the same JSON decode as the file store.

use std::sync::RwLock;

use crate::document::ForestDocument;
use crate::error::{StoreError, StoreResult};
use crate::traits::ForestStore;

/// An in-memory implementation of [`ForestStore`].
#[derive(Debug, Default)]
pub struct InMemoryForestStore {
    json: RwLock<Option<String>>,
}

impl InMemoryForestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with raw JSON, as if written earlier.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: RwLock::new(Some(json.into())),
        }
    }

    /// The raw stored JSON, if any.
    pub fn raw(&self) -> StoreResult<Option<String>> {
        let json = self
            .json
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        Ok(json.clone())
    }
}

impl ForestStore for InMemoryForestStore {
    fn load(&self) -> StoreResult<Option<ForestDocument>> {
        self.raw()?
            .map(|json| ForestDocument::from_json(&json))
            .transpose()
    }

    fn save(&self, document: &ForestDocument) -> StoreResult<()> {
        let encoded = document.to_json()?;
        let mut json = self
            .json
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        *json = Some(encoded);
        Ok(())
    }
}
