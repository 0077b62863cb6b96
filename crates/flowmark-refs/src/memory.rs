//! In-memory marker host.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{RefError, RefResult};
use crate::traits::MarkerHost;

/// Text blocks keyed by block id, behind a `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryMarkerHost {
    blocks: RwLock<HashMap<String, String>>,
}

impl InMemoryMarkerHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a block.
    pub fn insert(&self, id: impl Into<String>, content: impl Into<String>) -> RefResult<()> {
        let mut blocks = self
            .blocks
            .write()
            .map_err(|e| RefError::Backend(format!("lock poisoned: {e}")))?;
        blocks.insert(id.into(), content.into());
        Ok(())
    }
}

impl MarkerHost for InMemoryMarkerHost {
    type Location = str;

    fn read_content(&self, at: &str) -> RefResult<String> {
        let blocks = self
            .blocks
            .read()
            .map_err(|e| RefError::Backend(format!("lock poisoned: {e}")))?;
        blocks
            .get(at)
            .cloned()
            .ok_or_else(|| RefError::LocationNotFound(at.to_string()))
    }

    fn write_content(&self, at: &str, content: &str) -> RefResult<()> {
        let mut blocks = self
            .blocks
            .write()
            .map_err(|e| RefError::Backend(format!("lock poisoned: {e}")))?;
        let block = blocks
            .get_mut(at)
            .ok_or_else(|| RefError::LocationNotFound(at.to_string()))?;
        *block = content.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerRef;
    use flowmark_types::StateId;

    #[test]
    fn read_and_write_markers() {
        let host = InMemoryMarkerHost::new();
        host.insert("b1", "{{renderer workflow, TODO, 1}} groceries").unwrap();

        let marker = host.read_marker("b1").unwrap().unwrap();
        assert_eq!(marker.state_id(), StateId::new(1));

        host.write_marker("b1", &MarkerRef::for_state(StateId::new(2), "DOING"))
            .unwrap();
        assert_eq!(
            host.read_content("b1").unwrap(),
            "{{renderer workflow, DOING, 2}} groceries"
        );
    }

    #[test]
    fn unknown_block_is_an_error() {
        let host = InMemoryMarkerHost::new();
        assert!(matches!(
            host.read_marker("nope"),
            Err(RefError::LocationNotFound(_))
        ));
        assert!(host
            .write_marker("nope", &MarkerRef::new("A", None))
            .is_err());
    }

    #[test]
    fn block_without_marker_reads_none() {
        let host = InMemoryMarkerHost::new();
        host.insert("b2", "just text").unwrap();
        assert!(host.read_marker("b2").unwrap().is_none());
    }
}
