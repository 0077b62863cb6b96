//! The [`ForestStore`] trait defining the persistence interface.

use flowmark_chain::ChainForest;

use crate::document::ForestDocument;
use crate::error::StoreResult;

/// Storage backend for a single forest document.
///
/// Implementations must be thread-safe (`Send + Sync`). A save replaces the
/// whole document; readers never observe a partially written one.
pub trait ForestStore: Send + Sync {
    /// Read the stored document.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    fn load(&self) -> StoreResult<Option<ForestDocument>>;

    /// Replace the stored document.
    fn save(&self, document: &ForestDocument) -> StoreResult<()>;

    /// Read and rebuild the stored forest.
    ///
    /// Returns `Ok(None)` when there is no document or the document holds
    /// no forest.
    fn load_forest(&self) -> StoreResult<Option<ChainForest>> {
        Ok(self.load()?.and_then(|document| document.to_forest()))
    }

    /// Store `forest`, replacing whatever was there.
    fn save_forest(&self, forest: &ChainForest) -> StoreResult<()> {
        self.save(&ForestDocument::from_forest(forest))
    }
}
