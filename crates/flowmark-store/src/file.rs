//! JSON file forest store.
//!
//! The document is written to a temporary file in the target directory and
//! then renamed over the old one, so a crash mid-save leaves either the old
//! document or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::document::ForestDocument;
use crate::error::StoreResult;
use crate::traits::ForestStore;

/// A [`ForestStore`] backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileForestStore {
    path: PathBuf,
}

impl FileForestStore {
    /// Use the file at `path`. Nothing is touched until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ForestStore for FileForestStore {
    fn load(&self) -> StoreResult<Option<ForestDocument>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if json.trim().is_empty() {
            return Ok(None);
        }
        ForestDocument::from_json(&json).map(Some)
    }

    fn save(&self, document: &ForestDocument) -> StoreResult<()> {
        let json = document.to_json()?;
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut tmp = NamedTempFile::new_in(&parent)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), bytes = json.len(), "saved forest");
        Ok(())
    }
}
