//! The [`MarkerHost`] trait: where marked text lives.

use std::fmt::Display;

use crate::error::RefResult;
use crate::marker::{replace_marker, MarkerRef};

/// A store of text blocks that may carry workflow markers.
///
/// Implementations provide raw content access; marker reads and writes are
/// derived from it. Writing a marker keeps the text that follows the old
/// marker and prepends a marker to text that has none.
pub trait MarkerHost: Send + Sync {
    /// How a block of text is addressed.
    type Location: ?Sized + Display;

    /// Read the text at `at`.
    fn read_content(&self, at: &Self::Location) -> RefResult<String>;

    /// Replace the text at `at`.
    fn write_content(&self, at: &Self::Location, content: &str) -> RefResult<()>;

    /// The first marker in the text at `at`, if any.
    fn read_marker(&self, at: &Self::Location) -> RefResult<Option<MarkerRef>> {
        Ok(MarkerRef::parse(&self.read_content(at)?))
    }

    /// Put `marker` at the start of the text at `at`.
    fn write_marker(&self, at: &Self::Location, marker: &MarkerRef) -> RefResult<()> {
        let content = self.read_content(at)?;
        self.write_content(at, &replace_marker(&content, marker))
    }
}
