//! Line-addressed marker host over a text file.
//!
//! Each line is one block. Lines are numbered from 1. Rewrites go through a
//! temporary file in the same directory and are renamed into place; line
//! endings and a trailing newline are preserved.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{RefError, RefResult};
use crate::traits::MarkerHost;

/// A [`MarkerHost`] whose blocks are the lines of one file.
#[derive(Debug, Clone)]
pub struct FileMarkerHost {
    path: PathBuf,
}

/// File text split into lines, remembering a final newline.
struct Lines {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl Lines {
    fn parse(text: &str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n').map(str::to_string).collect()
        };
        Self {
            lines,
            trailing_newline,
        }
    }

    fn index(&self, line: usize) -> Option<usize> {
        let index = line.checked_sub(1)?;
        (index < self.lines.len()).then_some(index)
    }

    fn join(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }
}

impl FileMarkerHost {
    /// Address the lines of the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_lines(&self) -> RefResult<Lines> {
        Ok(Lines::parse(&fs::read_to_string(&self.path)?))
    }

    fn missing(&self, line: usize) -> RefError {
        RefError::LocationNotFound(format!("{}:{line}", self.path.display()))
    }
}

impl MarkerHost for FileMarkerHost {
    type Location = usize;

    fn read_content(&self, at: &usize) -> RefResult<String> {
        let lines = self.read_lines()?;
        let index = lines.index(*at).ok_or_else(|| self.missing(*at))?;
        let line = &lines.lines[index];
        Ok(line.strip_suffix('\r').unwrap_or(line).to_string())
    }

    fn write_content(&self, at: &usize, content: &str) -> RefResult<()> {
        let mut lines = self.read_lines()?;
        let index = lines.index(*at).ok_or_else(|| self.missing(*at))?;
        let carriage_return = if lines.lines[index].ends_with('\r') { "\r" } else { "" };
        lines.lines[index] = format!("{content}{carriage_return}");

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(lines.join().as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), line = *at, "rewrote marked line");
        Ok(())
    }
}
