//! Persistence for Flowmark workflow forests.
//!
//! A chain is stored as a flat list of [`StateRecord`]s in forward order, one
//! per reachable state, with links written as ids. The loop marker is never
//! stored; a circular chain is recognized by its closing `nextId` and its
//! `circular` flag. The forest is a list of such lists inside a
//! [`ForestDocument`], whose JSON keys match data written by earlier
//! releases so existing settings load unchanged.
//!
//! # Storage Backends
//!
//! All backends implement the [`ForestStore`] trait:
//!
//! - [`InMemoryForestStore`] -- lock-protected document for tests and embedding
//! - [`FileForestStore`] -- a JSON file replaced atomically on every save

pub mod document;
pub mod error;
pub mod file;
pub mod memory;
pub mod record;
pub mod traits;

pub use document::ForestDocument;
pub use error::{StoreError, StoreResult};
pub use file::FileForestStore;
pub use memory::InMemoryForestStore;
pub use record::{deserialize, serialize, BranchRecord, StateRecord};
pub use traits::ForestStore;
