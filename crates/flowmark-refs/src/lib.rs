//! Workflow markers for Flowmark.
//!
//! A marker is the reference a document keeps to a workflow state: a label
//! plus the state's encoded id, embedded in text as
//! `{{renderer workflow, LABEL, TOKEN}}`. The label keeps the text readable
//! and serves as a fallback when the token no longer resolves.
//!
//! # Hosts
//!
//! A [`MarkerHost`] stores marked text at addressable locations:
//!
//! - [`InMemoryMarkerHost`] -- text blocks keyed by block id
//! - [`FileMarkerHost`] -- lines of a text file, numbered from 1
//!
//! [`state_query`] builds a query block that finds text marked with any of
//! a set of labels.

pub mod error;
pub mod file;
pub mod marker;
pub mod memory;
pub mod query;
pub mod traits;

pub use error::{RefError, RefResult};
pub use file::FileMarkerHost;
pub use marker::{replace_marker, MarkerRef, MARKER_PREFIX};
pub use memory::InMemoryMarkerHost;
pub use query::state_query;
pub use traits::MarkerHost;
