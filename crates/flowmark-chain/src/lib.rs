//! Workflow chain model for Flowmark.
//!
//! A workflow is a chain of [`StateNode`]s linked by `next`. Chains may be
//! linear or circular, and may carry a chain-wide checkbox branch: a side
//! state reachable from every state of the chain that is never part of the
//! forward traversal.
//!
//! Nodes are values addressed by id inside a single owned [`Chain`]; no node
//! is ever shared between chains or between a chain and its caller. Every
//! structural edit produces a freshly linked chain which replaces the old one
//! in the [`ChainForest`].
//!
//! # Modules
//!
//! - [`node`] -- [`StateNode`], the atomic unit of a chain
//! - [`chain`] -- [`Chain`], an id-addressed arena with a designated head
//! - [`walk`] -- the only cycle-safe traversal; everything else builds on it
//! - [`mutation`] -- pure chain-level edits
//! - [`forest`] -- [`ChainForest`]: lookup and the mutation entry points
//! - [`defaults`] -- the workflows seeded into an empty store

pub mod chain;
pub mod defaults;
pub mod error;
pub mod forest;
pub mod mutation;
pub mod node;
pub mod walk;

pub use chain::{Chain, ChainPolicy};
pub use defaults::default_forest;
pub use error::{ChainError, ChainResult};
pub use forest::{ChainForest, DeleteOutcome};
pub use mutation::StatePatch;
pub use node::StateNode;
pub use walk::{materialize, ChainEntry, Walk};
