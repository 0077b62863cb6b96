//! Foundation types for Flowmark.
//!
//! This crate provides the identity and presentation primitives shared by every
//! other Flowmark crate.
//!
//! # Key Types
//!
//! - [`StateId`] -- Integer identity of a workflow state, with the compact base-36
//!   token encoding used to reference a state from document text
//! - [`IdSource`] -- Source of fresh state identifiers ([`ClockIdGenerator`] in
//!   production, [`SequentialIds`] for deterministic hosts and tests)
//! - [`Color`] -- Opaque presentation token attached to every state

pub mod color;
pub mod error;
pub mod generator;
pub mod id;

pub use color::{Color, PALETTE};
pub use error::TypeError;
pub use generator::{ClockIdGenerator, IdSource, SequentialIds};
pub use id::{StateId, CHECKBOX_TOKEN_OFFSET};
