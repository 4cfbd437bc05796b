//! Domain model for the skincare intelligence core.
//!
//! # Responsibility
//! - Define the records read by the tensor, compatibility and causal
//!   subsystems.
//! - Keep graph nodes and edges as plain records keyed by string ids.
//!
//! # Invariants
//! - Every atom resolves to an access tier, even without a threshold.
//! - Relationships reference atoms by id only; no in-memory pointers.

pub mod atom;
pub mod evidence;
pub mod relationship;
pub mod taxonomy;
pub mod tensor;
