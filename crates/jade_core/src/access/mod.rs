//! Knowledge-threshold access gating.
//!
//! # Responsibility
//! - Map caller access levels to the threshold tiers they may see.
//! - Provide the predicate used by list and graph filtering call sites.
//!
//! # Invariants
//! - Access classes are monotonic: a higher level sees everything a lower
//!   level sees.
//! - Filtering never reveals whether a hidden atom exists.

pub mod gate;
