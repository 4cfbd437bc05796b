//! Product tensor extraction and compatibility scoring.
//!
//! # Responsibility
//! - Derive the 13-dimensional feature vector from taxonomy + ingredients.
//! - Score two tensors with the domain-weighted distance metric.
//!
//! # Invariants
//! - Extraction never fails; unmatched dimensions fall back to defaults.
//! - Scoring rejects vectors whose length is not 13.
//! - Keyword tables and weights are immutable process-wide data.

pub mod extractor;
pub mod keywords;
pub mod scoring;
