//! Weighted-distance compatibility score between two tensors.
//!
//! `score = max(0, 1 - sqrt(sum_i w_i * (a_i - b_i)^2))`, with pH and
//! irritation risk weighted highest. Weights sum to 1.0.

use crate::model::tensor::TENSOR_DIMENSIONS;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-dimension weights in tensor order.
pub const DIMENSION_WEIGHTS: [f64; TENSOR_DIMENSIONS] = [
    0.15, // ph_level
    0.05, // molecular_weight
    0.10, // active_concentration
    0.05, // lipid_solubility
    0.05, // water_solubility
    0.10, // exfoliation_strength
    0.05, // hydration_intensity
    0.05, // anti_aging_potency
    0.05, // brightening_efficacy
    0.05, // soothing_capacity
    0.05, // barrier_support
    0.10, // penetration_depth
    0.15, // irritation_risk
];

/// Errors for malformed tensor input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    DimensionMismatch { expected: usize, actual: usize },
}

impl Display for TensorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "tensor must have exactly {expected} dimensions, got {actual}"
            ),
        }
    }
}

impl Error for TensorError {}

/// Similarity in `[0, 1]`; identical tensors score 1.0.
///
/// # Errors
/// - Returns `DimensionMismatch` when either input is not 13 long.
pub fn calculate_compatibility_score(a: &[f64], b: &[f64]) -> Result<f64, TensorError> {
    ensure_dimensions(a)?;
    ensure_dimensions(b)?;
    Ok(weighted_similarity(a, b))
}

/// Score of two fixed-size tensors; cannot fail.
pub fn tensor_similarity(a: &[f64; TENSOR_DIMENSIONS], b: &[f64; TENSOR_DIMENSIONS]) -> f64 {
    weighted_similarity(a, b)
}

fn weighted_similarity(a: &[f64], b: &[f64]) -> f64 {
    let weighted_squared: f64 = DIMENSION_WEIGHTS
        .iter()
        .zip(a.iter().zip(b.iter()))
        .map(|(weight, (left, right))| weight * (left - right).powi(2))
        .sum();

    (1.0 - weighted_squared.sqrt()).max(0.0)
}

fn ensure_dimensions(tensor: &[f64]) -> Result<(), TensorError> {
    if tensor.len() != TENSOR_DIMENSIONS {
        return Err(TensorError::DimensionMismatch {
            expected: TENSOR_DIMENSIONS,
            actual: tensor.len(),
        });
    }
    Ok(())
}
