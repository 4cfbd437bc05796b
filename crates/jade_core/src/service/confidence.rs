//! Confidence of a causal path.

/// Strength assumed for edges stored without one.
pub const UNKNOWN_EDGE_STRENGTH: f64 = 0.5;

/// Chain confidence over edge strengths.
///
/// `(0.6 * min + 0.4 * avg) * 0.95^hops`, clamped to `[0, 1]`. An empty
/// edge list (single-node path) is fully confident.
pub fn chain_confidence(edge_strengths: &[f64]) -> f64 {
    if edge_strengths.is_empty() {
        return 1.0;
    }

    let min_strength = edge_strengths.iter().copied().fold(f64::INFINITY, f64::min);
    let avg_strength = edge_strengths.iter().sum::<f64>() / edge_strengths.len() as f64;

    let base = 0.6 * min_strength + 0.4 * avg_strength;
    let hop_penalty = 0.95_f64.powi(edge_strengths.len().min(i32::MAX as usize) as i32);

    (base * hop_penalty).clamp(0.0, 1.0)
}
