//! Pairwise compatibility analysis over graph atoms.
//!
//! # Responsibility
//! - Classify every unordered pair of visible atoms as synergy, conflict
//!   or neutral from the relationships between them.
//! - Aggregate pair outcomes into a 0..=100 verdict, warnings, tips and
//!   an application sequence.
//!
//! # Invariants
//! - Unknown and hidden atoms are dropped silently.
//! - No relationship between a pair is neutral, not a verdict either way.
//! - A conflict edge outweighs any synergy edge for the same pair.
//! - The sequence is deterministic for a given input.

use crate::access::gate::{can_see_atom, AccessLevel};
use crate::config::IntelligenceConfig;
use crate::model::atom::{AtomId, SkincareAtom};
use crate::model::relationship::{InteractionKind, RelationshipType, SkincareRelationship};
use crate::repo::atom_repo::{AtomListQuery, AtomRepository};
use crate::repo::RepoResult;
use log::debug;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

const NEUTRAL_PAIR_SCORE: f64 = 75.0;
const NO_PAIRS_SCORE: u32 = 100;

/// Outcome for one unordered atom pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairInteraction {
    pub atom_a_id: AtomId,
    pub atom_b_id: AtomId,
    pub kind: InteractionKind,
    /// Edge that decided the classification, if any.
    pub relationship_type: Option<RelationshipType>,
    pub strength: Option<f64>,
    pub mechanism: Option<String>,
    /// Pair contribution to the overall score, 0..=100.
    pub score: f64,
}

/// Aggregate verdict for a set of atoms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityResult {
    pub overall_score: u32,
    pub compatible: bool,
    pub interactions: Vec<PairInteraction>,
    pub synergies: Vec<PairInteraction>,
    pub conflicts: Vec<PairInteraction>,
    pub sequence_recommendation: Vec<SkincareAtom>,
    pub warnings: Vec<String>,
    pub tips: Vec<String>,
}

/// Compatibility analysis service.
pub struct CompatibilityService<R: AtomRepository> {
    repo: R,
    config: IntelligenceConfig,
}

impl<R: AtomRepository> CompatibilityService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, IntelligenceConfig::default())
    }

    pub fn with_config(repo: R, config: IntelligenceConfig) -> Self {
        Self { repo, config }
    }

    /// Analyzes every unordered pair among the visible atoms of `atom_ids`.
    pub fn analyze_compatibility(
        &self,
        atom_ids: &[AtomId],
        access_level: AccessLevel,
    ) -> RepoResult<CompatibilityResult> {
        let atoms = self.visible_atoms(atom_ids, access_level)?;

        let mut interactions = Vec::new();
        let mut precedes: Vec<(usize, usize)> = Vec::new();
        let mut warnings = Vec::new();
        let mut tips = Vec::new();

        for (i, left) in atoms.iter().enumerate() {
            for (j, right) in atoms.iter().enumerate().skip(i + 1) {
                let edges = self.repo.relationships_between(&left.id, &right.id)?;
                for edge in &edges {
                    if edge.relationship_type == RelationshipType::Precedes {
                        if edge.from_atom_id == left.id {
                            precedes.push((i, j));
                        } else {
                            precedes.push((j, i));
                        }
                    }
                }

                let interaction = classify_pair(left, right, &edges);
                match interaction.kind {
                    InteractionKind::Conflict => {
                        warnings.push(conflict_warning(left, right, &interaction))
                    }
                    InteractionKind::Synergy => tips.push(synergy_tip(left, right, &interaction)),
                    InteractionKind::Neutral => {}
                }
                interactions.push(interaction);
            }
        }

        let overall_score = if interactions.is_empty() {
            NO_PAIRS_SCORE
        } else {
            let mean = interactions.iter().map(|pair| pair.score).sum::<f64>()
                / interactions.len() as f64;
            mean.round().clamp(0.0, 100.0) as u32
        };

        let synergies: Vec<PairInteraction> = interactions
            .iter()
            .filter(|pair| pair.kind == InteractionKind::Synergy)
            .cloned()
            .collect();
        let conflicts: Vec<PairInteraction> = interactions
            .iter()
            .filter(|pair| pair.kind == InteractionKind::Conflict)
            .cloned()
            .collect();

        let order = recommend_sequence(atoms.len(), &precedes);
        let sequence_recommendation = order
            .into_iter()
            .map(|index| atoms[index].clone())
            .collect();

        debug!(
            "event=compatibility module=compatibility status=ok atoms={} pairs={} synergies={} conflicts={} score={}",
            atoms.len(),
            interactions.len(),
            synergies.len(),
            conflicts.len(),
            overall_score
        );

        Ok(CompatibilityResult {
            overall_score,
            compatible: overall_score >= self.config.compatible_threshold,
            interactions,
            synergies,
            conflicts,
            sequence_recommendation,
            warnings,
            tips,
        })
    }

    /// Resolves ids in input order, dropping duplicates, unknown and hidden atoms.
    fn visible_atoms(
        &self,
        atom_ids: &[AtomId],
        access_level: AccessLevel,
    ) -> RepoResult<Vec<SkincareAtom>> {
        let mut seen = HashSet::new();
        let unique: Vec<AtomId> = atom_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();
        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_id: HashMap<AtomId, SkincareAtom> = self
            .repo
            .list_atoms(&AtomListQuery {
                ids: Some(unique.clone()),
                ..AtomListQuery::default()
            })?
            .into_iter()
            .map(|atom| (atom.id.clone(), atom))
            .collect();

        Ok(unique
            .iter()
            .filter_map(|id| by_id.remove(id))
            .filter(|atom| can_see_atom(access_level, atom))
            .collect())
    }
}

fn classify_pair(
    left: &SkincareAtom,
    right: &SkincareAtom,
    edges: &[SkincareRelationship],
) -> PairInteraction {
    let deciding = edges
        .iter()
        .find(|edge| edge.relationship_type.interaction() == InteractionKind::Conflict)
        .or_else(|| {
            edges
                .iter()
                .find(|edge| edge.relationship_type.interaction() == InteractionKind::Synergy)
        })
        .or_else(|| edges.first());

    let kind = deciding.map_or(InteractionKind::Neutral, |edge| {
        edge.relationship_type.interaction()
    });
    let strength = deciding.and_then(|edge| edge.strength);
    let effective = strength.unwrap_or(1.0).clamp(0.0, 1.0);
    let score = match kind {
        InteractionKind::Synergy => 75.0 + 25.0 * effective,
        InteractionKind::Conflict => 50.0 * (1.0 - effective),
        InteractionKind::Neutral => NEUTRAL_PAIR_SCORE,
    };

    PairInteraction {
        atom_a_id: left.id.clone(),
        atom_b_id: right.id.clone(),
        kind,
        relationship_type: deciding.map(|edge| edge.relationship_type.clone()),
        strength,
        mechanism: deciding
            .map(|edge| edge.mechanism.trim().to_string())
            .filter(|mechanism| !mechanism.is_empty()),
        score,
    }
}

fn conflict_warning(left: &SkincareAtom, right: &SkincareAtom, pair: &PairInteraction) -> String {
    match pair.mechanism.as_deref() {
        Some(mechanism) => format!(
            "Avoid combining {} with {}: {}",
            left.title, right.title, mechanism
        ),
        None => format!("Avoid combining {} with {}", left.title, right.title),
    }
}

fn synergy_tip(left: &SkincareAtom, right: &SkincareAtom, pair: &PairInteraction) -> String {
    match pair.mechanism.as_deref() {
        Some(mechanism) => format!("{} pairs well with {}: {}", left.title, right.title, mechanism),
        None => format!("{} pairs well with {}", left.title, right.title),
    }
}

/// Stable topological order over `(before, after)` index pairs.
///
/// Among ready atoms the lowest input index goes first; atoms left in a
/// cycle are appended in input order.
fn recommend_sequence(count: usize, precedes: &[(usize, usize)]) -> Vec<usize> {
    let mut indegree = vec![0usize; count];
    for &(_, after) in precedes {
        indegree[after] += 1;
    }

    let mut placed = vec![false; count];
    let mut order = Vec::with_capacity(count);
    while let Some(next) = (0..count).find(|&index| !placed[index] && indegree[index] == 0) {
        placed[next] = true;
        order.push(next);
        for &(before, after) in precedes {
            if before == next {
                indegree[after] -= 1;
            }
        }
    }

    order.extend((0..count).filter(|&index| !placed[index]));
    order
}

#[cfg(test)]
mod tests {
    use super::recommend_sequence;

    #[test]
    fn sequence_without_edges_keeps_input_order() {
        assert_eq!(recommend_sequence(3, &[]), vec![0, 1, 2]);
    }

    #[test]
    fn sequence_follows_precedes_edges() {
        assert_eq!(recommend_sequence(3, &[(2, 0)]), vec![1, 2, 0]);
        assert_eq!(recommend_sequence(3, &[(2, 1), (1, 0)]), vec![2, 1, 0]);
    }

    #[test]
    fn sequence_appends_cycle_members_in_input_order() {
        assert_eq!(recommend_sequence(3, &[(0, 1), (1, 0)]), vec![2, 0, 1]);
    }
}
