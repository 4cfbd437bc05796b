//! Causal graph navigation over the atom repository.
//!
//! # Responsibility
//! - Depth-bounded, access-filtered breadth-first walks from a start atom.
//! - Shortest downstream path search between two atoms.
//! - Why-explanations combining stored narrative, path and evidence.
//!
//! # Invariants
//! - Unknown atom ids yield empty results or `None`, never errors.
//! - The start atom of a chain is always node 0, whatever its threshold.
//! - Hidden atoms end their branch; their edges are not explored.
//! - Each atom is reported once, at its shallowest depth.
//! - Each depth level issues one relationship read per edge direction.

use crate::access::gate::{can_see_atom, AccessLevel};
use crate::config::IntelligenceConfig;
use crate::model::atom::{AtomId, SkincareAtom};
use crate::model::evidence::evidence_strength;
use crate::model::relationship::SkincareRelationship;
use crate::repo::atom_repo::{AtomListQuery, AtomRepository, EdgeDirection};
use crate::repo::RepoResult;
use crate::service::confidence::{chain_confidence, UNKNOWN_EDGE_STRENGTH};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Traversal direction relative to edge orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CausalDirection {
    /// Follow edges toward their source (`to == current`).
    Upstream,
    /// Follow edges toward their target (`from == current`).
    Downstream,
    Both,
}

impl CausalDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upstream => "UPSTREAM",
            Self::Downstream => "DOWNSTREAM",
            Self::Both => "BOTH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "UPSTREAM" => Some(Self::Upstream),
            "DOWNSTREAM" => Some(Self::Downstream),
            "BOTH" => Some(Self::Both),
            _ => None,
        }
    }

    fn edge_directions(self) -> &'static [EdgeDirection] {
        match self {
            Self::Upstream => &[EdgeDirection::Incoming],
            Self::Downstream => &[EdgeDirection::Outgoing],
            Self::Both => &[EdgeDirection::Outgoing, EdgeDirection::Incoming],
        }
    }
}

impl From<EdgeDirection> for CausalDirection {
    fn from(value: EdgeDirection) -> Self {
        match value {
            EdgeDirection::Outgoing => Self::Downstream,
            EdgeDirection::Incoming => Self::Upstream,
        }
    }
}

/// One atom reached by a causal chain walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CausalChainNode {
    pub atom: SkincareAtom,
    /// Hop count from the start atom.
    pub depth: u32,
    pub direction: CausalDirection,
    /// Edge that led here; `None` for the start atom.
    pub relationship: Option<SkincareRelationship>,
    pub mechanism_summary: Option<String>,
}

/// One step of a causal path, in order from source to target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CausalPathStep {
    pub step: usize,
    pub atom: SkincareAtom,
    /// Edge from the previous step; `None` for the first step.
    pub relationship: Option<SkincareRelationship>,
}

/// Explanation of why an atom works, optionally toward a target atom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhyExplanation {
    pub atom_id: AtomId,
    pub title: String,
    pub why_it_works: Option<String>,
    pub causal_summary: Option<String>,
    pub path: Vec<CausalPathStep>,
    pub confidence: f64,
    pub evidence_strength: f64,
    pub evidence_count: usize,
}

/// Causal navigation service.
pub struct CausalService<R: AtomRepository> {
    repo: R,
    config: IntelligenceConfig,
}

impl<R: AtomRepository> CausalService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, IntelligenceConfig::default())
    }

    pub fn with_config(repo: R, config: IntelligenceConfig) -> Self {
        Self { repo, config }
    }

    /// Walks the graph from `start_atom_id` up to `max_depth` hops.
    ///
    /// `max_depth` is clamped to the configured ceiling and the walk stops
    /// once the configured node ceiling is reached.
    pub fn navigate_causal_chain(
        &self,
        start_atom_id: &str,
        direction: CausalDirection,
        max_depth: u32,
        access_level: AccessLevel,
    ) -> RepoResult<Vec<CausalChainNode>> {
        let started_at = Instant::now();
        let Some(start) = self.repo.get_atom(start_atom_id)? else {
            debug!("event=causal_chain module=causal status=not_found");
            return Ok(Vec::new());
        };

        let depth_limit = max_depth.min(self.config.max_depth);
        if depth_limit < max_depth {
            debug!(
                "event=causal_chain module=causal status=clamped requested_depth={max_depth} max_depth={depth_limit}"
            );
        }

        let mut visited: HashSet<AtomId> = HashSet::from([start.id.clone()]);
        let mut frontier: Vec<AtomId> = vec![start.id.clone()];
        let mut nodes = vec![CausalChainNode {
            atom: start,
            depth: 0,
            direction,
            relationship: None,
            mechanism_summary: None,
        }];

        'levels: for depth in 1..=depth_limit {
            if frontier.is_empty() {
                break;
            }
            let mut next_frontier = Vec::new();

            for edge_direction in direction.edge_directions() {
                let edges = self.repo.relationships(&frontier, *edge_direction)?;
                let atoms = self.load_atoms(&edges, *edge_direction, &visited)?;

                for edge in edges {
                    if nodes.len() >= self.config.max_nodes {
                        break 'levels;
                    }
                    let target_id = edge_direction.target(&edge).to_string();
                    if visited.contains(&target_id) {
                        continue;
                    }
                    let Some(atom) = atoms.get(&target_id) else {
                        continue;
                    };
                    visited.insert(target_id.clone());
                    if !can_see_atom(access_level, atom) {
                        continue;
                    }

                    let mechanism_summary =
                        summarize_mechanism(&edge.mechanism, self.config.mechanism_summary_chars);
                    next_frontier.push(target_id);
                    nodes.push(CausalChainNode {
                        atom: atom.clone(),
                        depth,
                        direction: CausalDirection::from(*edge_direction),
                        relationship: Some(edge),
                        mechanism_summary,
                    });
                }
            }

            frontier = next_frontier;
        }

        debug!(
            "event=causal_chain module=causal status=ok direction={} nodes={} duration_ms={}",
            direction.as_str(),
            nodes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(nodes)
    }

    /// Shortest downstream path from `from_atom_id` to `to_atom_id`.
    ///
    /// Returns an empty list when either endpoint is missing or the target
    /// is not reachable through visible atoms. `from == to` yields the
    /// single-step path.
    pub fn find_causal_path(
        &self,
        from_atom_id: &str,
        to_atom_id: &str,
        access_level: AccessLevel,
    ) -> RepoResult<Vec<CausalPathStep>> {
        let started_at = Instant::now();
        let Some(from) = self.repo.get_atom(from_atom_id)? else {
            return Ok(Vec::new());
        };
        let Some(to) = self.repo.get_atom(to_atom_id)? else {
            return Ok(Vec::new());
        };

        if from.id == to.id {
            return Ok(vec![CausalPathStep {
                step: 0,
                atom: from,
                relationship: None,
            }]);
        }
        if !can_see_atom(access_level, &to) {
            return Ok(Vec::new());
        }

        let mut visited: HashSet<AtomId> = HashSet::from([from.id.clone()]);
        let mut parents: HashMap<AtomId, (AtomId, SkincareRelationship)> = HashMap::new();
        let mut reached: HashMap<AtomId, SkincareAtom> = HashMap::new();
        let mut frontier: Vec<AtomId> = vec![from.id.clone()];
        let direction = EdgeDirection::Outgoing;

        for _ in 0..self.config.max_depth {
            if frontier.is_empty() || visited.len() >= self.config.max_nodes {
                break;
            }
            let edges = self.repo.relationships(&frontier, direction)?;
            let atoms = self.load_atoms(&edges, direction, &visited)?;
            let mut next_frontier = Vec::new();

            for edge in edges {
                let target_id = direction.target(&edge).to_string();
                if visited.contains(&target_id) {
                    continue;
                }
                let Some(atom) = atoms.get(&target_id) else {
                    continue;
                };
                visited.insert(target_id.clone());
                if !can_see_atom(access_level, atom) {
                    continue;
                }

                parents.insert(target_id.clone(), (edge.from_atom_id.clone(), edge));
                reached.insert(target_id.clone(), atom.clone());

                if target_id == to.id {
                    let path = rebuild_path(from, &to.id, &parents, &mut reached);
                    debug!(
                        "event=causal_path module=causal status=ok steps={} duration_ms={}",
                        path.len(),
                        started_at.elapsed().as_millis()
                    );
                    return Ok(path);
                }
                next_frontier.push(target_id);
            }

            frontier = next_frontier;
        }

        debug!(
            "event=causal_path module=causal status=not_found explored={} duration_ms={}",
            visited.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Vec::new())
    }

    /// Stored causal summary of an atom; `None` when the atom is missing.
    pub fn get_causal_summary(&self, atom_id: &str) -> RepoResult<Option<String>> {
        Ok(self
            .repo
            .get_atom(atom_id)?
            .and_then(|atom| atom.causal_summary))
    }

    /// Stored why-it-works text of an atom; `None` when the atom is missing.
    pub fn get_why_it_works(&self, atom_id: &str) -> RepoResult<Option<String>> {
        Ok(self.repo.get_atom(atom_id)?.and_then(|atom| atom.why_it_works))
    }

    /// Composes a why-explanation. `None` only when `atom_id` is missing.
    ///
    /// Without a target the path is the atom alone. With a target that
    /// cannot be reached the path is empty and confidence is 0.
    pub fn generate_why_explanation(
        &self,
        atom_id: &str,
        target_atom_id: Option<&str>,
        access_level: AccessLevel,
    ) -> RepoResult<Option<WhyExplanation>> {
        let Some(atom) = self.repo.get_atom(atom_id)? else {
            return Ok(None);
        };

        let path = match target_atom_id {
            Some(target) => self.find_causal_path(atom_id, target, access_level)?,
            None => vec![CausalPathStep {
                step: 0,
                atom: atom.clone(),
                relationship: None,
            }],
        };

        let confidence = if path.is_empty() {
            0.0
        } else {
            let strengths: Vec<f64> = path
                .iter()
                .filter_map(|step| step.relationship.as_ref())
                .map(|edge| edge.strength.unwrap_or(UNKNOWN_EDGE_STRENGTH))
                .collect();
            chain_confidence(&strengths)
        };

        let evidence = self.repo.list_evidence(atom_id)?;

        Ok(Some(WhyExplanation {
            atom_id: atom.id,
            title: atom.title,
            why_it_works: atom.why_it_works,
            causal_summary: atom.causal_summary,
            path,
            confidence,
            evidence_strength: evidence_strength(&evidence),
            evidence_count: evidence.len(),
        }))
    }

    /// One batched atom read for the unvisited targets of `edges`.
    fn load_atoms(
        &self,
        edges: &[SkincareRelationship],
        direction: EdgeDirection,
        visited: &HashSet<AtomId>,
    ) -> RepoResult<HashMap<AtomId, SkincareAtom>> {
        let mut ids: Vec<AtomId> = Vec::new();
        for edge in edges {
            let target = direction.target(edge);
            if !visited.contains(target) && !ids.iter().any(|id| id == target) {
                ids.push(target.to_string());
            }
        }
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let atoms = self.repo.list_atoms(&AtomListQuery {
            ids: Some(ids),
            ..AtomListQuery::default()
        })?;
        Ok(atoms
            .into_iter()
            .map(|atom| (atom.id.clone(), atom))
            .collect())
    }
}

fn rebuild_path(
    from: SkincareAtom,
    to_id: &str,
    parents: &HashMap<AtomId, (AtomId, SkincareRelationship)>,
    reached: &mut HashMap<AtomId, SkincareAtom>,
) -> Vec<CausalPathStep> {
    let mut reversed: Vec<(SkincareAtom, SkincareRelationship)> = Vec::new();
    let mut current = to_id.to_string();
    while let Some((parent_id, edge)) = parents.get(&current) {
        if let Some(atom) = reached.remove(&current) {
            reversed.push((atom, edge.clone()));
        }
        current = parent_id.clone();
    }

    let mut path = vec![CausalPathStep {
        step: 0,
        atom: from,
        relationship: None,
    }];
    for (atom, edge) in reversed.into_iter().rev() {
        path.push(CausalPathStep {
            step: path.len(),
            atom,
            relationship: Some(edge),
        });
    }
    path
}

/// First sentence of a mechanism, whitespace-collapsed and length-capped.
///
/// A sentence ends at `.`, `!` or `?` followed by a space.
fn summarize_mechanism(mechanism: &str, max_chars: usize) -> Option<String> {
    let collapsed = mechanism.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }

    let sentence_end = collapsed
        .char_indices()
        .zip(collapsed.chars().skip(1))
        .find(|&((_, ch), next)| matches!(ch, '.' | '!' | '?') && next == ' ')
        .map(|((index, _), _)| index);
    let first_sentence = match sentence_end {
        Some(end) => &collapsed[..=end],
        None => collapsed.as_str(),
    };

    let mut summary: String = first_sentence.chars().take(max_chars).collect();
    if first_sentence.chars().count() > max_chars {
        summary.push_str("...");
    }
    Some(summary)
}
