//! Claim evidence attached to atoms.
//!
//! Evidence volume and level feed the evidence-strength score of a
//! why-explanation.

use super::atom::AtomId;
use serde::{Deserialize, Serialize};

/// Study design behind a claim, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceLevel {
    Anecdotal,
    InVitro,
    Animal,
    Observational,
    ClinicalTrial,
    MetaAnalysis,
}

impl EvidenceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anecdotal => "anecdotal",
            Self::InVitro => "in_vitro",
            Self::Animal => "animal",
            Self::Observational => "observational",
            Self::ClinicalTrial => "clinical_trial",
            Self::MetaAnalysis => "meta_analysis",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "anecdotal" => Some(Self::Anecdotal),
            "in_vitro" => Some(Self::InVitro),
            "animal" => Some(Self::Animal),
            "observational" => Some(Self::Observational),
            "clinical_trial" => Some(Self::ClinicalTrial),
            "meta_analysis" => Some(Self::MetaAnalysis),
            _ => None,
        }
    }

    /// Contribution of one claim at this level, in `(0, 1]`.
    pub fn weight(self) -> f64 {
        match self {
            Self::Anecdotal => 0.1,
            Self::InVitro => 0.3,
            Self::Animal => 0.4,
            Self::Observational => 0.6,
            Self::ClinicalTrial => 0.85,
            Self::MetaAnalysis => 1.0,
        }
    }
}

/// One evidence record backing a claim about an atom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimEvidence {
    pub atom_id: AtomId,
    pub claim: String,
    pub level: EvidenceLevel,
    pub source: Option<String>,
}

impl ClaimEvidence {
    pub fn new(atom_id: impl Into<AtomId>, claim: impl Into<String>, level: EvidenceLevel) -> Self {
        Self {
            atom_id: atom_id.into(),
            claim: claim.into(),
            level,
            source: None,
        }
    }
}

/// Aggregates evidence into a `[0, 1]` strength.
///
/// Mean level weight scaled by a volume factor `1 - 0.5^count`, so more
/// claims at the same level raise the score with diminishing returns.
pub fn evidence_strength(evidence: &[ClaimEvidence]) -> f64 {
    if evidence.is_empty() {
        return 0.0;
    }
    let count = evidence.len();
    let mean = evidence.iter().map(|item| item.level.weight()).sum::<f64>() / count as f64;
    let volume = 1.0 - 0.5_f64.powi(count.min(64) as i32);
    (mean * volume).clamp(0.0, 1.0)
}
