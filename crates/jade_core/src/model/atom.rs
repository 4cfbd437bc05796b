//! Skincare atom model.
//!
//! # Responsibility
//! - Define the causal-graph node record and its knowledge threshold tier.
//! - Provide validation shared by repository write/read paths.
//!
//! # Invariants
//! - `id` and `title` are never blank.
//! - A missing `knowledge_threshold` resolves to the lowest public tier.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier of an atom in the causal graph.
pub type AtomId = String;

/// Ordered content-gating tier attached to an atom.
///
/// Declaration order is the tier order, so `T1 < T8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KnowledgeThreshold {
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    T8,
}

impl KnowledgeThreshold {
    /// All tiers in ascending order.
    pub const ALL: [KnowledgeThreshold; 8] = [
        Self::T1,
        Self::T2,
        Self::T3,
        Self::T4,
        Self::T5,
        Self::T6,
        Self::T7,
        Self::T8,
    ];

    /// Tier assumed for atoms stored without an explicit threshold.
    pub const DEFAULT: KnowledgeThreshold = Self::T1;

    /// Stable storage/wire string (`T1`..`T8`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::T1 => "T1",
            Self::T2 => "T2",
            Self::T3 => "T3",
            Self::T4 => "T4",
            Self::T5 => "T5",
            Self::T6 => "T6",
            Self::T7 => "T7",
            Self::T8 => "T8",
        }
    }

    /// Parses `T1`..`T8` (case-insensitive, surrounding whitespace ignored).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "T1" => Some(Self::T1),
            "T2" => Some(Self::T2),
            "T3" => Some(Self::T3),
            "T4" => Some(Self::T4),
            "T5" => Some(Self::T5),
            "T6" => Some(Self::T6),
            "T7" => Some(Self::T7),
            "T8" => Some(Self::T8),
            _ => None,
        }
    }
}

impl Display for KnowledgeThreshold {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for atom invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomValidationError {
    BlankId,
    BlankTitle { id: AtomId },
}

impl Display for AtomValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "atom id must not be blank"),
            Self::BlankTitle { id } => write!(f, "atom title must not be blank: {id}"),
        }
    }
}

impl Error for AtomValidationError {}

/// Node of the causal-knowledge graph: an ingredient or skincare concept.
///
/// Text is split into three progressive-disclosure layers: `glance` for a
/// one-liner, `scan` for a short paragraph, `study` for the full write-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkincareAtom {
    pub id: AtomId,
    pub title: String,
    pub glance: String,
    pub scan: String,
    pub study: String,
    /// `None` is treated as [`KnowledgeThreshold::DEFAULT`].
    pub knowledge_threshold: Option<KnowledgeThreshold>,
    pub why_it_works: Option<String>,
    pub causal_summary: Option<String>,
}

impl SkincareAtom {
    /// Creates an atom with a generated id and empty text layers.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    /// Creates an atom with a caller-provided id.
    ///
    /// Used by import/seed paths where identity already exists externally.
    pub fn with_id(id: impl Into<AtomId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            glance: String::new(),
            scan: String::new(),
            study: String::new(),
            knowledge_threshold: None,
            why_it_works: None,
            causal_summary: None,
        }
    }

    /// Builder-style threshold setter.
    pub fn with_threshold(mut self, threshold: KnowledgeThreshold) -> Self {
        self.knowledge_threshold = Some(threshold);
        self
    }

    /// Tier used for access checks; never "inaccessible".
    pub fn effective_threshold(&self) -> KnowledgeThreshold {
        self.knowledge_threshold
            .unwrap_or(KnowledgeThreshold::DEFAULT)
    }

    /// Validates record-level invariants.
    pub fn validate(&self) -> Result<(), AtomValidationError> {
        if self.id.trim().is_empty() {
            return Err(AtomValidationError::BlankId);
        }
        if self.title.trim().is_empty() {
            return Err(AtomValidationError::BlankTitle {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct SkincareAtomWire {
    id: AtomId,
    title: String,
    #[serde(default)]
    glance: String,
    #[serde(default)]
    scan: String,
    #[serde(default)]
    study: String,
    #[serde(default)]
    knowledge_threshold: Option<KnowledgeThreshold>,
    #[serde(default)]
    why_it_works: Option<String>,
    #[serde(default)]
    causal_summary: Option<String>,
}

impl<'de> Deserialize<'de> for SkincareAtom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = SkincareAtomWire::deserialize(deserializer)?;
        let atom = Self {
            id: wire.id,
            title: wire.title,
            glance: wire.glance,
            scan: wire.scan,
            study: wire.study,
            knowledge_threshold: wire.knowledge_threshold,
            why_it_works: wire.why_it_works,
            causal_summary: wire.causal_summary,
        };
        atom.validate().map_err(serde::de::Error::custom)?;
        Ok(atom)
    }
}
