//! Access levels and the threshold gate.

use crate::model::atom::{KnowledgeThreshold, SkincareAtom};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller permission tier, ordered `Public < Registered < Professional < Expert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Public,
    Registered,
    Professional,
    Expert,
}

/// Wire string for the public access level.
pub const ACCESS_LEVEL_PUBLIC: &str = "public";
/// Wire string for the registered access level.
pub const ACCESS_LEVEL_REGISTERED: &str = "registered";
/// Wire string for the professional access level.
pub const ACCESS_LEVEL_PROFESSIONAL: &str = "professional";
/// Wire string for the expert access level.
pub const ACCESS_LEVEL_EXPERT: &str = "expert";

impl AccessLevel {
    pub const ALL: [AccessLevel; 4] = [
        Self::Public,
        Self::Registered,
        Self::Professional,
        Self::Expert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => ACCESS_LEVEL_PUBLIC,
            Self::Registered => ACCESS_LEVEL_REGISTERED,
            Self::Professional => ACCESS_LEVEL_PROFESSIONAL,
            Self::Expert => ACCESS_LEVEL_EXPERT,
        }
    }

    /// Access class a threshold tier belongs to.
    pub fn required_for(threshold: KnowledgeThreshold) -> Self {
        match threshold {
            KnowledgeThreshold::T1 | KnowledgeThreshold::T2 | KnowledgeThreshold::T3 => {
                Self::Public
            }
            KnowledgeThreshold::T4 | KnowledgeThreshold::T5 => Self::Registered,
            KnowledgeThreshold::T6 | KnowledgeThreshold::T7 => Self::Professional,
            KnowledgeThreshold::T8 => Self::Expert,
        }
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses an access level from its wire string.
pub fn parse_access_level(value: &str) -> Result<AccessLevel, AccessLevelError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(AccessLevelError::EmptyAccessLevel);
    }

    match normalized.to_ascii_lowercase().as_str() {
        ACCESS_LEVEL_PUBLIC => Ok(AccessLevel::Public),
        ACCESS_LEVEL_REGISTERED => Ok(AccessLevel::Registered),
        ACCESS_LEVEL_PROFESSIONAL => Ok(AccessLevel::Professional),
        ACCESS_LEVEL_EXPERT => Ok(AccessLevel::Expert),
        _ => Err(AccessLevelError::UnsupportedAccessLevel(
            normalized.to_string(),
        )),
    }
}

/// Access level parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessLevelError {
    EmptyAccessLevel,
    UnsupportedAccessLevel(String),
}

impl Display for AccessLevelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAccessLevel => write!(f, "access level must not be empty"),
            Self::UnsupportedAccessLevel(value) => {
                write!(f, "access level is unsupported: {value}")
            }
        }
    }
}

impl Error for AccessLevelError {}

/// Returns whether `access_level` may see content gated at `threshold`.
///
/// `None` is the lowest public tier.
pub fn has_access_to_threshold(
    access_level: AccessLevel,
    threshold: Option<KnowledgeThreshold>,
) -> bool {
    let threshold = threshold.unwrap_or(KnowledgeThreshold::DEFAULT);
    AccessLevel::required_for(threshold) <= access_level
}

/// Highest tier visible at `access_level`. Used for UI hints only.
pub fn max_accessible_threshold(access_level: AccessLevel) -> KnowledgeThreshold {
    KnowledgeThreshold::ALL
        .iter()
        .rev()
        .copied()
        .find(|threshold| AccessLevel::required_for(*threshold) <= access_level)
        .unwrap_or(KnowledgeThreshold::DEFAULT)
}

/// Whether one atom passes the gate.
pub fn can_see_atom(access_level: AccessLevel, atom: &SkincareAtom) -> bool {
    has_access_to_threshold(access_level, Some(atom.effective_threshold()))
}

/// Drops atoms above the caller's tier, preserving order.
pub fn filter_accessible(atoms: Vec<SkincareAtom>, access_level: AccessLevel) -> Vec<SkincareAtom> {
    atoms
        .into_iter()
        .filter(|atom| can_see_atom(access_level, atom))
        .collect()
}
