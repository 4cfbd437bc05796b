//! Directed relationship (edge) between two atoms.
//!
//! # Invariants
//! - Endpoints are atom ids; both must be non-blank.
//! - `strength`, when present, lies in `[0, 1]`.
//! - Several edges may link the same pair with different types.

use super::atom::AtomId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Typed meaning of an edge.
///
/// Serialized as its plain storage string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RelationshipType {
    Enhances,
    Stabilizes,
    Synergizes,
    Conflicts,
    Inhibits,
    Destabilizes,
    Causes,
    Requires,
    Precedes,
    Contains,
    Related,
    Other(String),
}

/// How a relationship type bears on compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Synergy,
    Conflict,
    Neutral,
}

impl RelationshipType {
    /// Stable storage string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Enhances => "enhances",
            Self::Stabilizes => "stabilizes",
            Self::Synergizes => "synergizes",
            Self::Conflicts => "conflicts",
            Self::Inhibits => "inhibits",
            Self::Destabilizes => "destabilizes",
            Self::Causes => "causes",
            Self::Requires => "requires",
            Self::Precedes => "precedes",
            Self::Contains => "contains",
            Self::Related => "related",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Parses a storage string; unknown values are kept as `Other`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "enhances" => Self::Enhances,
            "stabilizes" => Self::Stabilizes,
            "synergizes" => Self::Synergizes,
            "conflicts" => Self::Conflicts,
            "inhibits" => Self::Inhibits,
            "destabilizes" => Self::Destabilizes,
            "causes" => Self::Causes,
            "requires" => Self::Requires,
            "precedes" => Self::Precedes,
            "contains" => Self::Contains,
            "related" => Self::Related,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    /// Synergy for enhancement/stabilization, conflict for interference.
    pub fn interaction(&self) -> InteractionKind {
        match self {
            Self::Enhances | Self::Stabilizes | Self::Synergizes => InteractionKind::Synergy,
            Self::Conflicts | Self::Inhibits | Self::Destabilizes => InteractionKind::Conflict,
            _ => InteractionKind::Neutral,
        }
    }
}

impl From<String> for RelationshipType {
    fn from(value: String) -> Self {
        Self::parse(value.as_str())
    }
}

impl From<RelationshipType> for String {
    fn from(value: RelationshipType) -> Self {
        value.as_str().to_string()
    }
}

impl Display for RelationshipType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for relationship invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationshipValidationError {
    BlankEndpoint { id: String },
    StrengthOutOfRange { id: String, strength: f64 },
}

impl Display for RelationshipValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankEndpoint { id } => {
                write!(f, "relationship endpoints must not be blank: {id}")
            }
            Self::StrengthOutOfRange { id, strength } => write!(
                f,
                "relationship strength ({strength}) must be within [0, 1]: {id}"
            ),
        }
    }
}

impl Error for RelationshipValidationError {}

/// Directed edge `from_atom_id -> to_atom_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkincareRelationship {
    pub id: String,
    pub from_atom_id: AtomId,
    pub to_atom_id: AtomId,
    pub relationship_type: RelationshipType,
    pub strength: Option<f64>,
    pub mechanism: String,
}

impl SkincareRelationship {
    /// Creates an edge with a generated id, no strength and no mechanism.
    pub fn new(
        from_atom_id: impl Into<AtomId>,
        to_atom_id: impl Into<AtomId>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from_atom_id: from_atom_id.into(),
            to_atom_id: to_atom_id.into(),
            relationship_type,
            strength: None,
            mechanism: String::new(),
        }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn with_mechanism(mut self, mechanism: impl Into<String>) -> Self {
        self.mechanism = mechanism.into();
        self
    }

    pub fn validate(&self) -> Result<(), RelationshipValidationError> {
        if self.from_atom_id.trim().is_empty() || self.to_atom_id.trim().is_empty() {
            return Err(RelationshipValidationError::BlankEndpoint {
                id: self.id.clone(),
            });
        }
        if let Some(strength) = self.strength {
            if !(0.0..=1.0).contains(&strength) {
                return Err(RelationshipValidationError::StrengthOutOfRange {
                    id: self.id.clone(),
                    strength,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionKind, RelationshipType, SkincareRelationship};

    #[test]
    fn classifies_interaction_kinds() {
        assert_eq!(RelationshipType::Enhances.interaction(), InteractionKind::Synergy);
        assert_eq!(RelationshipType::Stabilizes.interaction(), InteractionKind::Synergy);
        assert_eq!(RelationshipType::Conflicts.interaction(), InteractionKind::Conflict);
        assert_eq!(RelationshipType::Inhibits.interaction(), InteractionKind::Conflict);
        assert_eq!(RelationshipType::Causes.interaction(), InteractionKind::Neutral);
        assert_eq!(
            RelationshipType::parse("occludes").interaction(),
            InteractionKind::Neutral
        );
    }

    #[test]
    fn parse_keeps_unknown_types() {
        assert_eq!(RelationshipType::parse(" Enhances "), RelationshipType::Enhances);
        assert_eq!(
            RelationshipType::parse("occludes"),
            RelationshipType::Other("occludes".to_string())
        );
        assert_eq!(RelationshipType::parse("occludes").as_str(), "occludes");
    }

    #[test]
    fn validate_rejects_out_of_range_strength() {
        let edge = SkincareRelationship::new("a", "b", RelationshipType::Causes).with_strength(1.5);
        assert!(edge.validate().is_err());
    }
}
