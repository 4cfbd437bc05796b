//! Product taxonomy records read from the commerce backend.

use serde::{Deserialize, Serialize};

/// Who may apply or sell a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfessionalLevel {
    Otc,
    Professional,
    MedicalGrade,
    InOfficeOnly,
}

impl ProfessionalLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Otc => "OTC",
            Self::Professional => "PROFESSIONAL",
            Self::MedicalGrade => "MEDICAL_GRADE",
            Self::InOfficeOnly => "IN_OFFICE_ONLY",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "OTC" => Some(Self::Otc),
            "PROFESSIONAL" => Some(Self::Professional),
            "MEDICAL_GRADE" => Some(Self::MedicalGrade),
            "IN_OFFICE_ONLY" => Some(Self::InOfficeOnly),
            _ => None,
        }
    }
}

/// Time of day a product is meant to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsageTime {
    Morning,
    Evening,
    Anytime,
}

impl UsageTime {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "MORNING",
            Self::Evening => "EVENING",
            Self::Anytime => "ANYTIME",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MORNING" => Some(Self::Morning),
            "EVENING" => Some(Self::Evening),
            "ANYTIME" => Some(Self::Anytime),
            _ => None,
        }
    }
}

/// Taxonomy metadata of one product. The core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductTaxonomy {
    pub product_id: String,
    pub category: Option<String>,
    #[serde(default)]
    pub function_ids: Vec<String>,
    #[serde(default)]
    pub concern_ids: Vec<String>,
    #[serde(default)]
    pub target_area_ids: Vec<String>,
    /// Product format/base, e.g. "water-based serum" or "anhydrous balm".
    pub formulation_base: Option<String>,
    pub professional_level: Option<ProfessionalLevel>,
    pub usage_time: Option<UsageTime>,
}

impl ProductTaxonomy {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            ..Self::default()
        }
    }
}

/// Taxonomy plus the free-text ingredient list, as stored per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductProfile {
    pub taxonomy: ProductTaxonomy,
    pub ingredients: Vec<String>,
}
