//! Curated keyword tables driving tensor extraction.
//!
//! All keywords are lowercase and matched as substrings of lowercased
//! ingredient (or formulation base) text. Tiers are listed in priority
//! order; the first tier with any match wins.

use crate::model::taxonomy::ProfessionalLevel;
use crate::model::tensor::TensorDimension;

/// One priority tier of a tiered dimension.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTier {
    pub value: f64,
    pub keywords: &'static [&'static str],
}

/// Dimension resolved by the first matching tier.
#[derive(Debug, Clone, Copy)]
pub struct TieredRule {
    pub dimension: TensorDimension,
    pub tiers: &'static [KeywordTier],
    pub default: f64,
}

/// Dimension accumulated per matching ingredient, capped at 1.0.
#[derive(Debug, Clone, Copy)]
pub struct CountedRule {
    pub dimension: TensorDimension,
    pub per_match: f64,
    pub keywords: &'static [&'static str],
}

pub const PH_RULE: TieredRule = TieredRule {
    dimension: TensorDimension::PhLevel,
    tiers: &[
        KeywordTier {
            value: 0.3,
            keywords: &[
                "glycolic",
                "lactic acid",
                "salicylic",
                "mandelic",
                "ascorbic acid",
                "citric acid",
                "azelaic",
                "malic acid",
            ],
        },
        KeywordTier {
            value: 0.7,
            keywords: &[
                "sodium hydroxide",
                "potassium hydroxide",
                "sodium bicarbonate",
                "sodium carbonate",
                "saponified",
                "soap",
            ],
        },
    ],
    default: 0.5,
};

pub const MOLECULAR_WEIGHT_RULE: TieredRule = TieredRule {
    dimension: TensorDimension::MolecularWeight,
    tiers: &[
        KeywordTier {
            value: 0.3,
            keywords: &[
                "glycolic",
                "urea",
                "caffeine",
                "low molecular weight",
                "hydrolyzed",
            ],
        },
        KeywordTier {
            value: 0.8,
            keywords: &[
                "peptide",
                "collagen",
                "hyaluron",
                "polyglutamic",
                "elastin",
            ],
        },
    ],
    default: 0.5,
};

/// Ingredients that push concentration up one notch.
pub const STRONG_ACTIVE_KEYWORDS: &[&str] = &[
    "tretinoin",
    "retinol",
    "glycolic",
    "salicylic",
    "hydroquinone",
    "benzoyl peroxide",
    "trichloroacetic",
    "ascorbic acid",
];

/// Bonus added on a strong active match, before capping at 1.0.
pub const STRONG_ACTIVE_BONUS: f64 = 0.2;

/// Concentration used when the professional level is unknown.
pub const DEFAULT_CONCENTRATION: f64 = 0.3;

/// Base active concentration by professional level.
pub fn concentration_base(level: Option<ProfessionalLevel>) -> f64 {
    match level {
        Some(ProfessionalLevel::Otc) => 0.3,
        Some(ProfessionalLevel::Professional) => 0.6,
        Some(ProfessionalLevel::MedicalGrade) => 0.8,
        Some(ProfessionalLevel::InOfficeOnly) => 1.0,
        None => DEFAULT_CONCENTRATION,
    }
}

pub const LIPID_SOLUBILITY_RULE: CountedRule = CountedRule {
    dimension: TensorDimension::LipidSolubility,
    per_match: 0.25,
    keywords: &[
        "oil",
        "squalane",
        "tocopherol",
        "vitamin e",
        "retinol",
        "retinyl",
        "butter",
        "bakuchiol",
        "ascorbyl palmitate",
    ],
};

/// Matched against the formulation base, not ingredients.
pub const WATER_SOLUBILITY_RULE: TieredRule = TieredRule {
    dimension: TensorDimension::WaterSolubility,
    tiers: &[
        KeywordTier {
            value: 0.8,
            keywords: &["water", "aqua", "aqueous", "gel", "toner", "essence"],
        },
        KeywordTier {
            value: 0.2,
            keywords: &["oil", "anhydrous", "balm", "ointment", "butter"],
        },
    ],
    default: 0.5,
};

pub const EXFOLIATION_RULE: TieredRule = TieredRule {
    dimension: TensorDimension::ExfoliationStrength,
    tiers: &[
        KeywordTier {
            value: 1.0,
            keywords: &["glycolic", "trichloroacetic", "jessner", "phenol peel"],
        },
        KeywordTier {
            value: 0.6,
            keywords: &["lactic acid", "salicylic", "mandelic", "malic acid"],
        },
        KeywordTier {
            value: 0.3,
            keywords: &[
                "gluconolactone",
                "lactobionic",
                "papain",
                "bromelain",
                "enzyme",
                "jojoba beads",
            ],
        },
    ],
    default: 0.0,
};

pub const HYDRATION_RULE: CountedRule = CountedRule {
    dimension: TensorDimension::HydrationIntensity,
    per_match: 0.2,
    keywords: &[
        "hyaluron",
        "glycerin",
        "sodium pca",
        "panthenol",
        "aloe",
        "urea",
        "betaine",
        "trehalose",
    ],
};

pub const ANTI_AGING_RULE: TieredRule = TieredRule {
    dimension: TensorDimension::AntiAgingPotency,
    tiers: &[
        KeywordTier {
            value: 1.0,
            keywords: &["tretinoin", "retinol", "retinal", "adapalene", "growth factor"],
        },
        KeywordTier {
            value: 0.6,
            keywords: &["peptide", "bakuchiol", "retinyl", "ascorbic", "vitamin c"],
        },
        KeywordTier {
            value: 0.3,
            keywords: &["niacinamide", "coenzyme q10", "resveratrol", "ferulic", "green tea"],
        },
    ],
    default: 0.0,
};

pub const BRIGHTENING_RULE: CountedRule = CountedRule {
    dimension: TensorDimension::BrighteningEfficacy,
    per_match: 0.25,
    keywords: &[
        "niacinamide",
        "ascorbic",
        "vitamin c",
        "arbutin",
        "kojic",
        "tranexamic",
        "licorice",
        "azelaic",
        "hydroquinone",
    ],
};

pub const SOOTHING_RULE: CountedRule = CountedRule {
    dimension: TensorDimension::SoothingCapacity,
    per_match: 0.25,
    keywords: &[
        "centella",
        "madecassoside",
        "allantoin",
        "bisabolol",
        "aloe",
        "colloidal oatmeal",
        "chamomile",
        "panthenol",
        "green tea",
    ],
};

pub const BARRIER_RULE: CountedRule = CountedRule {
    dimension: TensorDimension::BarrierSupport,
    per_match: 0.25,
    keywords: &[
        "ceramide",
        "cholesterol",
        "fatty acid",
        "phytosphingosine",
        "squalane",
        "niacinamide",
        "linoleic",
    ],
};

pub const PENETRATION_RULE: TieredRule = TieredRule {
    dimension: TensorDimension::PenetrationDepth,
    tiers: &[
        KeywordTier {
            value: 0.8,
            keywords: &[
                "retinol",
                "retinal",
                "tretinoin",
                "liposom",
                "encapsulated",
                "ethoxydiglycol",
            ],
        },
        KeywordTier {
            value: 0.1,
            keywords: &["zinc oxide", "titanium dioxide", "dimethicone", "petrolatum"],
        },
    ],
    default: 0.3,
};

pub const IRRITATION_RULE: TieredRule = TieredRule {
    dimension: TensorDimension::IrritationRisk,
    tiers: &[
        KeywordTier {
            value: 0.9,
            keywords: &[
                "tretinoin",
                "benzoyl peroxide",
                "hydroquinone",
                "trichloroacetic",
                "adapalene",
                "resorcinol",
            ],
        },
        KeywordTier {
            value: 0.5,
            keywords: &[
                "retinol",
                "retinal",
                "glycolic",
                "salicylic",
                "lactic acid",
                "fragrance",
                "parfum",
                "alcohol denat",
                "essential oil",
            ],
        },
    ],
    default: 0.2,
};

/// Tiered rules evaluated over ingredients.
pub const INGREDIENT_TIERED_RULES: &[TieredRule] = &[
    PH_RULE,
    MOLECULAR_WEIGHT_RULE,
    EXFOLIATION_RULE,
    ANTI_AGING_RULE,
    PENETRATION_RULE,
    IRRITATION_RULE,
];

/// Counted rules evaluated over ingredients.
pub const INGREDIENT_COUNTED_RULES: &[CountedRule] = &[
    LIPID_SOLUBILITY_RULE,
    HYDRATION_RULE,
    BRIGHTENING_RULE,
    SOOTHING_RULE,
    BARRIER_RULE,
];
