//! 13-dimensional product feature vector.
//!
//! # Invariants
//! - A tensor always has exactly [`TENSOR_DIMENSIONS`] entries.
//! - Every entry lies in `[0, 1]`.

use serde::{Deserialize, Serialize};

/// Number of dimensions in a product tensor.
pub const TENSOR_DIMENSIONS: usize = 13;

/// Dimensions in their fixed tensor order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensorDimension {
    PhLevel,
    MolecularWeight,
    ActiveConcentration,
    LipidSolubility,
    WaterSolubility,
    ExfoliationStrength,
    HydrationIntensity,
    AntiAgingPotency,
    BrighteningEfficacy,
    SoothingCapacity,
    BarrierSupport,
    PenetrationDepth,
    IrritationRisk,
}

impl TensorDimension {
    pub const ALL: [TensorDimension; TENSOR_DIMENSIONS] = [
        Self::PhLevel,
        Self::MolecularWeight,
        Self::ActiveConcentration,
        Self::LipidSolubility,
        Self::WaterSolubility,
        Self::ExfoliationStrength,
        Self::HydrationIntensity,
        Self::AntiAgingPotency,
        Self::BrighteningEfficacy,
        Self::SoothingCapacity,
        Self::BarrierSupport,
        Self::PenetrationDepth,
        Self::IrritationRisk,
    ];

    /// Position of this dimension in the tensor.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Field name of this dimension in `TensorMetadata`.
    pub fn name(self) -> &'static str {
        match self {
            Self::PhLevel => "ph_level",
            Self::MolecularWeight => "molecular_weight",
            Self::ActiveConcentration => "active_concentration",
            Self::LipidSolubility => "lipid_solubility",
            Self::WaterSolubility => "water_solubility",
            Self::ExfoliationStrength => "exfoliation_strength",
            Self::HydrationIntensity => "hydration_intensity",
            Self::AntiAgingPotency => "anti_aging_potency",
            Self::BrighteningEfficacy => "brightening_efficacy",
            Self::SoothingCapacity => "soothing_capacity",
            Self::BarrierSupport => "barrier_support",
            Self::PenetrationDepth => "penetration_depth",
            Self::IrritationRisk => "irritation_risk",
        }
    }
}

/// Named view of the tensor values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TensorMetadata {
    pub ph_level: f64,
    pub molecular_weight: f64,
    pub active_concentration: f64,
    pub lipid_solubility: f64,
    pub water_solubility: f64,
    pub exfoliation_strength: f64,
    pub hydration_intensity: f64,
    pub anti_aging_potency: f64,
    pub brightening_efficacy: f64,
    pub soothing_capacity: f64,
    pub barrier_support: f64,
    pub penetration_depth: f64,
    pub irritation_risk: f64,
}

impl From<&[f64; TENSOR_DIMENSIONS]> for TensorMetadata {
    fn from(values: &[f64; TENSOR_DIMENSIONS]) -> Self {
        Self {
            ph_level: values[0],
            molecular_weight: values[1],
            active_concentration: values[2],
            lipid_solubility: values[3],
            water_solubility: values[4],
            exfoliation_strength: values[5],
            hydration_intensity: values[6],
            anti_aging_potency: values[7],
            brightening_efficacy: values[8],
            soothing_capacity: values[9],
            barrier_support: values[10],
            penetration_depth: values[11],
            irritation_risk: values[12],
        }
    }
}

/// Derived feature vector of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTensor {
    pub product_id: String,
    pub tensor: [f64; TENSOR_DIMENSIONS],
    pub metadata: TensorMetadata,
}

impl ProductTensor {
    pub fn new(product_id: impl Into<String>, tensor: [f64; TENSOR_DIMENSIONS]) -> Self {
        Self {
            product_id: product_id.into(),
            metadata: TensorMetadata::from(&tensor),
            tensor,
        }
    }

    /// Value of one named dimension.
    pub fn value(&self, dimension: TensorDimension) -> f64 {
        self.tensor[dimension.index()]
    }
}
