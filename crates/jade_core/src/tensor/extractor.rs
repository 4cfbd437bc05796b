//! Tensor feature extraction.
//!
//! # Invariants
//! - Pure function of `(taxonomy, ingredients)`; no I/O.
//! - Always returns 13 values in `[0, 1]`.

use super::keywords::{
    concentration_base, CountedRule, TieredRule, INGREDIENT_COUNTED_RULES,
    INGREDIENT_TIERED_RULES, STRONG_ACTIVE_BONUS, STRONG_ACTIVE_KEYWORDS,
    WATER_SOLUBILITY_RULE,
};
use crate::model::taxonomy::ProductTaxonomy;
use crate::model::tensor::{ProductTensor, TensorDimension, TENSOR_DIMENSIONS};

/// Computes the feature vector of one product.
pub fn calculate_product_tensor<S: AsRef<str>>(
    taxonomy: &ProductTaxonomy,
    ingredients: &[S],
) -> ProductTensor {
    let lowered: Vec<String> = ingredients
        .iter()
        .map(|ingredient| ingredient.as_ref().to_lowercase())
        .collect();

    let mut tensor = [0.0; TENSOR_DIMENSIONS];

    for rule in INGREDIENT_TIERED_RULES {
        tensor[rule.dimension.index()] = tiered_value(rule, &lowered);
    }
    for rule in INGREDIENT_COUNTED_RULES {
        tensor[rule.dimension.index()] = counted_value(rule, &lowered);
    }

    let base = taxonomy
        .formulation_base
        .as_deref()
        .map(|value| vec![value.to_lowercase()])
        .unwrap_or_default();
    tensor[WATER_SOLUBILITY_RULE.dimension.index()] = tiered_value(&WATER_SOLUBILITY_RULE, &base);

    tensor[TensorDimension::ActiveConcentration.index()] =
        active_concentration(taxonomy, &lowered);

    ProductTensor::new(taxonomy.product_id.clone(), tensor)
}

fn active_concentration(taxonomy: &ProductTaxonomy, lowered: &[String]) -> f64 {
    let base = concentration_base(taxonomy.professional_level);
    if any_match(lowered, STRONG_ACTIVE_KEYWORDS) {
        (base + STRONG_ACTIVE_BONUS).min(1.0)
    } else {
        base
    }
}

/// First tier with any matching haystack wins; otherwise the default.
fn tiered_value(rule: &TieredRule, haystacks: &[String]) -> f64 {
    rule.tiers
        .iter()
        .find(|tier| any_match(haystacks, tier.keywords))
        .map_or(rule.default, |tier| tier.value)
}

/// Counts ingredients matching at least one keyword.
fn counted_value(rule: &CountedRule, haystacks: &[String]) -> f64 {
    let matches = haystacks
        .iter()
        .filter(|haystack| contains_any(haystack, rule.keywords))
        .count();
    (rule.per_match * matches as f64).min(1.0)
}

fn any_match(haystacks: &[String], keywords: &[&str]) -> bool {
    haystacks
        .iter()
        .any(|haystack| contains_any(haystack, keywords))
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::calculate_product_tensor;
    use crate::model::taxonomy::{ProductTaxonomy, ProfessionalLevel};
    use crate::model::tensor::TensorDimension;

    fn taxonomy(level: Option<ProfessionalLevel>, base: Option<&str>) -> ProductTaxonomy {
        let mut taxonomy = ProductTaxonomy::new("p-1");
        taxonomy.professional_level = level;
        taxonomy.formulation_base = base.map(str::to_string);
        taxonomy
    }

    #[test]
    fn keyword_free_ingredients_yield_defaults() {
        let tensor = calculate_product_tensor(
            &taxonomy(Some(ProfessionalLevel::Professional), None),
            &["Xanthan Gum", "Phenoxyethanol", "Disodium EDTA"],
        );
        assert_eq!(
            tensor.tensor,
            [0.5, 0.5, 0.6, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.2]
        );
        assert_eq!(tensor.product_id, "p-1");
    }

    #[test]
    fn retinol_niacinamide_scenario() {
        let tensor = calculate_product_tensor(
            &taxonomy(Some(ProfessionalLevel::Otc), None),
            &["Retinol", "Niacinamide"],
        );
        assert_eq!(tensor.value(TensorDimension::AntiAgingPotency), 1.0);
        assert_eq!(tensor.value(TensorDimension::IrritationRisk), 0.5);
        assert!((tensor.value(TensorDimension::ActiveConcentration) - 0.5).abs() < 1e-12);
        assert_eq!(tensor.value(TensorDimension::BrighteningEfficacy), 0.25);
    }

    #[test]
    fn strong_tier_wins_over_weaker_tiers() {
        let tensor = calculate_product_tensor(
            &taxonomy(None, None),
            &["Gluconolactone", "Lactic Acid", "Glycolic Acid"],
        );
        assert_eq!(tensor.value(TensorDimension::ExfoliationStrength), 1.0);
        assert_eq!(tensor.value(TensorDimension::PhLevel), 0.3);
    }

    #[test]
    fn counted_dimensions_cap_at_one() {
        let tensor = calculate_product_tensor(
            &taxonomy(None, None),
            &[
                "Glycerin",
                "Sodium Hyaluronate",
                "Panthenol",
                "Betaine",
                "Trehalose",
                "Sodium PCA",
                "Urea",
            ],
        );
        assert_eq!(tensor.value(TensorDimension::HydrationIntensity), 1.0);
    }

    #[test]
    fn concentration_bonus_is_capped() {
        let tensor = calculate_product_tensor(
            &taxonomy(Some(ProfessionalLevel::InOfficeOnly), None),
            &["Trichloroacetic Acid"],
        );
        assert_eq!(tensor.value(TensorDimension::ActiveConcentration), 1.0);
    }

    #[test]
    fn formulation_base_drives_water_solubility() {
        let none: Vec<String> = Vec::new();
        let water = calculate_product_tensor(&taxonomy(None, Some("Water-based Serum")), &none);
        let oil = calculate_product_tensor(&taxonomy(None, Some("Anhydrous Balm")), &none);
        assert_eq!(water.value(TensorDimension::WaterSolubility), 0.8);
        assert_eq!(oil.value(TensorDimension::WaterSolubility), 0.2);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let tensor = calculate_product_tensor(&taxonomy(None, None), &["ZINC OXIDE"]);
        assert_eq!(tensor.value(TensorDimension::PenetrationDepth), 0.1);
    }
}
