use jade_core::{
    calculate_compatibility_score, calculate_product_tensor, has_access_to_threshold,
    tensor_similarity, AccessLevel, KnowledgeThreshold, ProductTaxonomy, TensorError,
    TENSOR_DIMENSIONS,
};
use proptest::prelude::*;

fn unit_tensor() -> impl Strategy<Value = [f64; TENSOR_DIMENSIONS]> {
    prop::array::uniform13(0.0f64..=1.0)
}

fn access_level() -> impl Strategy<Value = AccessLevel> {
    prop::sample::select(AccessLevel::ALL.to_vec())
}

fn threshold() -> impl Strategy<Value = KnowledgeThreshold> {
    prop::sample::select(KnowledgeThreshold::ALL.to_vec())
}

proptest! {
    #[test]
    fn self_similarity_is_one(a in unit_tensor()) {
        prop_assert_eq!(tensor_similarity(&a, &a), 1.0);
    }

    #[test]
    fn similarity_is_symmetric_and_bounded(a in unit_tensor(), b in unit_tensor()) {
        let forward = tensor_similarity(&a, &b);
        prop_assert_eq!(forward, tensor_similarity(&b, &a));
        prop_assert!((0.0..=1.0).contains(&forward));
    }

    #[test]
    fn wrong_length_is_rejected(
        len in (0usize..32).prop_filter("must differ from 13", |len| *len != TENSOR_DIMENSIONS),
    ) {
        let short = vec![0.5; len];
        let full = vec![0.5; TENSOR_DIMENSIONS];
        let err = calculate_compatibility_score(&short, &full).unwrap_err();
        prop_assert_eq!(
            err,
            TensorError::DimensionMismatch {
                expected: TENSOR_DIMENSIONS,
                actual: len,
            }
        );
    }

    #[test]
    fn extracted_values_stay_in_unit_range(ingredients in prop::collection::vec(".{0,40}", 0..12)) {
        let tensor = calculate_product_tensor(&ProductTaxonomy::new("p"), &ingredients);
        prop_assert!(tensor.tensor.iter().all(|value| (0.0..=1.0).contains(value)));
    }

    #[test]
    fn keyword_free_ingredients_give_default_vector(
        ingredients in prop::collection::vec("[xz]{1,12}", 1..8),
    ) {
        let taxonomy = ProductTaxonomy::new("p");
        let none: Vec<String> = Vec::new();
        let baseline = calculate_product_tensor(&taxonomy, &none);
        let tensor = calculate_product_tensor(&taxonomy, &ingredients);
        prop_assert_eq!(tensor.tensor, baseline.tensor);
    }

    #[test]
    fn higher_access_never_loses_visibility(
        low in access_level(),
        high in access_level(),
        tier in threshold(),
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        if has_access_to_threshold(low, Some(tier)) {
            prop_assert!(has_access_to_threshold(high, Some(tier)));
        }
    }

    #[test]
    fn every_level_sees_unthresholded_content(level in access_level()) {
        prop_assert!(has_access_to_threshold(level, None));
    }
}
