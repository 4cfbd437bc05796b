//! Product tensor lookup and similarity ranking.
//!
//! # Responsibility
//! - Compute tensors for stored products on demand.
//! - Rank other products by tensor compatibility with a target product.
//!
//! # Invariants
//! - Tensors are recomputed per call; nothing is cached here.
//! - Missing products yield `None`/empty results.

use crate::model::tensor::ProductTensor;
use crate::repo::product_repo::ProductRepository;
use crate::repo::RepoResult;
use crate::tensor::extractor::calculate_product_tensor;
use crate::tensor::scoring::tensor_similarity;
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

/// One ranked product similar to the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibleProduct {
    pub product_id: String,
    pub score: f64,
}

/// Product-level tensor service.
pub struct ProductService<P: ProductRepository> {
    repo: P,
}

impl<P: ProductRepository> ProductService<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Tensor of one stored product.
    pub fn product_tensor(&self, product_id: &str) -> RepoResult<Option<ProductTensor>> {
        Ok(self
            .repo
            .get_product(product_id)?
            .map(|profile| calculate_product_tensor(&profile.taxonomy, &profile.ingredients)))
    }

    /// Compatibility score of two stored products, `None` if either is missing.
    pub fn compare_products(&self, left_id: &str, right_id: &str) -> RepoResult<Option<f64>> {
        let Some(left) = self.product_tensor(left_id)? else {
            return Ok(None);
        };
        let Some(right) = self.product_tensor(right_id)? else {
            return Ok(None);
        };
        Ok(Some(tensor_similarity(&left.tensor, &right.tensor)))
    }

    /// Top `limit` other products scoring at least `min_score` against the target.
    ///
    /// Sorted by score descending, then product id ascending.
    pub fn find_compatible_products(
        &self,
        product_id: &str,
        limit: usize,
        min_score: f64,
    ) -> RepoResult<Vec<CompatibleProduct>> {
        let Some(target) = self.product_tensor(product_id)? else {
            debug!("event=compatible_products module=product status=not_found");
            return Ok(Vec::new());
        };
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<CompatibleProduct> = self
            .repo
            .list_products()?
            .into_iter()
            .filter(|profile| profile.taxonomy.product_id != target.product_id)
            .map(|profile| {
                let tensor = calculate_product_tensor(&profile.taxonomy, &profile.ingredients);
                CompatibleProduct {
                    score: tensor_similarity(&target.tensor, &tensor.tensor),
                    product_id: profile.taxonomy.product_id,
                }
            })
            .filter(|candidate| candidate.score >= min_score)
            .collect();

        ranked.sort_by(|left, right| {
            right
                .score
                .partial_cmp(&left.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| left.product_id.cmp(&right.product_id))
        });
        ranked.truncate(limit);

        debug!(
            "event=compatible_products module=product status=ok results={}",
            ranked.len()
        );
        Ok(ranked)
    }
}
