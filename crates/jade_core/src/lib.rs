//! Skincare intelligence core.
//!
//! Tensor feature extraction and compatibility scoring for products, plus
//! access-gated navigation of the ingredient causal graph. Consumed
//! in-process by the GraphQL resolver layer.

pub mod access;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod tensor;

pub use access::gate::{
    can_see_atom, filter_accessible, has_access_to_threshold, max_accessible_threshold,
    parse_access_level, AccessLevel, AccessLevelError,
};
pub use config::{ConfigError, IntelligenceConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::atom::{AtomId, AtomValidationError, KnowledgeThreshold, SkincareAtom};
pub use model::evidence::{evidence_strength, ClaimEvidence, EvidenceLevel};
pub use model::relationship::{
    InteractionKind, RelationshipType, RelationshipValidationError, SkincareRelationship,
};
pub use model::taxonomy::{ProductProfile, ProductTaxonomy, ProfessionalLevel, UsageTime};
pub use model::tensor::{ProductTensor, TensorDimension, TensorMetadata, TENSOR_DIMENSIONS};
pub use repo::atom_repo::{AtomListQuery, AtomRepository, EdgeDirection, SqliteAtomRepository};
pub use repo::product_repo::{ProductRepository, SqliteProductRepository};
pub use repo::{RepoError, RepoResult};
pub use service::atom_service::AtomService;
pub use service::causal_service::{
    CausalChainNode, CausalDirection, CausalPathStep, CausalService, WhyExplanation,
};
pub use service::compatibility_service::{
    CompatibilityResult, CompatibilityService, PairInteraction,
};
pub use service::product_service::{CompatibleProduct, ProductService};
pub use tensor::extractor::calculate_product_tensor;
pub use tensor::scoring::{
    calculate_compatibility_score, tensor_similarity, TensorError, DIMENSION_WEIGHTS,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
