//! Intelligence use-case services.
//!
//! # Responsibility
//! - Orchestrate repository lookups into the operations exposed to the
//!   GraphQL resolver layer.
//! - Keep resolvers decoupled from storage details.

pub mod atom_service;
pub mod causal_service;
pub mod compatibility_service;
pub mod confidence;
pub mod product_service;
