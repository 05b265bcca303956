//! Engine crate for graph recommendations.
//!
//! This crate contains the [`RecommendationEngine`] that ties the traversal
//! collaborator, candidate generation, filtering and final ranking together.

pub mod recommendation;

pub use recommendation::{ItemRecommendation, RecommendationEngine, ITEM_LIMIT};
