//! # Sources Crate
//!
//! Candidate generation for graph recommendations.
//!
//! ## Components
//!
//! ### Co-occurrence Source
//! Weighted two-hop collaborative filtering over the interaction graph:
//! - Scores users by shared purchases and likes (5/3/2/1 points)
//! - Keeps the 25 most similar users
//! - Counts the items those users purchased or liked
//!
//! ### Top-k selection
//! [`TopK`] keeps the k best entries of an unordered stream in one pass,
//! breaking ties by arrival order.
//!
//! ### Dislike sources
//! [`EdgeDislikes`] and [`BlobDislikes`] read the target's disliked items
//! from DISLIKES edges or from the compact dislikes blob.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{build_user_context, select_top_k, CoOccurrenceSource, EdgeDislikes};
//! use std::sync::Arc;
//!
//! let graph: Arc<dyn Traversal> = Arc::new(store);
//! let context = build_user_context(graph.as_ref(), "user10", &EdgeDislikes)?
//!     .expect("user exists");
//!
//! let source = CoOccurrenceSource::new(graph.clone());
//! let candidates = source.get_candidates(&context)?;
//! let top = select_top_k(candidates.iter().map(|c| (c.item, c.score)), 10);
//! ```

// Public modules
pub mod co_occurrence;
pub mod dislikes;
pub mod error;
pub mod score_map;
pub mod top_k;
pub mod types;
pub mod user_context;

// Re-export commonly used types
pub use co_occurrence::{CoOccurrenceSource, SIMILAR_USERS_LIMIT};
pub use dislikes::{BlobDislikes, DislikeSource, EdgeDislikes};
pub use error::{RecommendError, Result};
pub use score_map::ScoreMap;
pub use top_k::{select_top_k, TopK};
pub use types::{Candidate, InteractionSet, Score, UserContext};
pub use user_context::build_user_context;
