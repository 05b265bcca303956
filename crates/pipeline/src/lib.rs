//! Pipeline for filtering recommendation candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! Candidates arrive in first-seen order from the co-occurrence source.
//! Filters drop candidates but never reorder them, so the ranking step
//! that follows still sees arrival order for its tie breaks.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::AlreadyInteractedFilter;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(AlreadyInteractedFilter);
//!
//! let filtered = pipeline.apply(candidates, &context)?;
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
