//! # Recommendation Engine
//!
//! This module coordinates one recommendation request:
//! 1. Resolve the user and gather liked, purchased and disliked items
//! 2. Score similar users and keep the best 25
//! 3. Count the items those users purchased or liked
//! 4. Drop items the user already interacted with
//! 5. Keep the 10 best and load their attribute records
//!
//! The engine is synchronous and holds no per-request state, so one
//! instance can be cloned into as many worker threads as needed.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument};

use graph_store::{NodeId, Properties, Traversal};
use pipeline::filters::AlreadyInteractedFilter;
use pipeline::FilterPipeline;
use sources::{
    build_user_context, select_top_k, BlobDislikes, Candidate, CoOccurrenceSource,
    DislikeSource, EdgeDislikes, Result, Score, UserContext,
};

/// Number of items a request returns at most
pub const ITEM_LIMIT: usize = 10;

/// Final recommendation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecommendation {
    pub item: NodeId,
    /// Number of similar-user edges pointing at the item
    pub score: Score,
    /// Every attribute stored on the item node
    pub attributes: Properties,
}

impl ItemRecommendation {
    /// The item's `name` attribute, if it has a textual one
    pub fn name(&self) -> Option<&str> {
        self.attributes
            .get(graph_store::NAME)
            .and_then(|value| value.as_text())
    }
}

/// Main engine that coordinates the recommendation flow
#[derive(Clone)]
pub struct RecommendationEngine {
    graph: Arc<dyn Traversal>,
    source: CoOccurrenceSource,
    filter_pipeline: Arc<FilterPipeline>,
}

impl RecommendationEngine {
    /// Create an engine reading from `graph`
    pub fn new(graph: Arc<dyn Traversal>) -> Self {
        let source = CoOccurrenceSource::new(graph.clone());
        let filter_pipeline = Arc::new(FilterPipeline::new().add_filter(AlreadyInteractedFilter));
        Self {
            graph,
            source,
            filter_pipeline,
        }
    }

    /// Recommend items, reading dislikes from DISLIKES edges.
    ///
    /// An unknown username yields an empty list.
    pub fn recommend(&self, username: &str) -> Result<Vec<ItemRecommendation>> {
        self.recommend_with(username, &EdgeDislikes)
    }

    /// Recommend items, reading dislikes from the user's compact blob.
    ///
    /// Returns the same items as [`recommend`](Self::recommend) whenever the
    /// blob matches the DISLIKES edges. A blob that fails to decode fails
    /// the request.
    pub fn recommend_compact(&self, username: &str) -> Result<Vec<ItemRecommendation>> {
        self.recommend_with(username, &BlobDislikes::new())
    }

    /// Recommend items with an explicit dislike strategy
    #[instrument(skip(self, dislikes), fields(dislikes = dislikes.name()))]
    pub fn recommend_with(
        &self,
        username: &str,
        dislikes: &dyn DislikeSource,
    ) -> Result<Vec<ItemRecommendation>> {
        let start_time = Instant::now();

        let Some(context) = build_user_context(self.graph.as_ref(), username, dislikes)? else {
            info!("Unknown user {}, nothing to recommend", username);
            return Ok(Vec::new());
        };

        let candidates = self.source.get_candidates(&context)?;
        let filtered = self.apply_filters(candidates, &context)?;
        let recommendations = self.rank_and_select(filtered)?;

        info!(
            "Recommended {} items for {} in {:.2?}",
            recommendations.len(),
            username,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Apply the filter pipeline to candidates
    fn apply_filters(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let before = candidates.len();
        let filtered = self.filter_pipeline.apply(candidates, context)?;
        debug!(
            "Filtering complete, {} of {} candidates remain",
            filtered.len(),
            before
        );
        Ok(filtered)
    }

    /// Keep the best items and attach their attribute records
    fn rank_and_select(&self, candidates: Vec<Candidate>) -> Result<Vec<ItemRecommendation>> {
        let top = select_top_k(
            candidates.into_iter().map(|c| (c, c.score)),
            ITEM_LIMIT,
        );

        top.into_iter()
            .map(|candidate| {
                Ok(ItemRecommendation {
                    item: candidate.item,
                    score: candidate.score,
                    attributes: self.graph.properties(candidate.item)?,
                })
            })
            .collect()
    }
}
