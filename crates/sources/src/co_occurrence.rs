//! Co-occurrence Source - weighted two-hop collaborative filtering
//!
//! "Users who bought or liked what you bought or liked also bought or liked..."
//!
//! ## Algorithm
//! 1. Score every other user by how they touched the target's items:
//!    - purchased an item the target purchased: +5
//!    - liked an item the target purchased: +3
//!    - liked an item the target liked: +2
//!    - purchased an item the target liked: +1
//!
//!    Points add up across every contributing edge; the target is removed.
//! 2. Keep the 25 best-scored users
//! 3. Count, per item, the PURCHASED and LIKES edges from those users
//!
//! Weights and limits are fixed: they define this heuristic.

use crate::error::Result;
use crate::score_map::ScoreMap;
use crate::top_k::select_top_k;
use crate::types::{Candidate, Score, UserContext};
use graph_store::{EdgeKind, NodeId, Traversal};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Points for each user who purchased an item the target purchased
pub const CO_PURCHASE_POINTS: Score = 5;
/// Points for each user who liked an item the target purchased
pub const LIKED_PURCHASE_POINTS: Score = 3;
/// Points for each user who liked an item the target liked
pub const CO_LIKE_POINTS: Score = 2;
/// Points for each user who purchased an item the target liked
pub const PURCHASED_LIKE_POINTS: Score = 1;

/// How many similar users feed candidate generation
pub const SIMILAR_USERS_LIMIT: usize = 25;

/// Generates candidate items from users with overlapping interactions
#[derive(Clone)]
pub struct CoOccurrenceSource {
    /// Shared read-only graph
    graph: Arc<dyn Traversal>,
}

impl CoOccurrenceSource {
    pub fn new(graph: Arc<dyn Traversal>) -> Self {
        Self { graph }
    }

    /// Generate scored candidates for a user, in first-seen order.
    ///
    /// Candidates are not yet filtered against the user's own interactions.
    #[instrument(skip(self, context), fields(user = context.user))]
    pub fn get_candidates(&self, context: &UserContext) -> Result<Vec<Candidate>> {
        let user_scores = self.score_similar_users(context)?;
        let scored_users = user_scores.len();

        let similar_users = select_top_k(user_scores.iter(), SIMILAR_USERS_LIMIT);
        debug!(
            "Scored {} users, kept {} similar users",
            scored_users,
            similar_users.len()
        );

        let candidates = self.get_candidate_scores(&similar_users)?.into_candidates();
        debug!("Generated {} candidates", candidates.len());
        Ok(candidates)
    }

    /// Weighted similarity of every user who shares an item with the target
    pub fn score_similar_users(&self, context: &UserContext) -> Result<ScoreMap> {
        let mut scores = ScoreMap::new();

        for item in context.purchased.iter() {
            for other in self.graph.incoming(item, EdgeKind::Purchased)? {
                scores.add(other, CO_PURCHASE_POINTS);
            }
            for other in self.graph.incoming(item, EdgeKind::Likes)? {
                scores.add(other, LIKED_PURCHASE_POINTS);
            }
        }

        for item in context.liked.iter() {
            for other in self.graph.incoming(item, EdgeKind::Likes)? {
                scores.add(other, CO_LIKE_POINTS);
            }
            for other in self.graph.incoming(item, EdgeKind::Purchased)? {
                scores.add(other, PURCHASED_LIKE_POINTS);
            }
        }

        scores.remove(context.user);
        Ok(scores)
    }

    /// One point per PURCHASED or LIKES edge from a similar user to an item
    pub fn get_candidate_scores(&self, similar_users: &[NodeId]) -> Result<ScoreMap> {
        let mut scores = ScoreMap::new();
        for &user in similar_users {
            for (_, item) in self
                .graph
                .outgoing(user, &[EdgeKind::Purchased, EdgeKind::Likes])?
            {
                scores.add(item, 1);
            }
        }
        Ok(scores)
    }
}
