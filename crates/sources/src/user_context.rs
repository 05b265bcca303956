//! Helper functions to build a UserContext from the graph
//!
//! This gathers the target user's interactions once per request so
//! candidate generation and filtering never go back to the graph for them.

use crate::dislikes::DislikeSource;
use crate::error::Result;
use crate::types::UserContext;
use graph_store::{EdgeKind, Traversal};
use tracing::debug;

/// Build a UserContext for `username`.
///
/// Returns `Ok(None)` when no such user exists: an unknown user is a
/// normal outcome, not a failure.
pub fn build_user_context(
    graph: &dyn Traversal,
    username: &str,
    dislikes: &dyn DislikeSource,
) -> Result<Option<UserContext>> {
    let Some(user) = graph.find_user(username)? else {
        debug!("User {} not found", username);
        return Ok(None);
    };

    let mut context = UserContext::new(user, username);

    for (kind, item) in graph.outgoing(user, &[EdgeKind::Likes, EdgeKind::Purchased])? {
        match kind {
            EdgeKind::Likes => context.liked.insert(item),
            EdgeKind::Purchased => context.purchased.insert(item),
            EdgeKind::Dislikes => false,
        };
    }

    for item in dislikes.disliked_items(graph, user)? {
        context.disliked.insert(item);
    }

    debug!(
        "Context for {}: liked={}, purchased={}, disliked={} (via {})",
        username,
        context.liked.len(),
        context.purchased.len(),
        context.disliked.len(),
        dislikes.name()
    );
    Ok(Some(context))
}
