//! Strategies for obtaining a user's disliked items.
//!
//! The same recommendation runs against either representation; only the
//! way the disliked set is read differs.

use crate::error::{RecommendError, Result};
use graph_store::{EdgeKind, NodeId, PropertyValue, Traversal, DISLIKES_BLOB};

/// Yields the items a user has disliked.
///
/// Implementations must be equivalent for a user whose DISLIKES edges and
/// dislikes blob describe the same id set.
pub trait DislikeSource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    fn disliked_items(&self, graph: &dyn Traversal, user: NodeId) -> Result<Vec<NodeId>>;
}

/// Reads outgoing DISLIKES edges
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDislikes;

impl DislikeSource for EdgeDislikes {
    fn name(&self) -> &str {
        "EdgeDislikes"
    }

    fn disliked_items(&self, graph: &dyn Traversal, user: NodeId) -> Result<Vec<NodeId>> {
        Ok(graph
            .outgoing(user, &[EdgeKind::Dislikes])?
            .into_iter()
            .map(|(_, item)| item)
            .collect())
    }
}

/// Decodes the user's compact dislikes blob and resolves each id to a node.
///
/// A user without the property has no dislikes. A blob that fails to decode,
/// or names an id with no node behind it, fails the request; it is never
/// read as an empty or partial set.
#[derive(Debug, Clone, Copy)]
pub struct BlobDislikes {
    key: &'static str,
}

impl BlobDislikes {
    pub fn new() -> Self {
        Self { key: DISLIKES_BLOB }
    }

    /// Read the blob from a different property
    pub fn with_key(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }
}

impl Default for BlobDislikes {
    fn default() -> Self {
        Self::new()
    }
}

impl DislikeSource for BlobDislikes {
    fn name(&self) -> &str {
        "BlobDislikes"
    }

    fn disliked_items(&self, graph: &dyn Traversal, user: NodeId) -> Result<Vec<NodeId>> {
        let blob = match graph.property(user, self.key)? {
            None => return Ok(Vec::new()),
            Some(PropertyValue::Bytes(blob)) => blob,
            Some(_) => {
                return Err(RecommendError::InvalidProperty {
                    node: user,
                    key: self.key.to_string(),
                });
            }
        };

        let ids = intset::decode(&blob)
            .map_err(|source| RecommendError::CorruptEncoding { user, source })?;

        ids.iter()
            .map(|id| {
                graph
                    .node_by_id(id)?
                    .ok_or(RecommendError::DanglingDislike { user, id })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_store::GraphStore;

    fn store_with_dislikes() -> (GraphStore, NodeId, Vec<NodeId>) {
        let mut store = GraphStore::new();
        let user = store.create_user("alice").unwrap();
        let a = store.create_item("a").unwrap();
        let b = store.create_item("b").unwrap();
        store.relate(user, EdgeKind::Dislikes, b).unwrap();
        store.relate(user, EdgeKind::Dislikes, a).unwrap();
        store.relate(user, EdgeKind::Likes, a).unwrap();
        (store, user, vec![b, a])
    }

    #[test]
    fn test_edge_dislikes() {
        let (store, user, expected) = store_with_dislikes();
        assert_eq!(EdgeDislikes.disliked_items(&store, user).unwrap(), expected);
    }

    #[test]
    fn test_blob_dislikes_match_edges() {
        let (mut store, user, mut expected) = store_with_dislikes();
        store.write_dislikes_blob(user).unwrap();

        // the blob yields ascending ids
        expected.sort_unstable();
        assert_eq!(BlobDislikes::new().disliked_items(&store, user).unwrap(), expected);
    }

    #[test]
    fn test_missing_blob_is_empty() {
        let (store, user, _) = store_with_dislikes();
        assert!(BlobDislikes::new().disliked_items(&store, user).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_blob_fails() {
        let (mut store, user, _) = store_with_dislikes();
        store.set_property(user, DISLIKES_BLOB, vec![9u8, 0, 0]).unwrap();

        let err = BlobDislikes::new().disliked_items(&store, user).unwrap_err();
        assert!(matches!(err, RecommendError::CorruptEncoding { .. }));
    }

    #[test]
    fn test_non_blob_property_fails() {
        let (mut store, user, _) = store_with_dislikes();
        store.set_property(user, DISLIKES_BLOB, "nope").unwrap();

        let err = BlobDislikes::new().disliked_items(&store, user).unwrap_err();
        assert!(matches!(err, RecommendError::InvalidProperty { .. }));
    }

    #[test]
    fn test_dangling_id_fails() {
        let (mut store, user, _) = store_with_dislikes();
        store
            .set_property(user, DISLIKES_BLOB, intset::encode([2, 5_000]))
            .unwrap();

        let err = BlobDislikes::new().disliked_items(&store, user).unwrap_err();
        assert!(matches!(
            err,
            RecommendError::DanglingDislike { id: 5_000, .. }
        ));
    }

    #[test]
    fn test_custom_blob_key() {
        let (mut store, user, _) = store_with_dislikes();
        store
            .set_property(user, "archived_dislikes", intset::encode([1]))
            .unwrap();

        let source = BlobDislikes::new().with_key("archived_dislikes");
        assert_eq!(source.disliked_items(&store, user).unwrap(), vec![1]);
        // The default key was never written
        assert!(BlobDislikes::new().disliked_items(&store, user).unwrap().is_empty());
    }
}
