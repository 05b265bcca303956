//! Read-only traversal interface consumed by the recommendation core.
//!
//! The core never touches storage directly. Anything that can answer
//! these calls from a consistent snapshot can back the engine: the
//! in-memory [`GraphStore`](crate::GraphStore), or an adapter over an
//! external graph database.

use crate::error::Result;
use crate::types::{EdgeKind, NodeId, Properties, PropertyValue};

/// Read capabilities the recommendation core needs from a graph.
///
/// ## Design Note
/// - Node handles are the stable [`NodeId`]s themselves, so resolving an id
///   decoded from a blob is a lookup that only has to confirm existence.
/// - Every call is fallible: a remote store may time out, and that failure
///   must reach the caller unchanged.
/// - Edge lists come back in insertion order. Ranking ties are broken by
///   first-seen order, so this keeps results reproducible.
pub trait Traversal: Send + Sync {
    /// Look up a user by its unique username
    fn find_user(&self, username: &str) -> Result<Option<NodeId>>;

    /// Outgoing edges of `node` whose kind is one of `kinds`
    fn outgoing(&self, node: NodeId, kinds: &[EdgeKind]) -> Result<Vec<(EdgeKind, NodeId)>>;

    /// Source nodes of incoming `kind` edges of `node`
    fn incoming(&self, node: NodeId, kind: EdgeKind) -> Result<Vec<NodeId>>;

    /// A single property of `node`, if set
    fn property(&self, node: NodeId, key: &str) -> Result<Option<PropertyValue>>;

    /// Every property of `node`
    fn properties(&self, node: NodeId) -> Result<Properties>;

    /// Resolve a raw identifier to a node handle, `None` if no such node
    fn node_by_id(&self, id: u32) -> Result<Option<NodeId>>;
}
