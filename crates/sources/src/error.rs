//! Error types shared by the recommendation path.

use graph_store::{GraphError, NodeId};
use intset::DecodeError;
use thiserror::Error;

/// Failures that abort a recommendation request.
///
/// An unknown username is not an error; it yields an empty result instead.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// The persisted dislikes blob could not be decoded
    #[error("Corrupt dislikes blob on user {user}: {source}")]
    CorruptEncoding {
        user: NodeId,
        #[source]
        source: DecodeError,
    },

    /// The dislikes blob names an id that resolves to no node
    #[error("Dislikes blob on user {user} references missing node {id}")]
    DanglingDislike { user: NodeId, id: u32 },

    /// A property that must hold a byte blob holds something else
    #[error("Property '{key}' on node {node} is not a byte blob")]
    InvalidProperty { node: NodeId, key: String },

    /// The traversal collaborator failed; never retried here
    #[error("Graph collaborator unavailable: {0}")]
    CollaboratorUnavailable(#[from] GraphError),

    /// A filter stage failed
    #[error(transparent)]
    Pipeline(#[from] anyhow::Error),
}

/// Type alias for Results on the recommendation path
pub type Result<T> = std::result::Result<T, RecommendError>;
