//! Error types for the graph-store crate.

use crate::types::{Label, NodeId};
use thiserror::Error;

/// Errors raised by the in-memory graph store and its loaders
#[derive(Error, Debug)]
pub enum GraphError {
    /// No node with this id exists
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    /// Usernames are unique across all users
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    /// Item names are unique so data files can refer to items by name
    #[error("Item name already taken: {0}")]
    DuplicateItem(String),

    /// A relationship endpoint has the wrong label
    #[error("Node {id} is not a {expected:?}")]
    WrongLabel { id: NodeId, expected: Label },

    /// Referenced entity doesn't exist (e.g., edge to an unknown item)
    #[error("Missing reference: {entity} named {name}")]
    MissingReference { entity: String, name: String },

    /// A property or field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// I/O error occurred while reading a data file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The backing store could not answer a read
    #[error("Graph store unavailable: {0}")]
    Unavailable(String),
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, GraphError>;
