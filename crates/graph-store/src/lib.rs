//! # Graph Store Crate
//!
//! The user–item interaction graph the recommender reads from.
//!
//! ## Main Components
//!
//! - **types**: Node, edge and property types
//! - **traversal**: The read-only [`Traversal`] interface the core consumes
//! - **store**: In-memory [`GraphStore`] implementing [`Traversal`]
//! - **parser** / **loader**: Load a store from `::`-separated data files
//! - **fixtures**: Deterministic synthetic graphs
//! - **error**: Error types for the store
//!
//! ## Example Usage
//!
//! ```ignore
//! use graph_store::{EdgeKind, GraphStore, Traversal};
//!
//! let mut store = GraphStore::new();
//! let alice = store.create_user("alice")?;
//! let lamp = store.create_item("lamp")?;
//! store.relate(alice, EdgeKind::Likes, lamp)?;
//!
//! assert_eq!(store.incoming(lamp, EdgeKind::Likes)?, vec![alice]);
//! ```

pub mod error;
pub mod fixtures;
mod loader;
pub mod parser;
pub mod store;
pub mod traversal;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{GraphError, Result};
pub use store::GraphStore;
pub use traversal::Traversal;
pub use types::{
    EdgeKind, Label, Node, NodeId, Properties, PropertyValue, DISLIKES_BLOB, NAME, USERNAME,
};
