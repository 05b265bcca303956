//! Building a [`GraphStore`] from a data directory.

use crate::error::{GraphError, Result};
use crate::parser;
use crate::store::GraphStore;
use std::path::Path;
use tracing::info;

impl GraphStore {
    /// Load a graph from `users.dat`, `items.dat` and `edges.dat`.
    ///
    /// Steps:
    /// 1. Parse the three files in parallel
    /// 2. Create users, then items (ids follow file order)
    /// 3. Resolve and add every edge
    /// 4. Write each user's dislikes blob from its DISLIKES edges
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading graph from {:?}", data_dir);

        let users_path = data_dir.join("users.dat");
        let items_path = data_dir.join("items.dat");
        let edges_path = data_dir.join("edges.dat");

        let ((users, items), edges) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_users(&users_path),
                    || parser::parse_items(&items_path),
                )
            },
            || parser::parse_edges(&edges_path),
        );
        let users = users?;
        let items = items?;
        let edges = edges?;

        let mut store = GraphStore::new();
        for username in &users {
            store.create_user(username)?;
        }
        for item in items {
            store.create_item_with(&item.name, item.attributes)?;
        }

        for edge in &edges {
            let user = store
                .find_user_id(&edge.username)
                .ok_or_else(|| GraphError::MissingReference {
                    entity: "User".to_string(),
                    name: edge.username.clone(),
                })?;
            let item = store
                .item_by_name(&edge.item_name)
                .ok_or_else(|| GraphError::MissingReference {
                    entity: "Item".to_string(),
                    name: edge.item_name.clone(),
                })?;
            store.relate(user, edge.kind, item)?;
        }

        store.write_all_dislikes_blobs()?;

        let (users, items, edges) = store.counts();
        info!("Loaded {} users, {} items, {} edges", users, items, edges);
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::Traversal;
    use crate::types::{EdgeKind, DISLIKES_BLOB};
    use std::fs;

    fn write_dir(name: &str, users: &str, items: &str, edges: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("graph-store-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("users.dat"), users).unwrap();
        fs::write(dir.join("items.dat"), items).unwrap();
        fs::write(dir.join("edges.dat"), edges).unwrap();
        dir
    }

    #[test]
    fn test_load_from_dir() {
        let dir = write_dir(
            "ok",
            "alice\nbob\n",
            "lamp::price=25\ndesk\n",
            "alice::LIKES::lamp\nbob::PURCHASED::lamp\nalice::DISLIKES::desk\n",
        );
        let store = GraphStore::load_from_dir(&dir).unwrap();
        assert_eq!(store.counts(), (2, 2, 3));

        let alice = store.find_user("alice").unwrap().unwrap();
        let lamp = store.item_by_name("lamp").unwrap();
        assert_eq!(store.incoming(lamp, EdgeKind::Likes).unwrap(), vec![alice]);
        assert!(store.property(alice, DISLIKES_BLOB).unwrap().is_some());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_unknown_item() {
        let dir = write_dir("missing", "alice\n", "lamp\n", "alice::LIKES::sofa\n");
        let err = GraphStore::load_from_dir(&dir).unwrap_err();
        assert!(matches!(err, GraphError::MissingReference { .. }));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_missing_dir() {
        let err = GraphStore::load_from_dir(Path::new("/nonexistent/graph")).unwrap_err();
        assert!(matches!(err, GraphError::IoError(_)));
    }
}
