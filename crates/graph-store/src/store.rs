//! In-memory graph store.
//!
//! Nodes live in a `Vec` indexed by [`NodeId`], so ids are dense and
//! assigned in creation order. Edges are indexed in both directions, which
//! makes the co-occurrence scans of the recommender (item ← user) as cheap
//! as the forward walks (user → item).

use crate::error::{GraphError, Result};
use crate::traversal::Traversal;
use crate::types::*;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    outgoing: Vec<Vec<(EdgeKind, NodeId)>>,
    incoming: Vec<Vec<(EdgeKind, NodeId)>>,
    /// Uniqueness constraint on `username`
    users_by_name: HashMap<String, NodeId>,
    items_by_name: HashMap<String, NodeId>,
    edge_count: usize,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_node(&mut self, label: Label, properties: Properties) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node {
            id,
            label,
            properties,
        });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Create a user node.
    ///
    /// # Errors
    /// [`GraphError::DuplicateUsername`] if the name is already taken.
    pub fn create_user(&mut self, username: &str) -> Result<NodeId> {
        if self.users_by_name.contains_key(username) {
            return Err(GraphError::DuplicateUsername(username.to_string()));
        }
        let mut properties = Properties::new();
        properties.insert(USERNAME.to_string(), PropertyValue::from(username));
        let id = self.push_node(Label::User, properties);
        self.users_by_name.insert(username.to_string(), id);
        Ok(id)
    }

    /// Create an item node with only a `name` attribute
    pub fn create_item(&mut self, name: &str) -> Result<NodeId> {
        self.create_item_with(name, Vec::new())
    }

    /// Create an item node with a `name` plus arbitrary extra attributes
    pub fn create_item_with(
        &mut self,
        name: &str,
        attributes: impl IntoIterator<Item = (String, PropertyValue)>,
    ) -> Result<NodeId> {
        if self.items_by_name.contains_key(name) {
            return Err(GraphError::DuplicateItem(name.to_string()));
        }
        let mut properties: Properties = attributes.into_iter().collect();
        properties.insert(NAME.to_string(), PropertyValue::from(name));
        let id = self.push_node(Label::Item, properties);
        self.items_by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Add a `user -[kind]-> item` edge. Parallel edges are allowed.
    pub fn relate(&mut self, user: NodeId, kind: EdgeKind, item: NodeId) -> Result<()> {
        self.expect_label(user, Label::User)?;
        self.expect_label(item, Label::Item)?;
        self.outgoing[user as usize].push((kind, item));
        self.incoming[item as usize].push((kind, user));
        self.edge_count += 1;
        Ok(())
    }

    /// Set a property, keeping the username and item name indexes consistent
    pub fn set_property(
        &mut self,
        node: NodeId,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        let value = value.into();
        let label = self.node(node)?.label;

        match (label, key) {
            (Label::User, USERNAME) => {
                let username = indexed_name(USERNAME, &value)?;
                reindex(&mut self.users_by_name, node, username)
                    .map_err(GraphError::DuplicateUsername)?;
            }
            (Label::Item, NAME) => {
                let name = indexed_name(NAME, &value)?;
                reindex(&mut self.items_by_name, node, name).map_err(GraphError::DuplicateItem)?;
            }
            _ => {}
        }

        self.nodes[node as usize]
            .properties
            .insert(key.to_string(), value);
        Ok(())
    }

    /// Encode the user's DISLIKES targets and store them as its
    /// `dislikes` blob, returning the blob size in bytes.
    pub fn write_dislikes_blob(&mut self, user: NodeId) -> Result<usize> {
        self.expect_label(user, Label::User)?;
        let blob = intset::encode(
            self.outgoing[user as usize]
                .iter()
                .filter(|(kind, _)| *kind == EdgeKind::Dislikes)
                .map(|&(_, item)| item),
        );
        let size = blob.len();
        self.set_property(user, DISLIKES_BLOB, blob)?;
        Ok(size)
    }

    /// Write the dislikes blob of every user
    pub fn write_all_dislikes_blobs(&mut self) -> Result<()> {
        let users: Vec<NodeId> = self.users_by_name.values().copied().collect();
        let mut total = 0;
        for user in users {
            total += self.write_dislikes_blob(user)?;
        }
        debug!("Wrote dislikes blobs ({} bytes total)", total);
        Ok(())
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    pub fn find_user_id(&self, username: &str) -> Option<NodeId> {
        self.users_by_name.get(username).copied()
    }

    pub fn item_by_name(&self, name: &str) -> Option<NodeId> {
        self.items_by_name.get(name).copied()
    }

    /// All usernames, in no particular order
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users_by_name.keys().map(String::as_str)
    }

    /// Get counts: (users, items, edges)
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.users_by_name.len(),
            self.items_by_name.len(),
            self.edge_count,
        )
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id as usize).ok_or(GraphError::NodeNotFound(id))
    }

    fn expect_label(&self, id: NodeId, expected: Label) -> Result<()> {
        if self.node(id)?.label != expected {
            return Err(GraphError::WrongLabel { id, expected });
        }
        Ok(())
    }
}

/// Indexed names must be text
fn indexed_name<'a>(field: &str, value: &'a PropertyValue) -> Result<&'a str> {
    value.as_text().ok_or_else(|| GraphError::InvalidValue {
        field: field.to_string(),
        value: format!("{value:?}"),
    })
}

/// Point `name` at `node`, dropping the node's previous name.
/// Fails with the name if another node already holds it.
fn reindex(
    index: &mut HashMap<String, NodeId>,
    node: NodeId,
    name: &str,
) -> std::result::Result<(), String> {
    match index.get(name) {
        Some(&owner) if owner != node => return Err(name.to_string()),
        _ => {}
    }
    index.retain(|_, &mut owner| owner != node);
    index.insert(name.to_string(), node);
    Ok(())
}

impl Traversal for GraphStore {
    fn find_user(&self, username: &str) -> Result<Option<NodeId>> {
        Ok(self.find_user_id(username))
    }

    fn outgoing(&self, node: NodeId, kinds: &[EdgeKind]) -> Result<Vec<(EdgeKind, NodeId)>> {
        self.node(node)?;
        Ok(self.outgoing[node as usize]
            .iter()
            .filter(|(kind, _)| kinds.contains(kind))
            .copied()
            .collect())
    }

    fn incoming(&self, node: NodeId, kind: EdgeKind) -> Result<Vec<NodeId>> {
        self.node(node)?;
        Ok(self.incoming[node as usize]
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|&(_, source)| source)
            .collect())
    }

    fn property(&self, node: NodeId, key: &str) -> Result<Option<PropertyValue>> {
        Ok(self.node(node)?.properties.get(key).cloned())
    }

    fn properties(&self, node: NodeId) -> Result<Properties> {
        Ok(self.node(node)?.properties.clone())
    }

    fn node_by_id(&self, id: u32) -> Result<Option<NodeId>> {
        Ok(self.get_node(id).map(|node| node.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_store() -> (GraphStore, NodeId, NodeId, NodeId) {
        let mut store = GraphStore::new();
        let alice = store.create_user("alice").unwrap();
        let lamp = store.create_item("lamp").unwrap();
        let desk = store.create_item("desk").unwrap();
        store.relate(alice, EdgeKind::Likes, lamp).unwrap();
        store.relate(alice, EdgeKind::Purchased, desk).unwrap();
        store.relate(alice, EdgeKind::Dislikes, desk).unwrap();
        (store, alice, lamp, desk)
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let (store, alice, lamp, desk) = small_store();
        assert_eq!((alice, lamp, desk), (0, 1, 2));
        assert_eq!(store.counts(), (1, 2, 3));
    }

    #[test]
    fn test_username_is_unique() {
        let mut store = GraphStore::new();
        store.create_user("bob").unwrap();
        assert!(matches!(
            store.create_user("bob"),
            Err(GraphError::DuplicateUsername(_))
        ));
    }

    #[test]
    fn test_rename_respects_uniqueness() {
        let mut store = GraphStore::new();
        let bob = store.create_user("bob").unwrap();
        store.create_user("carol").unwrap();

        assert!(store.set_property(bob, USERNAME, "carol").is_err());
        store.set_property(bob, USERNAME, "robert").unwrap();
        assert_eq!(store.find_user("robert").unwrap(), Some(bob));
        assert_eq!(store.find_user("bob").unwrap(), None);
    }

    #[test]
    fn test_item_rename_updates_name_index() {
        let (mut store, _, lamp, desk) = small_store();

        assert!(matches!(
            store.set_property(lamp, NAME, "desk"),
            Err(GraphError::DuplicateItem(_))
        ));
        assert!(matches!(
            store.set_property(lamp, NAME, 7i64),
            Err(GraphError::InvalidValue { .. })
        ));
        assert_eq!(store.item_by_name("lamp"), Some(lamp));

        store.set_property(lamp, NAME, "floor lamp").unwrap();
        assert_eq!(store.item_by_name("floor lamp"), Some(lamp));
        assert_eq!(store.item_by_name("lamp"), None);
        assert_eq!(store.item_by_name("desk"), Some(desk));
        assert_eq!(store.counts(), (1, 2, 3));

        // Other item attributes are not indexed
        store.set_property(desk, "color", "oak").unwrap();
        assert_eq!(store.item_by_name("desk"), Some(desk));
    }

    #[test]
    fn test_edges_run_user_to_item() {
        let (mut store, alice, lamp, _) = small_store();
        assert!(matches!(
            store.relate(lamp, EdgeKind::Likes, alice),
            Err(GraphError::WrongLabel { .. })
        ));
    }

    #[test]
    fn test_traversal_both_directions() {
        let (store, alice, lamp, desk) = small_store();

        let out = store
            .outgoing(alice, &[EdgeKind::Purchased, EdgeKind::Likes])
            .unwrap();
        assert_eq!(out, vec![(EdgeKind::Likes, lamp), (EdgeKind::Purchased, desk)]);

        assert_eq!(store.incoming(desk, EdgeKind::Dislikes).unwrap(), vec![alice]);
        assert!(store.incoming(lamp, EdgeKind::Purchased).unwrap().is_empty());
        assert!(matches!(
            store.incoming(99, EdgeKind::Likes),
            Err(GraphError::NodeNotFound(99))
        ));
    }

    #[test]
    fn test_dislikes_blob_matches_edges() {
        let (mut store, alice, _, desk) = small_store();
        store.write_dislikes_blob(alice).unwrap();

        let blob = store.property(alice, DISLIKES_BLOB).unwrap().unwrap();
        let decoded = intset::decode(blob.as_bytes().unwrap()).unwrap();
        assert_eq!(decoded.iter().collect::<Vec<_>>(), vec![desk]);
    }

    #[test]
    fn test_node_by_id() {
        let (store, _, lamp, _) = small_store();
        assert_eq!(store.node_by_id(lamp).unwrap(), Some(lamp));
        assert_eq!(store.node_by_id(1_000).unwrap(), None);
    }
}
