//! Core domain types for the interaction graph.
//!
//! Users and items are nodes; LIKES, PURCHASED and DISLIKES are typed
//! edges that always run from a user to an item.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Stable numeric identifier of a node. This is the value stored in a
/// user's dislikes blob.
pub type NodeId = u32;

/// Property holding a user's unique name
pub const USERNAME: &str = "username";

/// Property holding an item's display name
pub const NAME: &str = "name";

/// Property holding a user's encoded dislike set
pub const DISLIKES_BLOB: &str = "dislikes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    User,
    Item,
}

/// Relationship types between a user and an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Likes,
    Purchased,
    Dislikes,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Likes => "LIKES",
            EdgeKind::Purchased => "PURCHASED",
            EdgeKind::Dislikes => "DISLIKES",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIKES" => Ok(EdgeKind::Likes),
            "PURCHASED" => Ok(EdgeKind::Purchased),
            "DISLIKES" => Ok(EdgeKind::Dislikes),
            other => Err(format!("unknown relationship type '{other}'")),
        }
    }
}

/// A single node property value.
///
/// `Bytes` is an opaque blob; the store never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Int(i64),
    Bytes(Vec<u8>),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PropertyValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Int(n)
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(b: Vec<u8>) -> Self {
        PropertyValue::Bytes(b)
    }
}

/// Full attribute record of a node, ordered by key
pub type Properties = BTreeMap<String, PropertyValue>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: Label,
    pub properties: Properties,
}

/// Parsed contents of an `edges.dat` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub username: String,
    pub kind: EdgeKind,
    pub item_name: String,
}

/// Parsed contents of an `items.dat` line
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub name: String,
    pub attributes: Vec<(String, PropertyValue)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_kind_parse() {
        assert_eq!("PURCHASED".parse::<EdgeKind>(), Ok(EdgeKind::Purchased));
        assert_eq!(EdgeKind::Dislikes.to_string(), "DISLIKES");
        assert!("likes".parse::<EdgeKind>().is_err());
    }

    #[test]
    fn test_property_accessors() {
        let text = PropertyValue::from("thing1");
        let blob = PropertyValue::from(vec![1u8, 2]);
        assert_eq!(text.as_text(), Some("thing1"));
        assert_eq!(text.as_bytes(), None);
        assert_eq!(blob.as_bytes(), Some(&[1u8, 2][..]));
    }

    #[test]
    fn test_properties_serialize_untagged() {
        let mut props = Properties::new();
        props.insert("name".to_string(), PropertyValue::from("thing1"));
        props.insert("price".to_string(), PropertyValue::Int(3));
        assert_eq!(
            serde_json::to_string(&props).unwrap(),
            r#"{"name":"thing1","price":3}"#
        );
    }
}
