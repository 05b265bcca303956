//! Request-scoped types for candidate generation.

use graph_store::NodeId;
use std::collections::HashSet;

/// Integer score accumulated per user or item
pub type Score = u32;

/// An item proposed for recommendation, with its co-occurrence count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub item: NodeId,
    pub score: Score,
}

impl Candidate {
    pub fn new(item: NodeId, score: Score) -> Self {
        Self { item, score }
    }
}

/// A deduplicated set that remembers first-insertion order.
///
/// Walking a user's interactions in a stable order keeps every downstream
/// score map, and therefore every tie break, reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionSet {
    order: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl InteractionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the item was not already present
    pub fn insert(&mut self, item: NodeId) -> bool {
        if self.members.insert(item) {
            self.order.push(item);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, item: NodeId) -> bool {
        self.members.contains(&item)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }
}

impl FromIterator<NodeId> for InteractionSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = InteractionSet::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

/// Everything the target user has already done, gathered once per request
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user: NodeId,
    pub username: String,
    pub liked: InteractionSet,
    pub purchased: InteractionSet,
    pub disliked: InteractionSet,
}

impl UserContext {
    pub fn new(user: NodeId, username: impl Into<String>) -> Self {
        Self {
            user,
            username: username.into(),
            liked: InteractionSet::new(),
            purchased: InteractionSet::new(),
            disliked: InteractionSet::new(),
        }
    }

    /// Whether the user already liked, purchased or disliked this item
    pub fn has_interacted(&self, item: NodeId) -> bool {
        self.liked.contains(item) || self.purchased.contains(item) || self.disliked.contains(item)
    }
}
