//! Synthetic graphs for tests, benchmarks and the CLI.

use crate::error::Result;
use crate::store::GraphStore;
use crate::types::{EdgeKind, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build the sliding-window graph: `user{i}` likes `thing{i}` and
/// `thing{i+1}`, purchases `thing{i+2}` and `thing{i+3}`, dislikes
/// `thing{i+4}` and `thing{i+5}`, and carries a dislikes blob.
///
/// Users are created first, so `user{i}` has id `i` and `thing{j}` has id
/// `users + j`. `items` must be at least `users + 5`.
pub fn chain_graph(users: usize, items: usize) -> Result<GraphStore> {
    let mut store = GraphStore::new();

    let user_ids: Vec<NodeId> = (0..users)
        .map(|i| store.create_user(&format!("user{i}")))
        .collect::<Result<_>>()?;
    let item_ids: Vec<NodeId> = (0..items)
        .map(|i| store.create_item(&format!("thing{i}")))
        .collect::<Result<_>>()?;

    let pattern = [
        (0, EdgeKind::Likes),
        (1, EdgeKind::Likes),
        (2, EdgeKind::Purchased),
        (3, EdgeKind::Purchased),
        (4, EdgeKind::Dislikes),
        (5, EdgeKind::Dislikes),
    ];

    for (i, &user) in user_ids.iter().enumerate() {
        for (shift, kind) in pattern {
            if let Some(&item) = item_ids.get(i + shift) {
                store.relate(user, kind, item)?;
            }
        }
        store.write_dislikes_blob(user)?;
    }

    Ok(store)
}

/// Shape of a randomly wired graph
#[derive(Debug, Clone, Copy)]
pub struct RandomGraphConfig {
    pub users: usize,
    pub items: usize,
    /// LIKES edges per user
    pub likes: usize,
    /// DISLIKES edges per user
    pub dislikes: usize,
    /// PURCHASED edges per user
    pub purchases: usize,
}

impl Default for RandomGraphConfig {
    fn default() -> Self {
        Self {
            users: 10_000,
            items: 1_000,
            likes: 50,
            dislikes: 250,
            purchases: 5,
        }
    }
}

/// Build a graph where every user gets random LIKES, PURCHASED and
/// DISLIKES edges (duplicates possible) plus a matching dislikes blob.
/// The same seed always yields the same graph.
pub fn random_graph(config: RandomGraphConfig, seed: u64) -> Result<GraphStore> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = GraphStore::new();

    let user_ids: Vec<NodeId> = (0..config.users)
        .map(|i| store.create_user(&format!("user{i}")))
        .collect::<Result<_>>()?;
    let item_ids: Vec<NodeId> = (0..config.items)
        .map(|i| store.create_item(&format!("thing{i}")))
        .collect::<Result<_>>()?;

    if item_ids.is_empty() {
        return Ok(store);
    }

    for &user in &user_ids {
        for (count, kind) in [
            (config.likes, EdgeKind::Likes),
            (config.purchases, EdgeKind::Purchased),
            (config.dislikes, EdgeKind::Dislikes),
        ] {
            for _ in 0..count {
                let item = item_ids[rng.random_range(0..item_ids.len())];
                store.relate(user, kind, item)?;
            }
        }
        store.write_dislikes_blob(user)?;
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::Traversal;

    #[test]
    fn test_chain_graph_shape() {
        let store = chain_graph(100, 105).unwrap();
        assert_eq!(store.counts(), (100, 105, 600));

        let user10 = store.find_user("user10").unwrap().unwrap();
        assert_eq!(user10, 10);
        let disliked: Vec<NodeId> = store
            .outgoing(user10, &[EdgeKind::Dislikes])
            .unwrap()
            .into_iter()
            .map(|(_, item)| item)
            .collect();
        assert_eq!(disliked, vec![100 + 14, 100 + 15]);
    }

    #[test]
    fn test_chain_graph_truncates_at_last_item() {
        let store = chain_graph(3, 4).unwrap();
        // user0: 4 edges, user1: 3, user2: 2
        assert_eq!(store.counts(), (3, 4, 9));
    }

    #[test]
    fn test_random_graph_is_reproducible() {
        let config = RandomGraphConfig {
            users: 20,
            items: 30,
            likes: 5,
            dislikes: 3,
            purchases: 2,
        };
        let a = random_graph(config, 9).unwrap();
        let b = random_graph(config, 9).unwrap();

        assert_eq!(a.counts(), (20, 30, 200));
        for user in 0..20 {
            assert_eq!(
                a.outgoing(user, &[EdgeKind::Likes]).unwrap(),
                b.outgoing(user, &[EdgeKind::Likes]).unwrap()
            );
        }
    }
}
