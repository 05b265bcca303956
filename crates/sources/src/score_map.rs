//! Insertion-ordered score accumulator.

use crate::types::{Candidate, Score};
use graph_store::NodeId;
use std::collections::HashMap;

/// Maps ids to accumulating scores, iterating in first-insertion order.
///
/// The top-k selector ranks equal scores by arrival order, so the map must
/// hand entries over in a stable order rather than hash order.
#[derive(Debug, Clone, Default)]
pub struct ScoreMap {
    entries: Vec<(NodeId, Score)>,
    index: HashMap<NodeId, usize>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `points` to the score of `id`, creating it at zero if absent
    pub fn add(&mut self, id: NodeId, points: Score) {
        match self.index.get(&id) {
            Some(&pos) => self.entries[pos].1 += points,
            None => {
                self.index.insert(id, self.entries.len());
                self.entries.push((id, points));
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<Score> {
        self.index.get(&id).map(|&pos| self.entries[pos].1)
    }

    /// Remove an entry, keeping the order of the rest
    pub fn remove(&mut self, id: NodeId) -> Option<Score> {
        let pos = self.index.remove(&id)?;
        let (_, score) = self.entries.remove(pos);
        for (shifted, _) in &self.entries[pos..] {
            if let Some(slot) = self.index.get_mut(shifted) {
                *slot -= 1;
            }
        }
        Some(score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Score)> + '_ {
        self.entries.iter().copied()
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.entries
            .into_iter()
            .map(|(item, score)| Candidate::new(item, score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_in_first_seen_order() {
        let mut scores = ScoreMap::new();
        scores.add(7, 5);
        scores.add(3, 1);
        scores.add(7, 2);

        assert_eq!(scores.iter().collect::<Vec<_>>(), vec![(7, 7), (3, 1)]);
        assert_eq!(scores.get(7), Some(7));
        assert_eq!(scores.get(4), None);
    }

    #[test]
    fn test_remove_keeps_order_and_index() {
        let mut scores = ScoreMap::new();
        for id in [1, 2, 3, 4] {
            scores.add(id, id);
        }

        assert_eq!(scores.remove(2), Some(2));
        assert_eq!(scores.remove(2), None);
        scores.add(4, 10);

        assert_eq!(scores.iter().collect::<Vec<_>>(), vec![(1, 1), (3, 3), (4, 14)]);
        assert_eq!(scores.len(), 3);
    }
}
