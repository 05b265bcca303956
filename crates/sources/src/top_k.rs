//! Bounded top-k selection over an unordered stream.
//!
//! ## Algorithm
//! Keep at most `k` entries in a buffer sorted by descending score. For each
//! incoming entry:
//! 1. If the buffer is full and the score does not beat the tracked minimum,
//!    drop it.
//! 2. Otherwise binary-search the first slot holding a strictly lower score.
//!    Equal scores stay ahead, so earlier arrivals win ties.
//! 3. If full, evict the tail; insert, shifting lower entries one slot back.
//! 4. Track the tail's score as the new minimum.
//!
//! Cost is O(n log k) comparisons and the input is never materialized or
//! sorted as a whole.

use crate::types::Score;

/// Fixed-capacity, descending, arrival-stable selection buffer
#[derive(Debug, Clone)]
pub struct TopK<T> {
    capacity: usize,
    entries: Vec<(T, Score)>,
    min_score: Score,
}

impl<T> TopK<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
            min_score: Score::MAX,
        }
    }

    /// Offer an entry; returns `true` if it was kept
    pub fn push(&mut self, item: T, score: Score) -> bool {
        let full = self.entries.len() >= self.capacity;
        if self.capacity == 0 || (full && score <= self.min_score) {
            return false;
        }

        let pos = self.entries.partition_point(|&(_, kept)| kept >= score);
        if full {
            self.entries.pop();
        }
        self.entries.insert(pos, (item, score));

        if let Some(&(_, tail)) = self.entries.last() {
            self.min_score = tail;
        }
        true
    }

    /// Lowest score currently kept
    pub fn min_score(&self) -> Option<Score> {
        self.entries.last().map(|&(_, score)| score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kept entries, highest score first
    pub fn into_sorted(self) -> Vec<(T, Score)> {
        self.entries
    }
}

impl<T> Extend<(T, Score)> for TopK<T> {
    fn extend<I: IntoIterator<Item = (T, Score)>>(&mut self, iter: I) {
        for (item, score) in iter {
            self.push(item, score);
        }
    }
}

/// Ids of the `k` highest-scored entries, highest first, ties in arrival order
pub fn select_top_k<T, I>(entries: I, k: usize) -> Vec<T>
where
    I: IntoIterator<Item = (T, Score)>,
{
    let mut top = TopK::new(k);
    top.extend(entries);
    top.into_sorted().into_iter().map(|(item, _)| item).collect()
}
