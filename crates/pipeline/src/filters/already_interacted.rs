//! Filter to remove items the user has already liked, purchased or disliked.
//!
//! This is the first filter in the pipeline: recommending something the
//! user already owns, already likes, or explicitly rejected is never useful.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};

/// Removes candidates present in any of the user's interaction sets.
///
/// ## Algorithm
/// Uses the HashSets inside UserContext for O(1) lookups.
pub struct AlreadyInteractedFilter;

impl Filter for AlreadyInteractedFilter {
    fn name(&self) -> &str {
        "AlreadyInteractedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !context.has_interacted(candidate.item))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_interacted_filter() {
        let mut context = UserContext::new(1, "user1");
        context.liked.insert(100);
        context.purchased.insert(200);
        context.disliked.insert(300);

        let candidates = vec![
            Candidate::new(100, 9),
            Candidate::new(101, 8),
            Candidate::new(200, 7),
            Candidate::new(300, 6),
            Candidate::new(400, 6),
        ];

        let filter = AlreadyInteractedFilter;
        let filtered = filter.apply(candidates, &context).unwrap();

        assert_eq!(filtered, vec![Candidate::new(101, 8), Candidate::new(400, 6)]);
    }
}
