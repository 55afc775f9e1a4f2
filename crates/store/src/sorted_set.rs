//! Member sets ordered ascending by (score, member)

use ick_common::Score;
use std::collections::{BTreeSet, HashMap};

/// An ordered member set: each member is unique and carries one score, and
/// iteration runs ascending by score with the member string breaking ties.
#[derive(Debug, Clone, Default)]
pub struct SortedSet {
    by_member: HashMap<String, Score>,
    ordered: BTreeSet<(Score, String)>,
}

impl SortedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Inserts or re-scores a member, returning the previous score if any.
    pub fn insert(&mut self, member: &str, score: Score) -> Option<Score> {
        let previous = self.by_member.insert(member.to_string(), score);
        if let Some(old) = previous {
            self.ordered.remove(&(old, member.to_string()));
        }
        self.ordered.insert((score, member.to_string()));
        previous
    }

    /// Removes a member, reporting whether it was present.
    pub fn remove(&mut self, member: &str) -> bool {
        match self.by_member.remove(member) {
            Some(score) => {
                self.ordered.remove(&(score, member.to_string()));
                true
            }
            None => false,
        }
    }

    pub fn score(&self, member: &str) -> Option<Score> {
        self.by_member.get(member).copied()
    }

    /// Members between two rank indices, both inclusive, negative indices
    /// counting back from the end.
    pub fn range(&self, start: i64, stop: i64) -> Vec<(String, Score)> {
        let len = self.ordered.len() as i64;
        if len == 0 {
            return Vec::new();
        }
        let normalize = |index: i64| if index < 0 { len + index } else { index };
        let start = normalize(start).max(0);
        let stop = normalize(stop).min(len - 1);
        if start > stop {
            return Vec::new();
        }
        self.ordered
            .iter()
            .skip(start as usize)
            .take((stop - start + 1) as usize)
            .map(|(score, member)| (member.clone(), *score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(entries: &[(&str, f64)]) -> SortedSet {
        let mut set = SortedSet::new();
        for (member, score) in entries {
            set.insert(member, Score::new(*score));
        }
        set
    }

    #[test]
    fn test_insert_orders_by_score() {
        let set = set_of(&[("b", 2.0), ("a", 3.0), ("c", 1.0)]);
        let members: Vec<String> = set.range(0, -1).into_iter().map(|(m, _)| m).collect();
        assert_eq!(members, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_reinsert_moves_member() {
        let mut set = set_of(&[("a", 5.0), ("b", 1.0)]);
        let previous = set.insert("a", Score::new(0.5));
        assert_eq!(previous, Some(Score::new(5.0)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.range(0, 0)[0].0, "a");
    }

    #[test]
    fn test_remove() {
        let mut set = set_of(&[("a", 1.0)]);
        assert!(set.remove("a"));
        assert!(!set.remove("a"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_range_negative_indices() {
        let set = set_of(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        assert_eq!(set.range(-1, -1)[0].0, "c");
        assert_eq!(set.range(0, 0)[0].0, "a");
        assert_eq!(set.range(1, -1).len(), 2);
        assert!(set.range(2, 1).is_empty());
    }

    #[test]
    fn test_equal_scores_break_ties_by_member() {
        let set = set_of(&[("y", 1.0), ("x", 1.0)]);
        let members: Vec<String> = set.range(0, -1).into_iter().map(|(m, _)| m).collect();
        assert_eq!(members, vec!["x", "y"]);
    }
}
