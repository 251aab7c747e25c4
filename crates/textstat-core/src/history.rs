//! Fixed-capacity FIFO history.
//!
//! [`BoundedHistory`] keeps the most recent `capacity` entries in insertion
//! order. Pushing past capacity evicts the oldest entry.

use std::collections::VecDeque;

use serde::Serialize;

/// A fixed-capacity queue that evicts its oldest entry on overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BoundedHistory<T> {
    #[serde(skip)]
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> BoundedHistory<T> {
    /// Create an empty history holding at most `capacity` entries.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an entry, returning the evicted oldest entry if the history
    /// was already full.
    pub fn push(&mut self, entry: T) -> Option<T> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Entries in insertion order, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + DoubleEndedIterator {
        self.entries.iter()
    }

    /// Most recently pushed entry.
    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries retained.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a, T> IntoIterator for &'a BoundedHistory<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_within_capacity_keeps_everything() {
        let mut history = BoundedHistory::new(3);
        assert_eq!(history.push(1), None);
        assert_eq!(history.push(2), None);
        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn overflow_evicts_oldest_first() {
        let mut history = BoundedHistory::new(3);
        for n in 1..=3 {
            history.push(n);
        }
        assert_eq!(history.push(4), Some(1));
        assert_eq!(history.push(5), Some(2));
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(history.latest(), Some(&5));
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut history = BoundedHistory::new(5);
        for n in 0..100 {
            history.push(n);
            assert!(history.len() <= history.capacity());
        }
        assert_eq!(history.len(), 5);
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![95, 96, 97, 98, 99]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut history = BoundedHistory::new(0);
        assert_eq!(history.capacity(), 1);
        history.push("a");
        assert_eq!(history.push("b"), Some("a"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn clear_empties_history() {
        let mut history = BoundedHistory::new(2);
        history.push('x');
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut history = BoundedHistory::new(2);
        history.push(1);
        history.push(2);
        history.push(3);
        assert_eq!(serde_json::to_string(&history).unwrap(), "[2,3]");
    }
}
