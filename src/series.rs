// src/series.rs
use std::collections::VecDeque;

/// Bounded FIFO store for recent observations.
///
/// Appends go to the tail; once the configured capacity is exceeded the
/// oldest element is evicted from the head. Eviction is strictly
/// insertion-ordered, never by value. Histograms and summaries are
/// recomputed from a snapshot of the current contents, so the store itself
/// carries no derived state.
#[derive(Debug, Clone)]
pub struct RollingSeries<T> {
    values: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingSeries<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append a value, evicting the oldest entry if the store is full.
    /// Returns the evicted value, if any.
    pub fn push(&mut self, value: T) -> Option<T> {
        self.values.push_back(value);
        if self.values.len() > self.capacity {
            self.values.pop_front()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: Copy> RollingSeries<T> {
    /// Snapshot of the current contents in insertion order.
    pub fn as_vec(&self) -> Vec<T> {
        self.values.iter().copied().collect()
    }

    /// Pairs formed from adjacent slots: (v[0], v[1]), (v[1], v[2]), ...
    ///
    /// Pairing order is insertion order. Used to relate each observation to
    /// the one that followed it, e.g. consecutive inter-arrival times.
    pub fn adjacent_pairs(&self) -> Vec<(T, T)> {
        let snapshot = self.as_vec();
        snapshot.windows(2).map(|w| (w[0], w[1])).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_below_capacity_keeps_everything() {
        let mut series = RollingSeries::with_capacity(5);
        for i in 0..3 {
            assert_eq!(series.push(i), None);
        }
        assert_eq!(series.as_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn push_past_capacity_evicts_oldest_first() {
        let cap = 100;
        let mut series = RollingSeries::with_capacity(cap);
        for i in 0..(cap + 5) {
            series.push(i);
        }
        assert_eq!(series.len(), cap);
        let expected: Vec<usize> = (5..cap + 5).collect();
        assert_eq!(series.as_vec(), expected);
    }

    #[test]
    fn eviction_returns_the_displaced_value() {
        let mut series = RollingSeries::with_capacity(2);
        series.push(10.0);
        series.push(20.0);
        assert_eq!(series.push(30.0), Some(10.0));
        assert_eq!(series.as_vec(), vec![20.0, 30.0]);
    }

    #[test]
    fn clear_empties_the_store() {
        let mut series = RollingSeries::with_capacity(4);
        series.push(1u32);
        series.push(2);
        series.clear();
        assert!(series.is_empty());
        assert_eq!(series.capacity(), 4);
    }

    #[test]
    fn adjacent_pairs_follow_insertion_order() {
        let mut series = RollingSeries::with_capacity(10);
        for v in [0.5, 1.5, 2.5, 3.5] {
            series.push(v);
        }
        assert_eq!(
            series.adjacent_pairs(),
            vec![(0.5, 1.5), (1.5, 2.5), (2.5, 3.5)]
        );
    }

    #[test]
    fn adjacent_pairs_need_at_least_two_values() {
        let mut series = RollingSeries::with_capacity(10);
        assert!(series.adjacent_pairs().is_empty());
        series.push(1.0);
        assert!(series.adjacent_pairs().is_empty());
    }
}
