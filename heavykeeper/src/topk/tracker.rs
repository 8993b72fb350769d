// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Bounded min-heap of the current Top-K candidates.

use std::collections::HashMap;

/// A tracked item and its estimated count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    item: String,
    count: u64,
}

impl Row {
    /// Returns the item.
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Returns the estimated count of the item.
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Indexed binary min-heap ordered by count, holding at most `capacity` distinct items.
///
/// `slots` maps every tracked item to its position in `heap` and is kept in sync on every swap,
/// so finding and re-positioning a tracked item is O(log k).
#[derive(Debug, Clone)]
pub(super) struct TopKTracker {
    capacity: usize,
    heap: Vec<Row>,
    slots: HashMap<String, usize>,
}

impl TopKTracker {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "k must be at least 1");
        Self {
            capacity,
            heap: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.slots.contains_key(item)
    }

    /// Offers the latest estimate for `item`.
    ///
    /// A tracked item takes the new count in place. An untracked item is admitted while there
    /// is room, or when its count beats the current minimum, which is then evicted.
    pub fn offer(&mut self, item: &str, count: u64) {
        if let Some(&slot) = self.slots.get(item) {
            self.heap[slot].count = count;
            let slot = self.sift_up(slot);
            self.sift_down(slot);
        } else if self.heap.len() < self.capacity {
            let slot = self.heap.len();
            self.slots.insert(item.to_owned(), slot);
            self.heap.push(Row {
                item: item.to_owned(),
                count,
            });
            self.sift_up(slot);
        } else if count > self.heap[0].count {
            let evicted = std::mem::replace(
                &mut self.heap[0],
                Row {
                    item: item.to_owned(),
                    count,
                },
            );
            self.slots.remove(&evicted.item);
            self.slots.insert(item.to_owned(), 0);
            self.sift_down(0);
        }
    }

    /// Returns the tracked rows sorted ascending by count, ties ordered by item.
    pub fn rows(&self) -> Vec<Row> {
        let mut rows = self.heap.clone();
        rows.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.item.cmp(&b.item)));
        rows
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    /// Moves the row at `slot` towards the root; returns its final position.
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].count >= self.heap[parent].count {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.heap[left].count < self.heap[smallest].count {
                smallest = left;
            }
            if right < len && self.heap[right].count < self.heap[smallest].count {
                smallest = right;
            }
            if smallest == slot {
                return;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        for slot in [a, b] {
            if let Some(index) = self.slots.get_mut(&self.heap[slot].item) {
                *index = slot;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn check_invariants(tracker: &TopKTracker) {
        assert!(tracker.heap.len() <= tracker.capacity);
        assert_eq!(tracker.heap.len(), tracker.slots.len());
        for (slot, row) in tracker.heap.iter().enumerate() {
            assert_eq!(tracker.slots[&row.item], slot, "stale slot for {}", row.item);
            if slot > 0 {
                let parent = (slot - 1) / 2;
                assert!(tracker.heap[parent].count <= row.count, "heap order broken");
            }
        }
    }

    fn counts(tracker: &TopKTracker) -> Vec<(String, u64)> {
        tracker
            .rows()
            .into_iter()
            .map(|row| (row.item, row.count))
            .collect()
    }

    #[test]
    fn test_fills_then_rejects_light_items() {
        let mut tracker = TopKTracker::new(2);
        tracker.offer("a", 5);
        tracker.offer("b", 3);
        tracker.offer("c", 3);
        assert!(!tracker.contains("c"));
        assert_eq!(
            counts(&tracker),
            vec![("b".to_string(), 3), ("a".to_string(), 5)]
        );
    }

    #[test]
    fn test_evicts_minimum() {
        let mut tracker = TopKTracker::new(3);
        tracker.offer("a", 5);
        tracker.offer("b", 1);
        tracker.offer("c", 7);
        tracker.offer("d", 2);
        assert!(!tracker.contains("b"));
        assert!(tracker.contains("d"));
        assert_eq!(tracker.len(), 3);
        check_invariants(&tracker);
    }

    #[test]
    fn test_update_in_place_moves_both_ways() {
        let mut tracker = TopKTracker::new(4);
        for (item, count) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            tracker.offer(item, count);
        }
        tracker.offer("a", 10);
        check_invariants(&tracker);
        assert_eq!(tracker.heap[0].item, "b");

        tracker.offer("d", 0);
        check_invariants(&tracker);
        assert_eq!(tracker.heap[0].item, "d");
        assert_eq!(tracker.len(), 4);
    }

    #[test]
    fn test_rows_break_ties_by_item() {
        let mut tracker = TopKTracker::new(3);
        tracker.offer("pear", 2);
        tracker.offer("apple", 2);
        tracker.offer("fig", 1);
        assert_eq!(
            counts(&tracker),
            vec![
                ("fig".to_string(), 1),
                ("apple".to_string(), 2),
                ("pear".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_randomized_offers_keep_index_consistent() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut tracker = TopKTracker::new(8);
        for _ in 0..10_000 {
            let item = format!("item-{}", rng.random_range(0..32));
            let count = rng.random_range(0..100u64);
            let was_full = tracker.len() == tracker.capacity();
            let floor = tracker.heap.first().map(|row| row.count);
            let was_tracked = tracker.contains(&item);

            tracker.offer(&item, count);
            check_invariants(&tracker);

            if was_tracked {
                assert_eq!(tracker.heap[tracker.slots[&item]].count, count);
            } else if !was_full || floor.is_some_and(|floor| count > floor) {
                assert!(tracker.contains(&item));
            } else {
                assert!(!tracker.contains(&item));
            }
        }
    }

    #[test]
    fn test_clear() {
        let mut tracker = TopKTracker::new(2);
        tracker.offer("a", 1);
        tracker.clear();
        assert_eq!(tracker.len(), 0);
        assert!(!tracker.contains("a"));
        assert!(tracker.rows().is_empty());
    }

    #[test]
    #[should_panic(expected = "k must be at least 1")]
    fn test_zero_capacity() {
        TopKTracker::new(0);
    }
}
