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

use crate::error::Error;
use crate::topk::builder::TopKSketchBuilder;
use crate::topk::heavy_keeper::HeavyKeeper;
use crate::topk::tracker::Row;
use crate::topk::tracker::TopKTracker;

/// Top-K heavy hitters sketch over a stream of strings.
///
/// See [`crate::topk`] for an overview and accuracy notes.
#[derive(Debug, Clone)]
pub struct TopKSketch {
    heavy_keeper: HeavyKeeper,
    tracker: TopKTracker,
    total_weight: u64,
}

impl TopKSketch {
    /// Creates a new builder tracking the `k` most frequent items.
    ///
    /// # Examples
    ///
    /// ```
    /// # use heavykeeper::topk::TopKSketch;
    /// let sketch = TopKSketch::builder(10).width(512).decay(1.05).build().unwrap();
    /// assert_eq!(sketch.k(), 10);
    /// assert_eq!(sketch.width(), 512);
    /// assert_eq!(sketch.depth(), 4);
    /// ```
    pub fn builder(k: usize) -> TopKSketchBuilder {
        TopKSketchBuilder::new(k)
    }

    /// Creates a sketch with every parameter given explicitly and randomly drawn row seeds.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`TopKSketchBuilder::build`].
    pub fn new(k: usize, depth: usize, width: usize, decay: f64) -> Result<Self, Error> {
        Self::builder(k)
            .depth(depth)
            .width(width)
            .decay(decay)
            .build()
    }

    pub(super) fn from_parts(heavy_keeper: HeavyKeeper, tracker: TopKTracker) -> Self {
        Self {
            heavy_keeper,
            tracker,
            total_weight: 0,
        }
    }

    /// Returns the maximum number of tracked items.
    pub fn k(&self) -> usize {
        self.tracker.capacity()
    }

    /// Returns the number of hash rows.
    pub fn depth(&self) -> usize {
        self.heavy_keeper.depth()
    }

    /// Returns the number of buckets per row.
    pub fn width(&self) -> usize {
        self.heavy_keeper.width()
    }

    /// Returns the decay rate.
    pub fn decay(&self) -> f64 {
        self.heavy_keeper.decay()
    }

    /// Returns the hash seed of every row, in row order.
    pub fn seeds(&self) -> Vec<u32> {
        self.heavy_keeper.seeds()
    }

    /// Returns true if nothing has been added since construction or the last reset.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Returns the number of items added since construction or the last reset.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns the number of items currently in the Top-K set.
    pub fn num_tracked(&self) -> usize {
        self.tracker.len()
    }

    /// Records one occurrence of `item`.
    ///
    /// Every row of the counting grid is updated first; the item's refreshed estimate is then
    /// offered to the Top-K set, which may admit it, update it in place, or evict its current
    /// minimum to make room.
    pub fn add(&mut self, item: &str) {
        self.total_weight += 1;
        self.heavy_keeper.update(item.as_bytes());
        let estimate = self.heavy_keeper.estimate(item.as_bytes());
        self.tracker.offer(item, estimate);
    }

    /// Returns the estimated count of `item`, whether or not it is in the Top-K set.
    ///
    /// The estimate never exceeds the true count except on a 32-bit fingerprint collision, and
    /// is zero for items never added.
    pub fn count(&self, item: &str) -> u64 {
        self.heavy_keeper.estimate(item.as_bytes())
    }

    /// Returns true if `item` is currently in the Top-K set.
    pub fn query(&self, item: &str) -> bool {
        self.tracker.contains(item)
    }

    /// Returns the Top-K set sorted ascending by count.
    ///
    /// Items with equal counts are ordered by item. At most `k` rows are returned.
    pub fn top(&self) -> Vec<Row> {
        self.tracker.rows()
    }

    /// Resets the sketch to an empty state, keeping its configuration and row seeds.
    pub fn reset(&mut self) {
        self.heavy_keeper.clear();
        self.tracker.clear();
        self.total_weight = 0;
    }
}
