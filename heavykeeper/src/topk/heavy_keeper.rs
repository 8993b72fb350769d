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

//! The HeavyKeeper counting grid.

use rand::rngs::StdRng;

use crate::topk::hash_row::HashRow;

/// `depth` independent hash rows of `width` buckets each, updated with the count-with-decay
/// rule and queried with a max over the rows that still hold the item.
///
/// The grid owns its random source, so two grids never share decay coin flips.
#[derive(Debug, Clone)]
pub(super) struct HeavyKeeper {
    width: usize,
    decay: f64,
    rows: Vec<HashRow>,
    rng: StdRng,
}

impl HeavyKeeper {
    /// Creates a grid with one row per entry of `seeds`.
    ///
    /// # Panics
    ///
    /// Panics if `seeds` is empty, `width` is zero, or `decay` is not greater than 1.0.
    pub fn new(width: usize, decay: f64, seeds: &[u32], rng: StdRng) -> Self {
        assert!(!seeds.is_empty(), "depth must be at least 1");
        assert!(decay > 1.0, "decay must be greater than 1.0, got {decay}");
        let rows = seeds.iter().map(|&seed| HashRow::new(width, seed)).collect();
        Self {
            width,
            decay,
            rows,
            rng,
        }
    }

    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn seeds(&self) -> Vec<u32> {
        self.rows.iter().map(HashRow::seed).collect()
    }

    /// Records one occurrence of `item` in every row.
    pub fn update(&mut self, item: &[u8]) {
        for row in self.rows.iter_mut() {
            row.update(item, self.decay, &mut self.rng);
        }
    }

    /// Returns the estimated count of `item`.
    ///
    /// Rows whose bucket is held by another item are skipped rather than read as zero: a row
    /// can only lose occurrences to collisions, so the largest matching counter is the best
    /// estimate. Returns zero if no row holds the item.
    pub fn estimate(&self, item: &[u8]) -> u64 {
        self.rows
            .iter()
            .filter_map(|row| row.count(item))
            .max()
            .map_or(0, u64::from)
    }

    /// Empties every bucket, keeping the row seeds.
    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(HashRow::clear);
    }
}
