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

use rand::Rng;

use crate::hash::SeededHasher;
use crate::topk::bucket::Bucket;

/// One independent row of the counting grid: a fixed array of buckets addressed by a seeded
/// hasher.
///
/// An item maps to exactly one bucket per row, at `fingerprint % width`.
#[derive(Debug, Clone)]
pub(super) struct HashRow {
    hasher: SeededHasher,
    buckets: Box<[Bucket]>,
}

impl HashRow {
    pub fn new(width: usize, seed: u32) -> Self {
        assert!(width > 0, "width must be at least 1");
        Self {
            hasher: SeededHasher::new(seed),
            buckets: vec![Bucket::default(); width].into_boxed_slice(),
        }
    }

    pub fn seed(&self) -> u32 {
        self.hasher.seed()
    }

    /// Applies one occurrence of `item` to this row.
    ///
    /// An empty bucket is claimed, a matching bucket is incremented, and a bucket held by another
    /// item is decayed; the newcomer only takes over once the incumbent's counter reaches zero.
    pub fn update<R: Rng + ?Sized>(&mut self, item: &[u8], decay: f64, rng: &mut R) {
        let fingerprint = self.hasher.hash(item);
        let index = self.index(fingerprint);
        let bucket = &mut self.buckets[index];

        if bucket.is_empty() {
            bucket.seize(fingerprint);
            bucket.increment();
        } else if bucket.has_fingerprint(fingerprint) {
            bucket.increment();
        } else if bucket.decay(decay, rng) && bucket.is_empty() {
            bucket.seize(fingerprint);
            bucket.increment();
        }
    }

    /// Returns the counter of the bucket `item` maps to, if `item` currently occupies it.
    pub fn count(&self, item: &[u8]) -> Option<u32> {
        let fingerprint = self.hasher.hash(item);
        let bucket = &self.buckets[self.index(fingerprint)];
        bucket
            .has_fingerprint(fingerprint)
            .then_some(bucket.counter())
    }

    pub fn clear(&mut self) {
        self.buckets.fill(Bucket::default());
    }

    #[inline]
    fn index(&self, fingerprint: u32) -> usize {
        fingerprint as usize % self.buckets.len()
    }
}
