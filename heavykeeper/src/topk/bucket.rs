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

/// One counting cell of a hash row: the fingerprint of its current occupant and a saturating
/// counter.
///
/// A zero counter marks the bucket as empty, in which case the fingerprint is meaningless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Bucket {
    fingerprint: u32,
    counter: u32,
}

impl Bucket {
    pub fn is_empty(&self) -> bool {
        self.counter == 0
    }

    /// Returns true if the bucket is occupied by the item with `fingerprint`.
    pub fn has_fingerprint(&self, fingerprint: u32) -> bool {
        !self.is_empty() && self.fingerprint == fingerprint
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Claims the bucket for `fingerprint`. The bucket must be empty.
    pub fn seize(&mut self, fingerprint: u32) {
        debug_assert!(self.is_empty(), "seize called on an occupied bucket");
        self.fingerprint = fingerprint;
    }

    pub fn increment(&mut self) {
        self.counter = self.counter.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.counter = self.counter.saturating_sub(1);
    }

    /// Decrements the counter with probability `rate ^ -counter`.
    ///
    /// Returns true if the counter was decremented.
    pub fn decay<R: Rng + ?Sized>(&mut self, rate: f64, rng: &mut R) -> bool {
        let probability = rate.powf(-(self.counter as f64));
        if rng.random::<f64>() < probability {
            self.decrement();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn occupied(fingerprint: u32, counter: u32) -> Bucket {
        Bucket {
            fingerprint,
            counter,
        }
    }

    #[test]
    fn test_empty_bucket() {
        let bucket = Bucket::default();
        assert!(bucket.is_empty());
        // a zeroed fingerprint must not match while the bucket is empty
        assert!(!bucket.has_fingerprint(0));
    }

    #[test]
    fn test_seize_and_increment() {
        let mut bucket = Bucket::default();
        bucket.seize(42);
        bucket.increment();
        assert!(bucket.has_fingerprint(42));
        assert!(!bucket.has_fingerprint(43));
        bucket.increment();
        assert_eq!(bucket.counter(), 2);
    }

    #[test]
    fn test_counter_saturates() {
        let mut bucket = occupied(7, u32::MAX);
        bucket.increment();
        assert_eq!(bucket.counter(), u32::MAX);

        let mut bucket = occupied(7, 1);
        bucket.decrement();
        bucket.decrement();
        assert_eq!(bucket.counter(), 0);
        assert!(bucket.is_empty());
    }

    #[test]
    fn test_decay_probability() {
        const TRIALS: usize = 100_000;
        let mut rng = StdRng::seed_from_u64(7);

        for (rate, counter) in [(1.08, 1u32), (1.08, 10), (1.05, 30), (1.5, 4)] {
            let expected = f64::powf(rate, -(counter as f64));
            let mut evictions = 0usize;
            for _ in 0..TRIALS {
                let mut bucket = occupied(1, counter);
                if bucket.decay(rate, &mut rng) {
                    assert_eq!(bucket.counter(), counter - 1);
                    evictions += 1;
                } else {
                    assert_eq!(bucket.counter(), counter);
                }
            }
            let observed = evictions as f64 / TRIALS as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "rate {rate}, counter {counter}: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_heavy_counter_is_sticky() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut bucket = occupied(1, 1_000);
        for _ in 0..10_000 {
            assert!(!bucket.decay(1.08, &mut rng));
        }
        assert_eq!(bucket.counter(), 1_000);
    }
}
