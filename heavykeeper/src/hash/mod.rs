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

//! Seeded 32-bit hashing used to fingerprint stream items.
//!
//! Every row of the counting grid behind [`TopKSketch`](crate::topk::TopKSketch) owns one
//! [`SeededHasher`]. The hasher is a plain value (an algorithm tag and a seed) with no hidden
//! state, so two hashers with equal fields always produce equal fingerprints.

mod murmurhash;

pub use self::murmurhash::murmurhash3_x86_32;

/// Hash algorithm backing a [`SeededHasher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HashAlgorithm {
    /// 32-bit MurmurHash3, x86 variant.
    Murmur3X86_32,
}

/// A hash function identified by its algorithm and seed.
///
/// # Examples
///
/// ```
/// # use heavykeeper::hash::SeededHasher;
/// let hasher = SeededHasher::new(42);
/// assert_eq!(hasher.hash(b"apple"), hasher.hash(b"apple"));
/// assert_eq!(hasher.seed(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeededHasher {
    algorithm: HashAlgorithm,
    seed: u32,
}

impl SeededHasher {
    /// Creates a MurmurHash3 hasher with the given seed.
    pub fn new(seed: u32) -> Self {
        Self::with_algorithm(HashAlgorithm::Murmur3X86_32, seed)
    }

    /// Creates a hasher for an explicit algorithm and seed.
    pub fn with_algorithm(algorithm: HashAlgorithm, seed: u32) -> Self {
        Self { algorithm, seed }
    }

    /// Returns the algorithm.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Returns the seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Hashes `bytes` into a 32-bit fingerprint.
    #[inline]
    pub fn hash(&self, bytes: &[u8]) -> u32 {
        match self.algorithm {
            HashAlgorithm::Murmur3X86_32 => murmurhash3_x86_32(bytes, self.seed),
        }
    }
}
