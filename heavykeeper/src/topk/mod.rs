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

//! Top-K sketch for finding heavy hitters in a stream of strings.
//!
//! # Overview
//!
//! The sketch answers two questions about a stream using memory that does not grow with the
//! number of distinct items:
//! * roughly how many times has an item been seen, and
//! * which `k` items are the most frequent so far.
//!
//! It follows the HeavyKeeper design from ["HeavyKeeper: An Accurate Algorithm for Finding
//! Top-k Elephant Flows"](https://www.usenix.org/conference/atc18/presentation/gong) by Junzhi
//! Gong, Tong Yang, Haowei Zhang, Hao Li, Steve Uhlig, Shigang Chen, Lorna Uden and Xiaoming Li.
//!
//! # Counting grid
//!
//! Items are counted in `depth` independent rows of `width` buckets. Each row hashes an item
//! with its own seed (32-bit MurmurHash3) and picks one bucket. A bucket stores the fingerprint
//! of the item occupying it and a counter:
//! * an empty bucket is claimed by the incoming item with a count of one;
//! * a bucket holding the same fingerprint is incremented;
//! * a bucket holding another item is decremented with probability `decay ^ -counter`, and
//!   the newcomer only takes the bucket over once the counter reaches zero.
//!
//! Heavy items therefore become harder to dislodge the longer they are seen, while light items
//! are quickly replaced. Because a row only ever loses occurrences, the estimate for an item is
//! the largest counter among the rows that still hold it.
//!
//! # Top-K set
//!
//! After every update the item's fresh estimate is offered to a bounded min-heap of `k`
//! entries, indexed by item so that an already-tracked item is re-positioned in O(log k). An
//! untracked item enters while there is room, or when its estimate is strictly greater than the
//! smallest tracked count, which it then evicts.
//!
//! # Accuracy
//!
//! If every item lands in a bucket of its own in at least one row (a `width` much larger than
//! the number of distinct items), counts are exact. Otherwise estimates may fall below the
//! true count, with the largest items affected least. Tracked counts are refreshed only when
//! their item is added.
//!
//! # Concurrency
//!
//! All operations are synchronous. Share a sketch between threads by wrapping it in a single
//! lock, e.g. `Mutex<TopKSketch>`. Each sketch owns its random source, so independently built
//! sketches never share state.
//!
//! # Examples
//!
//! ```
//! # use heavykeeper::topk::TopKSketch;
//! let mut sketch = TopKSketch::new(2, 4, 1000, 1.08).unwrap();
//! for word in ["apple", "apple", "apple", "pear", "pear", "fig"] {
//!     sketch.add(word);
//! }
//!
//! assert_eq!(sketch.count("apple"), 3);
//! assert!(sketch.query("pear"));
//! assert!(!sketch.query("fig"));
//!
//! let top = sketch.top();
//! assert_eq!(top[0].item(), "pear");
//! assert_eq!(top[1].item(), "apple");
//! assert_eq!(top[1].count(), 3);
//! ```
//!
//! # Reproducible runs
//!
//! ```
//! # use heavykeeper::topk::TopKSketch;
//! let build = || {
//!     TopKSketch::builder(3)
//!         .depth(2)
//!         .seeds(vec![7, 13])
//!         .rng_seed(42)
//!         .build()
//!         .unwrap()
//! };
//! let (mut a, mut b) = (build(), build());
//! for i in 0..1000 {
//!     let item = format!("item-{}", i % 37);
//!     a.add(&item);
//!     b.add(&item);
//! }
//! assert_eq!(a.top(), b.top());
//! ```

mod bucket;
mod builder;
mod hash_row;
mod heavy_keeper;
mod sketch;
mod tracker;

pub use self::builder::TopKSketchBuilder;
pub use self::sketch::TopKSketch;
pub use self::tracker::Row;

/// Number of hash rows used when none is configured.
pub const DEFAULT_DEPTH: usize = 4;
/// Number of buckets per row used when none is configured.
pub const DEFAULT_WIDTH: usize = 100;
/// Decay rate used when none is configured.
pub const DEFAULT_DECAY: f64 = 1.08;
