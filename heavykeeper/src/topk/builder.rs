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
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::Error;
use crate::topk::DEFAULT_DECAY;
use crate::topk::DEFAULT_DEPTH;
use crate::topk::DEFAULT_WIDTH;
use crate::topk::heavy_keeper::HeavyKeeper;
use crate::topk::sketch::TopKSketch;
use crate::topk::tracker::TopKTracker;

/// Builder for [`TopKSketch`].
///
/// Parameters are validated by [`TopKSketchBuilder::build`].
#[derive(Debug, Clone)]
pub struct TopKSketchBuilder {
    k: usize,
    depth: usize,
    width: usize,
    decay: f64,
    seeds: Option<Vec<u32>>,
    rng_seed: Option<u64>,
}

impl TopKSketchBuilder {
    pub(super) fn new(k: usize) -> Self {
        Self {
            k,
            depth: DEFAULT_DEPTH,
            width: DEFAULT_WIDTH,
            decay: DEFAULT_DECAY,
            seeds: None,
            rng_seed: None,
        }
    }

    /// Set the number of hash rows.
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Set the number of buckets per row.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the decay rate; must be greater than 1.0.
    pub fn decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Use fixed hash seeds, one per row, instead of drawing them at random.
    ///
    /// The number of seeds must equal the configured depth.
    pub fn seeds(mut self, seeds: Vec<u32>) -> Self {
        self.seeds = Some(seeds);
        self
    }

    /// Seed the sketch's random source, which draws row seeds and decay coin flips.
    ///
    /// Without it the source is seeded from the operating system.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Build the [`TopKSketch`].
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) error
    /// if `k`, `depth` or `width` is zero, if `decay` is not a finite number greater than 1.0,
    /// or if explicit seeds do not match `depth`.
    pub fn build(self) -> Result<TopKSketch, Error> {
        if self.k < 1 {
            return Err(Error::invalid_argument(format!(
                "k must be at least 1, got {}",
                self.k
            )));
        }
        if self.depth < 1 {
            return Err(Error::invalid_argument(format!(
                "depth must be at least 1, got {}",
                self.depth
            )));
        }
        if self.width < 1 {
            return Err(Error::invalid_argument(format!(
                "width must be at least 1, got {}",
                self.width
            )));
        }
        if !(self.decay.is_finite() && self.decay > 1.0) {
            return Err(Error::invalid_argument(format!(
                "decay must be a finite number greater than 1.0, got {}",
                self.decay
            )));
        }

        let mut rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let seeds = match self.seeds {
            Some(seeds) if seeds.len() != self.depth => {
                return Err(Error::invalid_argument(format!(
                    "expected {} seeds to match depth, got {}",
                    self.depth,
                    seeds.len()
                )));
            }
            Some(seeds) => seeds,
            None => (0..self.depth).map(|_| rng.random::<u32>()).collect(),
        };

        let heavy_keeper = HeavyKeeper::new(self.width, self.decay, &seeds, rng);
        let tracker = TopKTracker::new(self.k);
        Ok(TopKSketch::from_parts(heavy_keeper, tracker))
    }
}
