// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Seeded synthetic instance generation for benchmarks and randomized
//! tests. Same seed, same instance.

use crate::event::EventSpan;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Lower bound on the duration standard deviation so the normal
/// distribution stays well-defined even for degenerate configs.
const DURATION_SIGMA_FLOOR: f64 = 1e-6;

/// Configuration for synthetic event generation (minute units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventGenConfig {
    count: usize,
    horizon_min: i16,
    duration_mean: f64,
    duration_sigma: f64,
    min_duration: i16,
    max_duration: i16,
    seed: u64,
}

impl Default for EventGenConfig {
    /// One day of events: 50 blocks in a 1440-minute horizon, durations
    /// normally distributed around an hour.
    #[inline]
    fn default() -> Self {
        Self {
            count: 50,
            horizon_min: 1440,
            duration_mean: 60.0,
            duration_sigma: 30.0,
            min_duration: 15,
            max_duration: 240,
            seed: 42,
        }
    }
}

impl EventGenConfig {
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn horizon_min(&self) -> i16 {
        self.horizon_min
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    #[inline]
    pub fn with_horizon_min(mut self, horizon_min: i16) -> Self {
        debug_assert!(horizon_min > 0);
        self.horizon_min = horizon_min;
        self
    }

    #[inline]
    pub fn with_duration_mean(mut self, mean: f64) -> Self {
        self.duration_mean = mean;
        self
    }

    #[inline]
    pub fn with_duration_sigma(mut self, sigma: f64) -> Self {
        self.duration_sigma = sigma;
        self
    }

    /// Clamping bounds for sampled durations, in minutes.
    #[inline]
    pub fn with_duration_bounds(mut self, min: i16, max: i16) -> Self {
        debug_assert!(0 < min && min <= max);
        self.min_duration = min;
        self.max_duration = max;
        self
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Generates reproducible random event lists from an [`EventGenConfig`].
///
/// # Examples
///
/// ```
/// use lane_pack_model::generator::{EventGenConfig, EventGenerator};
///
/// let mut generator = EventGenerator::new(EventGenConfig::default().with_count(8));
/// let events = generator.generate();
/// assert_eq!(events.len(), 8);
/// ```
pub struct EventGenerator {
    config: EventGenConfig,
    duration_distribution: Normal<f64>,
    rng: SmallRng,
}

impl EventGenerator {
    pub fn new(config: EventGenConfig) -> Self {
        let sigma = config.duration_sigma.max(DURATION_SIGMA_FLOOR);
        Self {
            duration_distribution: Normal::new(config.duration_mean, sigma)
                .expect("valid (mean, sigma)"),
            rng: SmallRng::seed_from_u64(config.seed),
            config,
        }
    }

    /// Produces `config.count()` events inside `[0, horizon)`.
    pub fn generate(&mut self) -> Vec<EventSpan> {
        (0..self.config.count).map(|_| self.sample_span()).collect()
    }

    fn sample_duration(&mut self) -> i16 {
        let sampled = self.duration_distribution.sample(&mut self.rng).round();
        let max = i16::min(self.config.max_duration, self.config.horizon_min);
        (sampled as i16).clamp(self.config.min_duration, max)
    }

    fn sample_span(&mut self) -> EventSpan {
        let duration = self.sample_duration();
        let latest_start = self.config.horizon_min - duration;
        let start = self.rng.random_range(0..=latest_start);
        EventSpan::new(start, start + duration).expect("generated spans are non-empty")
    }
}

impl From<EventGenConfig> for EventGenerator {
    #[inline]
    fn from(config: EventGenConfig) -> Self {
        Self::new(config)
    }
}
