//! Randomness source.
//!
//! Every random decision in the crate goes through [`Entropy::uniform`],
//! so tests can swap in a fixed seed.  On hardware the seed is taken
//! once at boot from a floating ADC input plus the uptime counter.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniformly distributed integers.
pub trait Entropy {
    /// Uniform draw from `[min, max)`.  Returns `min` when the range is empty.
    fn uniform(&mut self, min: u32, max: u32) -> u32;

    /// `true` with probability `percent / 100`.
    fn chance(&mut self, percent: u32) -> bool {
        self.uniform(0, 100) < percent
    }

    /// One of `-1`, `0`, `1` with equal probability.
    fn unit_step(&mut self) -> i8 {
        self.uniform(0, 3) as i8 - 1
    }
}

/// ChaCha8-backed entropy, seeded exactly once.
pub struct SeededEntropy {
    rng: ChaCha8Rng,
}

impl SeededEntropy {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from an ambient analog sample and the uptime at the moment
    /// it was taken.
    pub fn from_noise(analog: u16, uptime_ms: u64) -> Self {
        Self::from_seed(uptime_ms.wrapping_add(u64::from(analog)))
    }
}

impl Entropy for SeededEntropy {
    fn uniform(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}
