//! Pacing scheduler - silence between bursts.
//!
//! Pauses come from a three-branch mixture so the gaps are not drawn
//! from one tidy distribution:
//!
//! | weight | range (ms)      | meaning                 |
//! |--------|-----------------|-------------------------|
//! | 85%    | [5000, 9000)    | normal pause            |
//! | 10%    | [9000, 14000)   | distracted user         |
//! | 5%     | [1000, 5000)    | quick re-engagement     |

use crate::action::{Action, SlicedSleep, Step};
use crate::config::PacingConfig;
use crate::entropy::Entropy;

/// Which branch of the mixture a pause came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PauseKind {
    Normal,
    Long,
    Short,
}

#[derive(Clone, Copy, Debug)]
pub struct PacingScheduler {
    config: PacingConfig,
}

impl PacingScheduler {
    pub fn new(config: PacingConfig) -> Self {
        Self { config }
    }

    /// Draw a pause and report which branch produced it.
    pub fn draw<E: Entropy>(&self, rng: &mut E) -> (PauseKind, u32) {
        let c = &self.config;
        let roll = rng.uniform(0, 100);
        let (kind, range) = if roll < c.normal_percent {
            (PauseKind::Normal, c.normal_ms)
        } else if roll < c.normal_percent + c.long_percent {
            (PauseKind::Long, c.long_ms)
        } else {
            (PauseKind::Short, c.short_ms)
        };
        (kind, rng.uniform(range.0, range.1))
    }

    /// Silence before the next burst (ms).
    pub fn next_silence<E: Entropy>(&self, rng: &mut E) -> u32 {
        self.draw(rng).1
    }

    /// Draw a pause and wrap it as an interruptible action.
    pub fn pause<E: Entropy>(&self, rng: &mut E) -> Pause {
        let (kind, ms) = self.draw(rng);
        debug!("Pace: {:?} pause of {} ms", kind, ms);
        Pause::new(ms, self.config.slice_ms)
    }
}

/// A silence spent in short slices.
#[derive(Clone, Copy, Debug)]
pub struct Pause {
    sleep: SlicedSleep,
}

impl Pause {
    pub fn new(total_ms: u32, slice_ms: u32) -> Self {
        Self {
            sleep: SlicedSleep::new(total_ms, slice_ms),
        }
    }

    pub fn remaining_ms(&self) -> u32 {
        self.sleep.remaining_ms()
    }
}

impl Action for Pause {
    fn next_step<E: Entropy>(&mut self, _rng: &mut E) -> Option<Step> {
        self.sleep.next_slice().map(Step::Sleep)
    }
}
