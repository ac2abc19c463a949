//! Motion pattern generator - one randomized movement burst at a time.
//!
//! A burst walks `distance` single-count steps along a random direction.
//! Each step is followed by a delay that is usually the base interval
//! and occasionally a "wobble" draw, so the timing is never perfectly
//! periodic, and now and then by a tremor correction.  Delays are cut
//! into 2 ms slices so a burst of ~7 s can still be stopped within one
//! slice.

use crate::action::{Action, MoveKind, SlicedSleep, Step};
use crate::config::MotionConfig;
use crate::entropy::Entropy;

/// Parameters of one burst, drawn fresh each time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstSpec {
    /// Number of primary steps.
    pub distance: u16,
    /// Per-step delta; `(0, 0)` is a valid "idle jitter" burst.
    pub direction: (i8, i8),
    pub base_interval_ms: u32,
}

/// Draws burst parameters and per-step timing.
#[derive(Clone, Copy, Debug)]
pub struct MotionGenerator {
    config: MotionConfig,
}

impl MotionGenerator {
    pub fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    /// Draw distance and direction for the next burst.
    pub fn plan<E: Entropy>(&self, rng: &mut E) -> BurstSpec {
        let distance = rng.uniform(
            u32::from(self.config.min_distance),
            u32::from(self.config.max_distance),
        ) as u16;
        let dx = rng.unit_step();
        let dy = rng.unit_step();
        BurstSpec {
            distance,
            direction: (dx, dy),
            base_interval_ms: self.config.base_interval_ms,
        }
    }

    /// Plan a burst and wrap it as an executable action.
    pub fn produce_burst<E: Entropy>(&self, rng: &mut E) -> Burst {
        let spec = self.plan(rng);
        debug!(
            "Burst: {} steps towards ({}, {})",
            spec.distance, spec.direction.0, spec.direction.1
        );
        Burst::new(spec, self.config)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BurstPhase {
    Step,
    Settle(SlicedSleep),
    Correct,
}

/// An executing burst.
#[derive(Clone, Copy, Debug)]
pub struct Burst {
    spec: BurstSpec,
    config: MotionConfig,
    remaining: u16,
    phase: BurstPhase,
}

impl Burst {
    pub fn new(spec: BurstSpec, config: MotionConfig) -> Self {
        Self {
            spec,
            config,
            remaining: spec.distance,
            phase: BurstPhase::Step,
        }
    }

    /// Primary steps not yet emitted.
    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    fn step_delay<E: Entropy>(&self, rng: &mut E) -> u32 {
        if rng.chance(self.config.wobble_percent) {
            rng.uniform(self.config.wobble_ms.0, self.config.wobble_ms.1)
        } else {
            self.spec.base_interval_ms
        }
    }
}

impl Action for Burst {
    fn next_step<E: Entropy>(&mut self, rng: &mut E) -> Option<Step> {
        loop {
            match self.phase {
                BurstPhase::Step => {
                    if self.remaining == 0 {
                        return None;
                    }
                    self.remaining -= 1;
                    let delay = self.step_delay(rng);
                    self.phase = BurstPhase::Settle(SlicedSleep::new(delay, self.config.slice_ms));
                    let (dx, dy) = self.spec.direction;
                    return Some(Step::Move {
                        dx,
                        dy,
                        kind: MoveKind::Primary,
                    });
                }
                BurstPhase::Settle(ref mut sleep) => match sleep.next_slice() {
                    Some(ms) => return Some(Step::Sleep(ms)),
                    None => self.phase = BurstPhase::Correct,
                },
                BurstPhase::Correct => {
                    self.phase = BurstPhase::Step;
                    if rng.chance(self.config.correction_percent) {
                        return Some(Step::Move {
                            dx: rng.unit_step(),
                            dy: rng.unit_step(),
                            kind: MoveKind::Correction,
                        });
                    }
                }
            }
        }
    }
}
