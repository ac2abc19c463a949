//! Cooperative actions.
//!
//! A burst, a click or a pause is never executed in one go.  Each one is
//! a small state machine that hands out [`Step`]s; the controller runs
//! the steps one at a time and samples the toggle button before each of
//! them.  A step is either an instantaneous HID call or a bounded sleep
//! slice, so the time between two samples is at most one slice.

use crate::entropy::Entropy;
use crate::hid::MouseButton;

/// Why a relative move was emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveKind {
    /// Regular step along the burst direction.
    Primary,
    /// Tremor micro-move following a step.
    Correction,
}

/// One atomic unit of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Move { dx: i8, dy: i8, kind: MoveKind },
    Click(MouseButton),
    Sleep(u32),
}

/// Resumable producer of steps.
pub trait Action {
    /// Next step, or `None` once the action is finished.
    fn next_step<E: Entropy>(&mut self, rng: &mut E) -> Option<Step>;
}

/// How an action ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Completed,
    /// The activity state went false before the action finished.
    Aborted,
}

/// Splits a duration into slices of at most `slice_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlicedSleep {
    left_ms: u32,
    slice_ms: u32,
}

impl SlicedSleep {
    pub fn new(total_ms: u32, slice_ms: u32) -> Self {
        Self {
            left_ms: total_ms,
            slice_ms: slice_ms.max(1),
        }
    }

    pub fn remaining_ms(&self) -> u32 {
        self.left_ms
    }

    /// Next slice length, or `None` when the duration is used up.
    pub fn next_slice(&mut self) -> Option<u32> {
        if self.left_ms == 0 {
            return None;
        }
        let slice = self.left_ms.min(self.slice_ms);
        self.left_ms -= slice;
        Some(slice)
    }
}
