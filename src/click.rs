//! Click generator.
//!
//! After a burst, one iteration in ten ends with a click (one in three of
//! those a right-click) followed by a short cooldown.

use crate::action::{Action, SlicedSleep, Step};
use crate::config::ClickConfig;
use crate::entropy::Entropy;
use crate::hid::MouseButton;
use crate::state::ActivityState;

#[derive(Clone, Copy, Debug)]
pub struct ClickGenerator {
    config: ClickConfig,
}

impl ClickGenerator {
    pub fn new(config: ClickConfig) -> Self {
        Self { config }
    }

    /// Roll for a click.  Never fires while the state is disabled.
    pub fn maybe_click<E: Entropy>(&self, rng: &mut E, state: &ActivityState) -> Option<ClickAction> {
        if !state.is_enabled() || !rng.chance(self.config.percent) {
            return None;
        }
        let button = if rng.uniform(0, self.config.right_one_in) == 0 {
            MouseButton::Right
        } else {
            MouseButton::Left
        };
        debug!("Click: {:?}", button);
        Some(ClickAction::new(button, &self.config))
    }
}

/// A click and its cooldown.
#[derive(Clone, Copy, Debug)]
pub struct ClickAction {
    button: MouseButton,
    clicked: bool,
    cooldown: SlicedSleep,
}

impl ClickAction {
    pub fn new(button: MouseButton, config: &ClickConfig) -> Self {
        Self {
            button,
            clicked: false,
            cooldown: SlicedSleep::new(config.cooldown_ms, config.slice_ms),
        }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }
}

impl Action for ClickAction {
    fn next_step<E: Entropy>(&mut self, _rng: &mut E) -> Option<Step> {
        if !self.clicked {
            self.clicked = true;
            return Some(Step::Click(self.button));
        }
        self.cooldown.next_slice().map(Step::Sleep)
    }
}
