//! Debounced toggle button.
//!
//! A single momentary button (active-low with internal pull-up) suspends
//! and resumes the emulation.  Unlike an edge-triggered debouncer, the
//! decision is made on release from the total hold time:
//!
//! ```text
//!   d <  50 ms            noise, ignored
//!   50 ms <= d < 2000 ms  toggle
//!   d >= 2000 ms          long-hold, ignored
//! ```
//!
//! `sample` is polled from every sleep slice of every action, so the
//! measured duration is quantised to the polling granularity (2-50 ms).

use embedded_hal::digital::InputPin;

use crate::config::ToggleConfig;
use crate::state::ActivityState;

/// Outcome of a completed press/release cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressClass {
    Noise,
    Toggle,
    LongHold,
}

/// Classify a press by how long the button was held.
pub fn classify_press(duration_ms: u64, config: &ToggleConfig) -> PressClass {
    if duration_ms < config.min_press_ms {
        PressClass::Noise
    } else if duration_ms < config.long_hold_ms {
        PressClass::Toggle
    } else {
        PressClass::LongHold
    }
}

/// Raw edge tracker.  Reset on every press and release edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub is_pressed: bool,
    pub press_start_ms: u64,
}

impl ButtonState {
    /// Feed one reading.  Returns the hold duration on a release edge.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<u64> {
        match (pressed, self.is_pressed) {
            (true, false) => {
                self.is_pressed = true;
                self.press_start_ms = now_ms;
                None
            }
            (false, true) => {
                self.is_pressed = false;
                Some(now_ms.saturating_sub(self.press_start_ms))
            }
            _ => None,
        }
    }
}

/// The toggle button and its debounce state.
pub struct ToggleInput<P> {
    pin: P,
    button: ButtonState,
    config: ToggleConfig,
}

impl<P: InputPin> ToggleInput<P> {
    pub fn new(pin: P, config: ToggleConfig) -> Self {
        Self {
            pin,
            button: ButtonState::default(),
            config,
        }
    }

    /// Read the pin; a read error counts as "not pressed".
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }

    /// Sample the button once.  On a valid press/release cycle the
    /// activity state is flipped and the new `enabled` value returned.
    pub fn sample(&mut self, now_ms: u64, state: &mut ActivityState) -> Option<bool> {
        let pressed = self.is_pressed();
        let duration = self.button.update(pressed, now_ms)?;

        match classify_press(duration, &self.config) {
            PressClass::Toggle => {
                let enabled = state.toggle();
                info!("Toggle: held {} ms -> enabled={}", duration, enabled);
                Some(enabled)
            }
            class => {
                debug!("Toggle: ignored {:?} press ({} ms)", class, duration);
                None
            }
        }
    }

    /// Give the pin back (tests verify mock expectations through this).
    pub fn release(self) -> P {
        self.pin
    }
}
