//! Activity state - the enabled/disabled flag every component reads.
//!
//! The controller owns the single instance and lends it out by
//! reference.  Only the toggle input can flip it (`toggle` is
//! crate-private and called from `toggle.rs` alone).

/// Macro-state of the whole system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Generating motion, clicks and pauses.
    Active,
    /// Idle, indicator off, only the toggle is sampled.
    Suspended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivityState {
    enabled: bool,
}

impl ActivityState {
    /// Boot state: enabled.
    pub const fn new() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> Mode {
        if self.enabled {
            Mode::Active
        } else {
            Mode::Suspended
        }
    }

    /// Flip the flag and return the new value.
    pub(crate) fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

impl Default for ActivityState {
    fn default() -> Self {
        Self::new()
    }
}
