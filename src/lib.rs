//! Host-testable core of the bt-jiggler firmware.
//!
//! Everything here is hardware-agnostic: the button, the status pixel,
//! the radio link, the clock and the delay provider all come in through
//! traits, so the whole controller runs on the host under
//! `cargo test` with simulated peripherals.
//!
//! The embedded binary (`src/main.rs`, `--features embedded`) binds these
//! traits to the nRF52840: GPIO, WS2812 over SPIM, SoftDevice S140 HID.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
mod fmt;

pub mod action;
pub mod battery;
pub mod click;
pub mod clock;
pub mod config;
pub mod controller;
pub mod entropy;
pub mod error;
pub mod hid;
pub mod indicator;
pub mod link;
pub mod motion;
pub mod pacing;
pub mod state;
pub mod toggle;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use action::{Action, MoveKind, Outcome, Step};
pub use clock::Clock;
pub use config::Config;
pub use controller::{ActivityController, Cycle, Hardware, Phase};
pub use entropy::{Entropy, SeededEntropy};
pub use error::{BleError, Error};
pub use hid::{MouseButton, MouseReport};
pub use link::PointerLink;
pub use state::{ActivityState, Mode};
