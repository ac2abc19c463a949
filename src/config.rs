//! Application-wide constants and runtime-tunable configuration.
//!
//! All hardware pin assignments, timing parameters, probabilities and
//! protocol constants live here so they can be tuned in one place.  The
//! `*Config` structs carry the same values at runtime; their `Default`
//! impls are built from the constants below.

// BLE

/// GAP device name (also used as the advertised complete local name).
pub const BLE_DEVICE_NAME: &str = "Logitech M705";

/// Device Information Service manufacturer name.
pub const BLE_MANUFACTURER: &str = "Logitech";

/// GAP appearance: generic HID mouse.
pub const BLE_APPEARANCE_MOUSE: u16 = 0x03C2;

/// Battery characteristic value before the simulator's boot draw is reported.
pub const BLE_INITIAL_BATTERY: u8 = 85;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Toggle button  → P0.11 (active-low, internal pull-up)
//   WS2812 data    → P0.13 (SPIM3 MOSI, SCK on P0.14 left unconnected)
//   Entropy ADC    → P0.02 / AIN0 (left floating)

// Toggle button

/// Presses shorter than this are electrical noise (ms).
pub const TOGGLE_MIN_PRESS_MS: u64 = 50;

/// Presses held at least this long are unintended long-holds (ms).
pub const TOGGLE_LONG_HOLD_MS: u64 = 2_000;

// Motion bursts

/// Inclusive lower bound of the burst length (steps).
pub const MOTION_MIN_DISTANCE: u16 = 30;

/// Exclusive upper bound of the burst length (steps).
pub const MOTION_MAX_DISTANCE: u16 = 600;

/// Regular delay after each step (ms).
pub const MOTION_BASE_INTERVAL_MS: u32 = 12;

/// Percentage of steps that use a wobble delay instead of the base interval.
pub const MOTION_WOBBLE_PERCENT: u32 = 10;

/// Wobble delay range `[min, max)` (ms).
pub const MOTION_WOBBLE_MIN_MS: u32 = 8;
pub const MOTION_WOBBLE_MAX_MS: u32 = 20;

/// Percentage of steps followed by a corrective micro-move.
pub const MOTION_CORRECTION_PERCENT: u32 = 5;

/// Longest uninterrupted sleep inside a burst (ms).
pub const MOTION_SLICE_MS: u32 = 2;

// Clicks

/// Percentage of iterations that end with a click.
pub const CLICK_PERCENT: u32 = 10;

/// One in `CLICK_RIGHT_ONE_IN` clicks is a right-click.
pub const CLICK_RIGHT_ONE_IN: u32 = 3;

/// Post-click cooldown (ms).
pub const CLICK_COOLDOWN_MS: u32 = 200;

/// Cooldown slice (ms).
pub const CLICK_SLICE_MS: u32 = 10;

// Pacing

/// Normal pause: `[5000, 9000)` ms, 85% of the time.
pub const PACE_NORMAL_PERCENT: u32 = 85;
pub const PACE_NORMAL_MS: (u32, u32) = (5_000, 9_000);

/// Long pause (user distracted): `[9000, 14000)` ms, 10% of the time.
pub const PACE_LONG_PERCENT: u32 = 10;
pub const PACE_LONG_MS: (u32, u32) = (9_000, 14_000);

/// Short pause (quick re-engagement): `[1000, 5000)` ms, the remaining 5%.
pub const PACE_SHORT_MS: (u32, u32) = (1_000, 5_000);

/// Pause slice (ms).
pub const PACE_SLICE_MS: u32 = 50;

// Battery simulation

/// Battery tick cadence (ms). 15 minutes.
pub const BATTERY_TICK_MS: u64 = 15 * 60 * 1_000;

/// Below this level the next tick simulates a recharge.
pub const BATTERY_RECHARGE_BELOW: u8 = 18;

/// Level range after a simulated recharge `[min, max)`.
pub const BATTERY_RECHARGE_RANGE: (u8, u8) = (85, 100);

/// Drain per tick `[min, max)`.
pub const BATTERY_DRAIN_RANGE: (u8, u8) = (1, 3);

/// Boot level range `[min, max)`.
pub const BATTERY_BOOT_RANGE: (u8, u8) = (45, 95);

// Indicator

/// Default brightness applied to every color (0-255).
pub const LED_BRIGHTNESS: u8 = 50;

/// Color shown while the emulation is enabled (before brightness scaling).
pub const LED_ENABLED_RGB: (u8, u8, u8) = (0, 255, 0);

// Main loop

/// Idle cadence while suspended (ms).
pub const SUSPENDED_POLL_MS: u32 = 50;

/// Poll cadence while the link is down (ms).
pub const LINK_POLL_MS: u32 = 10;

/// Random startup delay range `[min, max)` before the first burst (ms).
pub const STARTUP_DELAY_MS: (u32, u32) = (2_000, 5_000);

/// First reconnect attempt after the link drops (ms).
pub const LINK_RETRY_INITIAL_MS: u64 = 1_000;

/// Reconnect backoff cap (ms).
pub const LINK_RETRY_MAX_MS: u64 = 32_000;

/// Debounce window classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleConfig {
    pub min_press_ms: u64,
    pub long_hold_ms: u64,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            min_press_ms: TOGGLE_MIN_PRESS_MS,
            long_hold_ms: TOGGLE_LONG_HOLD_MS,
        }
    }
}

/// Shape of one movement burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionConfig {
    /// `[min_distance, max_distance)` steps per burst.
    pub min_distance: u16,
    pub max_distance: u16,
    pub base_interval_ms: u32,
    pub wobble_percent: u32,
    /// `[min, max)` wobble delay.
    pub wobble_ms: (u32, u32),
    pub correction_percent: u32,
    pub slice_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            min_distance: MOTION_MIN_DISTANCE,
            max_distance: MOTION_MAX_DISTANCE,
            base_interval_ms: MOTION_BASE_INTERVAL_MS,
            wobble_percent: MOTION_WOBBLE_PERCENT,
            wobble_ms: (MOTION_WOBBLE_MIN_MS, MOTION_WOBBLE_MAX_MS),
            correction_percent: MOTION_CORRECTION_PERCENT,
            slice_ms: MOTION_SLICE_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickConfig {
    pub percent: u32,
    pub right_one_in: u32,
    pub cooldown_ms: u32,
    pub slice_ms: u32,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            percent: CLICK_PERCENT,
            right_one_in: CLICK_RIGHT_ONE_IN,
            cooldown_ms: CLICK_COOLDOWN_MS,
            slice_ms: CLICK_SLICE_MS,
        }
    }
}

/// Three-branch pause mixture.  The short branch takes whatever
/// probability mass the other two leave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PacingConfig {
    pub normal_percent: u32,
    pub normal_ms: (u32, u32),
    pub long_percent: u32,
    pub long_ms: (u32, u32),
    pub short_ms: (u32, u32),
    pub slice_ms: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            normal_percent: PACE_NORMAL_PERCENT,
            normal_ms: PACE_NORMAL_MS,
            long_percent: PACE_LONG_PERCENT,
            long_ms: PACE_LONG_MS,
            short_ms: PACE_SHORT_MS,
            slice_ms: PACE_SLICE_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatteryConfig {
    pub tick_ms: u64,
    pub recharge_below: u8,
    pub recharge_range: (u8, u8),
    pub drain_range: (u8, u8),
    pub boot_range: (u8, u8),
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            tick_ms: BATTERY_TICK_MS,
            recharge_below: BATTERY_RECHARGE_BELOW,
            recharge_range: BATTERY_RECHARGE_RANGE,
            drain_range: BATTERY_DRAIN_RANGE,
            boot_range: BATTERY_BOOT_RANGE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndicatorConfig {
    pub brightness: u8,
    pub enabled_rgb: (u8, u8, u8),
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            brightness: LED_BRIGHTNESS,
            enabled_rgb: LED_ENABLED_RGB,
        }
    }
}

/// Reconnect backoff bounds for the radio link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkConfig {
    pub poll_ms: u32,
    pub retry_initial_ms: u64,
    pub retry_max_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            poll_ms: LINK_POLL_MS,
            retry_initial_ms: LINK_RETRY_INITIAL_MS,
            retry_max_ms: LINK_RETRY_MAX_MS,
        }
    }
}

/// Everything the controller needs, grouped per component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub toggle: ToggleConfig,
    pub motion: MotionConfig,
    pub click: ClickConfig,
    pub pacing: PacingConfig,
    pub battery: BatteryConfig,
    pub indicator: IndicatorConfig,
    pub link: LinkConfig,
    pub suspended_poll_ms: u32,
    pub startup_delay_ms: (u32, u32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toggle: ToggleConfig::default(),
            motion: MotionConfig::default(),
            click: ClickConfig::default(),
            pacing: PacingConfig::default(),
            battery: BatteryConfig::default(),
            indicator: IndicatorConfig::default(),
            link: LinkConfig::default(),
            suspended_poll_ms: SUSPENDED_POLL_MS,
            startup_delay_ms: STARTUP_DELAY_MS,
        }
    }
}
