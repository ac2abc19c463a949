//! Battery telemetry simulator.
//!
//! Hosts show a battery gauge for BLE mice, so a device stuck at one
//! level looks odd.  Every 15 minutes the simulated level drops by 1-2%,
//! and once it falls below 18% the next tick pretends the user charged
//! the mouse.

use crate::config::BatteryConfig;
use crate::entropy::Entropy;

/// Simulated battery.
#[derive(Clone, Copy, Debug)]
pub struct BatteryModel {
    level: u8,
    last_update_ms: u64,
    config: BatteryConfig,
}

impl BatteryModel {
    pub fn new(level: u8, now_ms: u64, config: BatteryConfig) -> Self {
        Self {
            level: level.min(100),
            last_update_ms: now_ms,
            config,
        }
    }

    /// Start at a random level within the configured boot range.
    pub fn boot<E: Entropy>(rng: &mut E, now_ms: u64, config: BatteryConfig) -> Self {
        let level = draw(rng, config.boot_range);
        info!("Battery: boot level {}%", level);
        Self::new(level, now_ms, config)
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn last_update_ms(&self) -> u64 {
        self.last_update_ms
    }

    /// Advance the model.  Returns the new level when a tick fired.
    pub fn tick<E: Entropy>(&mut self, now_ms: u64, rng: &mut E) -> Option<u8> {
        if now_ms.saturating_sub(self.last_update_ms) < self.config.tick_ms {
            return None;
        }

        let previous = self.level;
        self.level = if previous < self.config.recharge_below {
            draw(rng, self.config.recharge_range)
        } else {
            previous.saturating_sub(draw(rng, self.config.drain_range))
        };
        self.last_update_ms = now_ms;

        debug!("Battery: {}% -> {}%", previous, self.level);
        Some(self.level)
    }
}

fn draw<E: Entropy>(rng: &mut E, range: (u8, u8)) -> u8 {
    rng.uniform(u32::from(range.0), u32::from(range.1)) as u8
}
