//! Radio link to the host.
//!
//! The BLE HID stack is an external collaborator: the controller only
//! asks whether a central is connected and pushes relative moves, clicks
//! and battery levels.  [`Link`] wraps any [`PointerLink`] with the two
//! policies the core needs from it:
//!
//! - failures are logged and dropped (fire-and-forget), and
//! - while disconnected, `connect()` is re-issued with exponential
//!   backoff (1 s doubling up to 32 s) instead of on every poll.

use crate::config::LinkConfig;
use crate::error::{BleError, Error};
use crate::hid::MouseButton;

/// HID/radio collaborator.
///
/// Implementations must not block: each call either completes
/// immediately or fails.
pub trait PointerLink {
    /// Start (or restart) advertising so a host can connect.
    fn connect(&mut self);

    fn is_connected(&self) -> bool;

    fn move_relative(&mut self, dx: i8, dy: i8, wheel: i8) -> Result<(), Error>;

    /// Press and release `button`.
    fn click(&mut self, button: MouseButton) -> Result<(), Error>;

    fn set_battery_level(&mut self, percent: u8) -> Result<(), Error>;
}

/// Reconnect schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backoff {
    initial_ms: u64,
    max_ms: u64,
    interval_ms: u64,
    next_attempt_ms: Option<u64>,
}

impl Backoff {
    pub fn new(initial_ms: u64, max_ms: u64) -> Self {
        Self {
            initial_ms,
            max_ms,
            interval_ms: initial_ms,
            next_attempt_ms: None,
        }
    }

    /// Forget the schedule (link is up).
    pub fn reset(&mut self) {
        self.interval_ms = self.initial_ms;
        self.next_attempt_ms = None;
    }

    /// Current wait between attempts.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Called on every poll while disconnected.  Returns `true` when a
    /// connect attempt is due.  The first poll after an outage only arms
    /// the timer.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_attempt_ms {
            None => {
                self.next_attempt_ms = Some(now_ms + self.interval_ms);
                false
            }
            Some(due) if now_ms >= due => {
                self.interval_ms = (self.interval_ms * 2).min(self.max_ms);
                self.next_attempt_ms = Some(now_ms + self.interval_ms);
                true
            }
            Some(_) => false,
        }
    }
}

/// Supervised link.
pub struct Link<L> {
    inner: L,
    backoff: Backoff,
    connected: bool,
}

impl<L: PointerLink> Link<L> {
    pub fn new(inner: L, config: &LinkConfig) -> Self {
        Self {
            inner,
            backoff: Backoff::new(config.retry_initial_ms, config.retry_max_ms),
            connected: false,
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut L {
        &mut self.inner
    }

    pub fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    /// Initial connect at boot.
    pub fn connect(&mut self) {
        info!("Link: connecting");
        self.inner.connect();
    }

    /// Poll the link.  Reconnects on the backoff schedule while down.
    pub fn ensure_connected(&mut self, now_ms: u64) -> bool {
        let up = self.inner.is_connected();
        if up != self.connected {
            self.connected = up;
            if up {
                info!("Link: connected");
            } else {
                warn!("Link: disconnected");
            }
        }

        if up {
            self.backoff.reset();
        } else if self.backoff.poll(now_ms) {
            info!("Link: reconnect attempt (next in {} ms)", self.backoff.interval_ms());
            self.inner.connect();
        }
        up
    }

    pub fn move_relative(&mut self, dx: i8, dy: i8) {
        if let Err(e) = self.inner.move_relative(dx, dy, 0) {
            trace!("Link: move dropped: {:?}", e);
        }
    }

    pub fn click(&mut self, button: MouseButton) {
        if let Err(e) = self.inner.click(button) {
            warn!("Link: click dropped: {:?}", e);
        }
    }

    pub fn report_battery(&mut self, percent: u8) {
        if let Err(e) = self.inner.set_battery_level(percent) {
            warn!("Link: battery report failed: {:?}", e);
        }
    }
}
