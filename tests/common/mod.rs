//! Simulated board for controller-level tests.
//!
//! Time only moves when the controller sleeps, so a cycle that would
//! take seconds on hardware runs instantly and deterministically.  Every
//! peripheral is a cheap handle onto shared state; the test keeps one
//! clone and hands the other to the controller.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use bt_jiggler::clock::Clock;
use bt_jiggler::{ActivityController, Config, Error, Hardware, MouseButton, PointerLink, SeededEntropy};
use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal_async::delay::DelayNs;
use smart_leds::{SmartLedsWrite, RGB8};

// Init logger for tests
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const GREEN: RGB8 = RGB8 { r: 0, g: 50, b: 0 };
pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

// ═══════════════════════════════════════════════════════════════════════════
// Clock + delay
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Default)]
pub struct SimClock {
    now: Rc<Cell<u64>>,
}

impl SimClock {
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now()
    }
}

impl DelayNs for SimClock {
    async fn delay_ns(&mut self, ns: u32) {
        self.advance(u64::from(ns) / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Button
// ═══════════════════════════════════════════════════════════════════════════

/// Active-low button held during scripted `[start, end)` windows.
#[derive(Clone)]
pub struct ScriptedButton {
    clock: SimClock,
    presses: Rc<RefCell<Vec<(u64, u64)>>>,
}

impl ScriptedButton {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            presses: Rc::default(),
        }
    }

    pub fn press(&self, at_ms: u64, hold_ms: u64) {
        self.presses.borrow_mut().push((at_ms, at_ms + hold_ms));
    }

    fn held(&self) -> bool {
        let now = self.clock.now();
        self.presses
            .borrow()
            .iter()
            .any(|&(start, end)| now >= start && now < end)
    }
}

impl ErrorType for ScriptedButton {
    type Error = Infallible;
}

impl InputPin for ScriptedButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.held())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.held())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Radio link
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    Connect,
    Move { dx: i8, dy: i8 },
    Click(MouseButton),
    Battery(u8),
}

/// Host stand-in that timestamps everything the controller sends.
#[derive(Clone)]
pub struct RecordingLink {
    clock: SimClock,
    up: Rc<Cell<bool>>,
    events: Rc<RefCell<Vec<(u64, LinkEvent)>>>,
}

impl RecordingLink {
    pub fn new(clock: &SimClock, connected: bool) -> Self {
        Self {
            clock: clock.clone(),
            up: Rc::new(Cell::new(connected)),
            events: Rc::default(),
        }
    }

    pub fn set_connected(&self, up: bool) {
        self.up.set(up);
    }

    fn record(&self, event: LinkEvent) {
        self.events.borrow_mut().push((self.clock.now(), event));
    }

    pub fn events(&self) -> Vec<(u64, LinkEvent)> {
        self.events.borrow().clone()
    }

    pub fn moves(&self) -> Vec<(u64, i8, i8)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|&(t, e)| match e {
                LinkEvent::Move { dx, dy } => Some((t, dx, dy)),
                _ => None,
            })
            .collect()
    }

    pub fn last_move_at(&self) -> Option<u64> {
        self.moves().last().map(|&(t, _, _)| t)
    }

    pub fn clicks(&self) -> Vec<(u64, MouseButton)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|&(t, e)| match e {
                LinkEvent::Click(b) => Some((t, b)),
                _ => None,
            })
            .collect()
    }

    pub fn battery_reports(&self) -> Vec<u8> {
        self.events
            .borrow()
            .iter()
            .filter_map(|&(_, e)| match e {
                LinkEvent::Battery(level) => Some(level),
                _ => None,
            })
            .collect()
    }

    pub fn connects(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|(_, e)| *e == LinkEvent::Connect)
            .count()
    }
}

impl PointerLink for RecordingLink {
    fn connect(&mut self) {
        self.record(LinkEvent::Connect);
    }

    fn is_connected(&self) -> bool {
        self.up.get()
    }

    fn move_relative(&mut self, dx: i8, dy: i8, _wheel: i8) -> Result<(), Error> {
        if !self.up.get() {
            return Err(Error::Disconnected);
        }
        self.record(LinkEvent::Move { dx, dy });
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> Result<(), Error> {
        if !self.up.get() {
            return Err(Error::Disconnected);
        }
        self.record(LinkEvent::Click(button));
        Ok(())
    }

    fn set_battery_level(&mut self, percent: u8) -> Result<(), Error> {
        self.record(LinkEvent::Battery(percent));
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Status pixel
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Default)]
pub struct RecordingPixel {
    history: Rc<RefCell<Vec<RGB8>>>,
}

impl RecordingPixel {
    pub fn last(&self) -> Option<RGB8> {
        self.history.borrow().last().copied()
    }

    pub fn history(&self) -> Vec<RGB8> {
        self.history.borrow().clone()
    }
}

impl SmartLedsWrite for RecordingPixel {
    type Error = Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let mut history = self.history.borrow_mut();
        history.extend(iterator.into_iter().map(Into::into));
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Rig
// ═══════════════════════════════════════════════════════════════════════════

pub type TestController = ActivityController<
    ScriptedButton,
    RecordingLink,
    RecordingPixel,
    SimClock,
    SimClock,
    SeededEntropy,
>;

/// One simulated board plus handles to observe it.
pub struct Rig {
    pub clock: SimClock,
    pub button: ScriptedButton,
    pub link: RecordingLink,
    pub pixel: RecordingPixel,
}

impl Rig {
    pub fn new(connected: bool) -> Self {
        init_log();
        let clock = SimClock::default();
        Self {
            button: ScriptedButton::new(&clock),
            link: RecordingLink::new(&clock, connected),
            pixel: RecordingPixel::default(),
            clock,
        }
    }

    pub fn controller(&self, config: Config, seed: u64) -> TestController {
        let hw = Hardware {
            button: self.button.clone(),
            link: self.link.clone(),
            led: self.pixel.clone(),
            clock: self.clock.clone(),
            delay: self.clock.clone(),
        };
        ActivityController::new(config, hw, SeededEntropy::from_seed(seed))
    }
}
