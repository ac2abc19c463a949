//! Activity controller - the whole-system state machine.
//!
//! ```text
//!            valid press                       valid press
//!   Active ─────────────▶ Suspended ─────────────▶ Active
//!     │
//!     └─ per iteration:  Move ──▶ Click? ──▶ Pace
//!                         (each abortable to Suspended)
//! ```
//!
//! One cooperative loop, no tasks, no locks.  Every action runs through
//! [`ActivityController::run_action`], which samples the toggle button
//! before each step and stops the action as soon as the state reads
//! disabled.  Sleeps are never longer than one slice, so a press takes
//! effect within 2 ms (burst), 10 ms (click cooldown) or 50 ms (pause,
//! suspended idle).

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use smart_leds::{SmartLedsWrite, RGB8};

use crate::action::{Action, Outcome, Step};
use crate::battery::BatteryModel;
use crate::click::ClickGenerator;
use crate::clock::Clock;
use crate::config::Config;
use crate::entropy::Entropy;
use crate::indicator::Indicator;
use crate::link::{Link, PointerLink};
use crate::motion::MotionGenerator;
use crate::pacing::{PacingScheduler, Pause};
use crate::state::ActivityState;
use crate::toggle::ToggleInput;

/// Sub-phase of an active iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Move,
    Click,
    Pace,
}

/// What one outer iteration did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cycle {
    /// Disabled: indicator off, one idle slice.
    Suspended,
    /// Enabled but no host connected: one link poll slice.
    AwaitingLink,
    /// Move, (click,) pace all ran to completion.
    Completed { clicked: bool },
    /// Disabled part-way through `Phase`.
    Interrupted(Phase),
}

/// Hardware the controller drives, bundled for construction.
pub struct Hardware<P, L, W, C, D> {
    pub button: P,
    pub link: L,
    pub led: W,
    pub clock: C,
    pub delay: D,
}

pub struct ActivityController<P, L, W, C, D, E> {
    config: Config,
    state: ActivityState,
    toggle: ToggleInput<P>,
    link: Link<L>,
    indicator: Indicator<W>,
    clock: C,
    delay: D,
    rng: E,
    motion: MotionGenerator,
    clicks: ClickGenerator,
    pacing: PacingScheduler,
    battery: BatteryModel,
}

impl<P, L, W, C, D, E> ActivityController<P, L, W, C, D, E>
where
    P: InputPin,
    L: PointerLink,
    W: SmartLedsWrite<Color = RGB8>,
    C: Clock,
    D: DelayNs,
    E: Entropy,
{
    pub fn new(config: Config, hw: Hardware<P, L, W, C, D>, mut rng: E) -> Self {
        let battery = BatteryModel::boot(&mut rng, hw.clock.now_ms(), config.battery);
        Self {
            state: ActivityState::new(),
            toggle: ToggleInput::new(hw.button, config.toggle),
            link: Link::new(hw.link, &config.link),
            indicator: Indicator::new(hw.led, config.indicator),
            clock: hw.clock,
            delay: hw.delay,
            rng,
            motion: MotionGenerator::new(config.motion),
            clicks: ClickGenerator::new(config.click),
            pacing: PacingScheduler::new(config.pacing),
            battery,
            config,
        }
    }

    pub fn state(&self) -> &ActivityState {
        &self.state
    }

    pub fn battery(&self) -> &BatteryModel {
        &self.battery
    }

    pub fn link(&self) -> &Link<L> {
        &self.link
    }

    /// Boot sequence, then iterate forever.
    pub async fn run(&mut self) -> ! {
        self.start().await;
        loop {
            let cycle = self.iterate().await;
            trace!("Cycle: {:?}", cycle);
        }
    }

    /// Connect, publish the boot battery level, wait out the random
    /// startup delay, then light the indicator for the current state.
    pub async fn start(&mut self) {
        info!("Controller: starting in {:?}", self.state.mode());
        self.link.connect();
        self.link.report_battery(self.battery.level());

        let (lo, hi) = self.config.startup_delay_ms;
        let settle = self.rng.uniform(lo, hi);
        debug!("Controller: startup delay {} ms", settle);
        let _ = self
            .run_action(Pause::new(settle, self.config.pacing.slice_ms))
            .await;

        self.indicator.show_state(self.state.is_enabled());
    }

    /// One pass of the main loop.
    pub async fn iterate(&mut self) -> Cycle {
        self.sample_toggle();

        if !self.state.is_enabled() {
            self.indicator.off();
            self.delay.delay_ms(self.config.suspended_poll_ms).await;
            return Cycle::Suspended;
        }

        let now = self.clock.now_ms();
        if !self.link.ensure_connected(now) {
            self.delay.delay_ms(self.config.link.poll_ms).await;
            return Cycle::AwaitingLink;
        }

        if let Some(level) = self.battery.tick(now, &mut self.rng) {
            self.link.report_battery(level);
        }

        let burst = self.motion.produce_burst(&mut self.rng);
        if self.run_action(burst).await == Outcome::Aborted {
            return Cycle::Interrupted(Phase::Move);
        }

        let mut clicked = false;
        if let Some(click) = self.clicks.maybe_click(&mut self.rng, &self.state) {
            clicked = true;
            if self.run_action(click).await == Outcome::Aborted {
                return Cycle::Interrupted(Phase::Click);
            }
        }

        let pause = self.pacing.pause(&mut self.rng);
        if self.run_action(pause).await == Outcome::Aborted {
            return Cycle::Interrupted(Phase::Pace);
        }

        Cycle::Completed { clicked }
    }

    /// Execute an action step by step, sampling the toggle before each
    /// step.  Stops without starting the next step once disabled.
    pub async fn run_action<A: Action>(&mut self, mut action: A) -> Outcome {
        loop {
            self.sample_toggle();
            if !self.state.is_enabled() {
                debug!("Controller: action aborted");
                return Outcome::Aborted;
            }

            let Some(step) = action.next_step(&mut self.rng) else {
                return Outcome::Completed;
            };

            match step {
                Step::Move { dx, dy, .. } => self.link.move_relative(dx, dy),
                Step::Click(button) => self.link.click(button),
                Step::Sleep(ms) => self.delay.delay_ms(ms).await,
            }
        }
    }

    /// Poll the button; recolor the indicator right away on a toggle.
    fn sample_toggle(&mut self) {
        let now = self.clock.now_ms();
        if let Some(enabled) = self.toggle.sample(now, &mut self.state) {
            debug!("Controller: now {:?}", self.state.mode());
            self.indicator.show_state(enabled);
        }
    }
}
