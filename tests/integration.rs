//! End-to-end tests of the activity controller on a simulated board.

mod common;

use bt_jiggler::{Config, Cycle, Mode, MouseButton, Phase};
use common::{LinkEvent, Rig, TestController, GREEN, OFF};
use embassy_futures::block_on;

/// Bursts long enough that a 1.5 s press always lands inside one.
fn long_burst_config() -> Config {
    let mut config = Config::default();
    config.motion.min_distance = 600;
    config.motion.max_distance = 600;
    config
}

/// Fully deterministic timing: 30 steps of exactly 12 ms, no
/// corrections, and a fixed 20 s pause.
fn fixed_timing_config(click_percent: u32) -> Config {
    let mut config = Config::default();
    config.motion.min_distance = 30;
    config.motion.max_distance = 30;
    config.motion.wobble_percent = 0;
    config.motion.correction_percent = 0;
    config.click.percent = click_percent;
    config.pacing.normal_ms = (20_000, 20_000);
    config.pacing.long_ms = (20_000, 20_000);
    config.pacing.short_ms = (20_000, 20_000);
    config
}

/// Boot, then disable with a 1.5 s press in the middle of a burst.
fn disabled_mid_burst(rig: &Rig) -> (TestController, u64) {
    let mut ctrl = rig.controller(long_burst_config(), 3);
    block_on(ctrl.start());
    let press_at = rig.clock.now() + 100;
    rig.button.press(press_at, 1_500);
    assert_eq!(block_on(ctrl.iterate()), Cycle::Interrupted(Phase::Move));
    (ctrl, press_at + 1_500)
}

// ════════════════════════════════════════════════════════════════════════════
// Boot
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn boot_connects_reports_battery_and_lights_indicator() {
    let rig = Rig::new(true);
    let mut ctrl = rig.controller(Config::default(), 1);
    block_on(ctrl.start());

    assert_eq!(rig.link.connects(), 1);
    let reports = rig.link.battery_reports();
    assert_eq!(reports, vec![ctrl.battery().level()]);
    assert!((45..95).contains(&reports[0]));

    // Random settle delay before the first burst.
    assert!((2_000..5_000).contains(&rig.clock.now()));
    assert!(rig.link.moves().is_empty());

    assert!(ctrl.state().is_enabled());
    assert_eq!(rig.pixel.last(), Some(GREEN));
}

#[test]
fn press_during_startup_disables_before_first_burst() {
    let rig = Rig::new(true);
    let mut ctrl = rig.controller(Config::default(), 1);
    rig.button.press(500, 300);
    block_on(ctrl.start());

    assert!(!ctrl.state().is_enabled());
    assert_eq!(ctrl.state().mode(), Mode::Suspended);
    assert_eq!(rig.pixel.last(), Some(OFF));
    // Settling stops at the release instead of running the full delay.
    assert!(rig.clock.now() <= 800 + 50);

    assert_eq!(block_on(ctrl.iterate()), Cycle::Suspended);
    assert!(rig.link.moves().is_empty());
    assert!(rig.link.clicks().is_empty());
}

// ════════════════════════════════════════════════════════════════════════════
// Active cycle
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn enabled_cycle_moves_then_pauses() {
    let rig = Rig::new(true);
    let mut ctrl = rig.controller(Config::default(), 7);
    block_on(ctrl.start());
    let t0 = rig.clock.now();

    let cycle = block_on(ctrl.iterate());
    assert!(matches!(cycle, Cycle::Completed { .. }), "{:?}", cycle);

    let moves = rig.link.moves();
    assert!(moves.len() >= 30, "only {} moves", moves.len());
    for &(t, dx, dy) in &moves {
        assert!(t >= t0);
        assert!((-1..=1).contains(&dx) && (-1..=1).contains(&dy));
    }

    // Silence of at least the short pause follows the burst.
    let last = rig.link.last_move_at().unwrap();
    assert!(rig.clock.now() - last >= 1_000);
}

#[test]
fn deterministic_cycle_timing() {
    let rig = Rig::new(true);
    let mut ctrl = rig.controller(fixed_timing_config(100), 21);
    block_on(ctrl.start());
    let t0 = rig.clock.now();

    assert_eq!(block_on(ctrl.iterate()), Cycle::Completed { clicked: true });

    let moves = rig.link.moves();
    assert_eq!(moves.len(), 30);
    assert_eq!(moves[0].0, t0);
    assert_eq!(moves[29].0, t0 + 29 * 12);

    let clicks = rig.link.clicks();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].0, t0 + 360);

    // Burst, cooldown, pause.
    assert_eq!(rig.clock.now(), t0 + 360 + 200 + 20_000);
}

#[test]
fn long_run_drains_battery_and_spaces_clicks() {
    let rig = Rig::new(true);
    let mut ctrl = rig.controller(Config::default(), 11);
    block_on(ctrl.start());

    while rig.clock.now() < 40 * 60 * 1_000 {
        block_on(ctrl.iterate());
    }

    // Boot report, then one at >= 15 min and one at >= 30 min.
    let reports = rig.link.battery_reports();
    assert!(reports.len() >= 3, "{:?}", reports);
    for pair in reports.windows(2) {
        let drop = pair[0] - pair[1];
        assert!(drop == 1 || drop == 2, "{:?}", reports);
    }

    let clicks = rig.link.clicks();
    assert!(!clicks.is_empty());
    assert!(clicks.iter().any(|&(_, b)| b == MouseButton::Left));

    // No motion inside a click's cooldown.
    let events = rig.link.events();
    for (i, &(t, event)) in events.iter().enumerate() {
        if let LinkEvent::Click(_) = event {
            let next_move = events[i + 1..]
                .iter()
                .find(|(_, e)| matches!(e, LinkEvent::Move { .. }));
            if let Some(&(next, _)) = next_move {
                assert!(next - t >= 200, "move {} ms after click", next - t);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Toggle
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn press_during_burst_stops_motion_within_one_slice() {
    let rig = Rig::new(true);
    let (ctrl, released_at) = disabled_mid_burst(&rig);

    assert!(!ctrl.state().is_enabled());
    let last_move = rig.link.last_move_at().unwrap();
    assert!(last_move <= released_at + 50, "move at {} after release {}", last_move, released_at);
    assert!(rig.clock.now() <= released_at + 50);
    assert_eq!(rig.pixel.last(), Some(OFF));
}

#[test]
fn suspended_loop_is_idle() {
    let rig = Rig::new(true);
    let (mut ctrl, _) = disabled_mid_burst(&rig);
    let events = rig.link.events().len();

    for _ in 0..20 {
        let before = rig.clock.now();
        assert_eq!(block_on(ctrl.iterate()), Cycle::Suspended);
        assert_eq!(rig.clock.now() - before, 50);
    }

    assert_eq!(rig.link.events().len(), events);
    assert_eq!(rig.pixel.last(), Some(OFF));
}

#[test]
fn second_press_resumes_activity() {
    let rig = Rig::new(true);
    let (mut ctrl, _) = disabled_mid_burst(&rig);
    let moves_before = rig.link.moves().len();

    rig.button.press(rig.clock.now() + 20, 300);
    let mut cycle = Cycle::Suspended;
    for _ in 0..100 {
        cycle = block_on(ctrl.iterate());
        if cycle != Cycle::Suspended {
            break;
        }
    }

    assert!(matches!(cycle, Cycle::Completed { .. }), "{:?}", cycle);
    assert!(ctrl.state().is_enabled());
    assert!(rig.link.moves().len() > moves_before);
    assert_eq!(rig.pixel.last(), Some(GREEN));
}

#[test]
fn press_during_pause_aborts_pacing() {
    let rig = Rig::new(true);
    let mut ctrl = rig.controller(fixed_timing_config(0), 5);
    block_on(ctrl.start());
    let t0 = rig.clock.now();

    rig.button.press(t0 + 2_000, 300);
    assert_eq!(block_on(ctrl.iterate()), Cycle::Interrupted(Phase::Pace));
    assert!(rig.clock.now() <= t0 + 2_300 + 50);
    assert!(rig.link.last_move_at().unwrap() < t0 + 2_000);
}

#[test]
fn press_during_cooldown_aborts_click() {
    let rig = Rig::new(true);
    let mut ctrl = rig.controller(fixed_timing_config(100), 5);
    block_on(ctrl.start());
    let t0 = rig.clock.now();

    // The click lands at t0 + 360; release well inside its 200 ms cooldown.
    rig.button.press(t0 + 380, 100);
    assert_eq!(block_on(ctrl.iterate()), Cycle::Interrupted(Phase::Click));
    assert!(rig.clock.now() <= t0 + 480 + 10);
    assert_eq!(rig.link.clicks().len(), 1);
}

#[test]
fn noise_and_long_hold_are_ignored() {
    let rig = Rig::new(true);
    let mut ctrl = rig.controller(long_burst_config(), 9);
    block_on(ctrl.start());
    let t0 = rig.clock.now();

    // Both presses fall inside the (>= 4.8 s) burst, sampled every 2 ms.
    rig.button.press(t0 + 100, 20);
    rig.button.press(t0 + 1_000, 2_500);

    let cycle = block_on(ctrl.iterate());
    assert!(matches!(cycle, Cycle::Completed { .. }), "{:?}", cycle);
    assert!(ctrl.state().is_enabled());
    assert!(!rig.pixel.history().contains(&OFF));
}

// ════════════════════════════════════════════════════════════════════════════
// Link supervision
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn waits_for_host_with_backoff() {
    let rig = Rig::new(false);
    let mut ctrl = rig.controller(Config::default(), 5);
    block_on(ctrl.start());
    let t0 = rig.clock.now();

    while rig.clock.now() - t0 < 10_000 {
        assert_eq!(block_on(ctrl.iterate()), Cycle::AwaitingLink);
    }
    assert!(rig.link.moves().is_empty());
    // Boot connect plus retries at +1 s, +3 s and +7 s.
    assert_eq!(rig.link.connects(), 4);

    rig.link.set_connected(true);
    assert!(matches!(block_on(ctrl.iterate()), Cycle::Completed { .. }));
    assert!(!rig.link.moves().is_empty());
}

#[test]
fn disabled_wins_over_missing_link() {
    let rig = Rig::new(true);
    let (mut ctrl, _) = disabled_mid_burst(&rig);
    rig.link.set_connected(false);
    let connects = rig.link.connects();

    for _ in 0..100 {
        assert_eq!(block_on(ctrl.iterate()), Cycle::Suspended);
    }
    assert_eq!(rig.link.connects(), connects);
}
