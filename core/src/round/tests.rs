use super::*;
use crate::crash::FixedSequence;
use crate::curve::multiplier_at;

const SURFACE: SurfaceSize = SurfaceSize::new(800, 400);

fn engine() -> RoundEngine<FixedSequence> {
    RoundEngine::new(EngineConfig::default(), FixedSequence::default(), SURFACE)
}

fn engine_with(points: &[f64]) -> RoundEngine<FixedSequence> {
    RoundEngine::new(
        EngineConfig::default(),
        FixedSequence::new(points.iter().copied()),
        SURFACE,
    )
}

/// First whole millisecond at which the multiplier reaches `target`.
fn crash_ms(target: f64, speed: f64) -> u64 {
    (0..).find(|ms| multiplier_at(*ms as f64, speed) >= target).unwrap()
}

/// Tick once per millisecond from `from` until the round crashes.
fn run_until_crash(engine: &mut RoundEngine<FixedSequence>, from: u64) -> (u64, CrashReport) {
    for ms in from.. {
        if let TickOutcome::Crashed(report) = engine.tick(ms as f64) {
            return (ms, report);
        }
    }
    unreachable!()
}

#[test]
fn new_engine_is_idle() {
    let engine = engine();
    assert_eq!(engine.status(), RoundStatus::Idle);
    assert_eq!(engine.state().started_at, None);
    assert_eq!(engine.state().multiplier, 1.0);
    assert!(!engine.restart_pending());
}

#[test]
fn tick_is_ignored_unless_playing() {
    let mut engine = engine();
    assert_eq!(engine.tick(100.0), TickOutcome::Inactive);
    assert_eq!(engine.status(), RoundStatus::Idle);
}

#[test]
fn start_round_resets_state() {
    let mut engine = engine();
    engine.start_round(1_000.0);

    let state = engine.state();
    assert_eq!(state.status, RoundStatus::Playing);
    assert_eq!(state.multiplier, 1.0);
    assert_eq!(state.crash_target, 15.0);
    assert_eq!(state.started_at, Some(1_000.0));
    assert_eq!(state.round, 1);
    assert_eq!(state.curve, CurveGeometry::start(SURFACE));
}

#[test]
fn multiplier_follows_elapsed_time() {
    let mut engine = engine();
    engine.start_round(500.0);
    assert_eq!(engine.tick(2_500.0), TickOutcome::Continue);
    assert_eq!(engine.state().multiplier, multiplier_at(2_000.0, 0.0008));
}

#[test]
fn crashes_on_the_tick_that_reaches_the_target() {
    let mut engine = engine();
    let threshold = crash_ms(15.0, 0.0008);

    engine.start_round(0.0);
    for ms in 0..threshold {
        assert_eq!(engine.tick(ms as f64), TickOutcome::Continue, "early crash at {ms}");
    }
    match engine.tick(threshold as f64) {
        TickOutcome::Crashed(report) => {
            assert_eq!(report.round, 1);
            assert_eq!(report.crash_target, 15.0);
            assert!(report.multiplier >= 15.0);
            assert_eq!(report.elapsed_ms, threshold as f64);
        }
        other => panic!("expected crash, got {other:?}"),
    }
    assert_eq!(engine.status(), RoundStatus::Crashed);
}

#[test]
fn crash_time_for_target_fifteen_matches_closed_form() {
    // (elapsed * 0.0008)^1.5 >= 14  =>  elapsed >= 14^(2/3) / 0.0008
    let closed_form = 14f64.powf(2.0 / 3.0) / 0.0008;
    let mut engine = engine();
    engine.start_round(0.0);
    let (ms, _) = run_until_crash(&mut engine, 0);
    assert!((ms as f64 - closed_form).abs() < 10.0, "crashed at {ms}, expected ~{closed_form}");
}

#[test]
fn crash_schedules_restart_after_delay() {
    let mut engine = engine();
    engine.set_view_active(true, 0.0);
    let (crashed_at, _) = run_until_crash(&mut engine, 0);

    assert!(engine.restart_pending());
    assert_eq!(engine.next_deadline(), Some(crashed_at as f64 + 2_000.0));

    assert!(!engine.fire_due_timers(crashed_at as f64 + 1_999.0));
    assert_eq!(engine.status(), RoundStatus::Crashed);

    assert!(engine.fire_due_timers(crashed_at as f64 + 2_000.0));
    assert_eq!(engine.status(), RoundStatus::Playing);
    assert_eq!(engine.state().crash_target, 8.34);
    assert_eq!(engine.state().round, 2);
    assert!(!engine.restart_pending());
}

#[test]
fn restart_goes_idle_when_view_is_not_active() {
    let mut engine = engine();
    engine.start_round(0.0);
    let (crashed_at, _) = run_until_crash(&mut engine, 0);

    engine.fire_due_timers(crashed_at as f64 + 2_000.0);
    assert_eq!(engine.status(), RoundStatus::Idle);
    assert_eq!(engine.state().started_at, None);
    assert_eq!(engine.state().multiplier, 1.0);
    assert_eq!(engine.state().crash_target, 8.34);
}

#[test]
fn crash_targets_wrap_after_full_sequence() {
    let points = [1.5, 2.0, 3.0];
    let mut engine = engine_with(&points);
    engine.set_view_active(true, 0.0);

    let mut now = 0;
    let mut seen = Vec::new();
    for _ in 0..points.len() + 1 {
        seen.push(engine.state().crash_target);
        let (crashed_at, _) = run_until_crash(&mut engine, now);
        now = crashed_at + 2_000;
        engine.fire_due_timers(now as f64);
    }
    assert_eq!(seen, vec![1.5, 2.0, 3.0, 1.5]);
}

#[test]
fn stop_while_playing_goes_idle() {
    let mut engine = engine();
    engine.set_view_active(true, 0.0);
    engine.tick(1_000.0);

    engine.stop();
    assert_eq!(engine.status(), RoundStatus::Idle);
    assert_eq!(engine.state().started_at, None);
    assert_eq!(engine.tick(2_000.0), TickOutcome::Inactive);
}

#[test]
fn stop_while_crashed_cancels_restart() {
    let mut engine = engine();
    engine.set_view_active(true, 0.0);
    let (crashed_at, _) = run_until_crash(&mut engine, 0);
    assert!(engine.restart_pending());

    engine.stop();
    assert!(!engine.restart_pending());
    assert!(!engine.fire_due_timers(crashed_at as f64 + 10_000.0));
    assert_eq!(engine.status(), RoundStatus::Idle);
}

#[test]
fn hiding_the_view_stops_and_showing_restarts() {
    let mut engine = engine();
    engine.set_view_active(true, 0.0);
    let (crashed_at, _) = run_until_crash(&mut engine, 0);

    engine.set_view_active(false, crashed_at as f64 + 500.0);
    assert_eq!(engine.status(), RoundStatus::Idle);
    engine.fire_due_timers(crashed_at as f64 + 5_000.0);
    assert_eq!(engine.status(), RoundStatus::Idle);

    engine.set_view_active(true, 20_000.0);
    assert_eq!(engine.status(), RoundStatus::Playing);
    assert_eq!(engine.state().started_at, Some(20_000.0));
    assert_eq!(engine.state().crash_target, 8.34);
}

#[test]
fn showing_the_view_while_playing_keeps_the_round() {
    let mut engine = engine();
    engine.set_view_active(true, 0.0);
    engine.tick(1_000.0);
    engine.set_view_active(true, 1_500.0);
    assert_eq!(engine.state().started_at, Some(0.0));
    assert_eq!(engine.state().round, 1);
}

#[test]
fn start_round_mid_round_supersedes_it() {
    let mut engine = engine();
    engine.start_round(0.0);
    engine.tick(3_000.0);
    assert!(engine.state().multiplier > 1.0);

    engine.start_round(4_000.0);
    assert_eq!(engine.state().multiplier, 1.0);
    assert_eq!(engine.state().started_at, Some(4_000.0));
    assert_eq!(engine.state().crash_target, 15.0);
    assert_eq!(engine.state().round, 2);
}

#[test]
fn start_round_during_crash_cancels_pending_restart() {
    let mut engine = engine();
    engine.set_view_active(true, 0.0);
    let (crashed_at, _) = run_until_crash(&mut engine, 0);

    engine.start_round(crashed_at as f64 + 100.0);
    assert!(!engine.restart_pending());
    engine.fire_due_timers(crashed_at as f64 + 2_000.0);
    assert_eq!(engine.state().started_at, Some(crashed_at as f64 + 100.0));
}

#[test]
fn clock_stepping_backwards_does_not_lower_multiplier() {
    let mut engine = engine();
    engine.start_round(1_000.0);
    engine.tick(4_000.0);
    let before = engine.state().multiplier;
    engine.tick(500.0);
    assert_eq!(engine.state().multiplier, before);
}

#[test]
fn history_is_newest_first_and_bounded() {
    let config = EngineConfig {
        history_len: 2,
        ..EngineConfig::default()
    };
    let mut engine = RoundEngine::new(config, FixedSequence::new([1.2, 1.5, 2.0]), SURFACE);
    engine.set_view_active(true, 0.0);

    let mut now = 0;
    for _ in 0..3 {
        let (crashed_at, _) = run_until_crash(&mut engine, now);
        now = crashed_at + 2_000;
        engine.fire_due_timers(now as f64);
    }
    let history: Vec<f64> = engine.history().collect();
    assert_eq!(history.len(), 2);
    assert!(history[0] >= 2.0);
    assert!(history[1] >= 1.5 && history[1] < 2.0);
}

#[test]
fn zero_area_surface_degrades_gracefully() {
    let mut engine = RoundEngine::new(
        EngineConfig::default(),
        FixedSequence::default(),
        SurfaceSize::new(0, 0),
    );
    engine.start_round(0.0);
    for ms in (0..5_000).step_by(16) {
        engine.tick(ms as f64);
        let curve = engine.state().curve;
        assert_eq!(curve.endpoint.y, 0.0);
        assert_eq!(curve.aeroplane.y, 0.0);
    }
}

#[test]
fn zero_sweep_duration_puts_endpoint_at_far_edge() {
    let config = EngineConfig {
        sweep_duration_ms: 0.0,
        ..EngineConfig::default()
    };
    let mut engine = RoundEngine::new(config, FixedSequence::default(), SURFACE);
    engine.start_round(0.0);
    engine.tick(0.0);
    assert_eq!(engine.state().curve.endpoint.x, 800.0);
}

#[test]
fn resize_resets_curve_to_start() {
    let mut engine = engine();
    engine.start_round(0.0);
    engine.tick(5_000.0);
    assert_ne!(engine.state().curve, CurveGeometry::start(SURFACE));

    let bigger = SurfaceSize::new(1_600, 900);
    engine.resize(bigger);
    assert_eq!(engine.surface(), bigger);
    assert_eq!(engine.state().curve, CurveGeometry::start(bigger));

    engine.tick(5_016.0);
    assert!(engine.state().curve.endpoint.y <= 900.0);
}

#[test]
fn non_finite_settings_fall_back_to_defaults() {
    let toml_str = "[engine]\noscillation_amplitude = nan\nspeed_factor = inf\nrestart_delay_ms = -5.0\n";
    let config: crate::config::Config = toml::from_str(toml_str).unwrap();
    assert!(config.engine.oscillation_amplitude.is_nan());

    let mut engine = RoundEngine::new(config.engine_config(), FixedSequence::default(), SURFACE);
    assert_eq!(engine.config().oscillation_amplitude, 20.0);
    assert_eq!(engine.config().speed_factor, 0.0008);
    assert_eq!(engine.config().restart_delay_ms, 2000.0);

    engine.start_round(0.0);
    for ms in (0..7_000u32).step_by(16) {
        assert_eq!(engine.tick(ms as f64), TickOutcome::Continue);
        let curve = engine.state().curve;
        assert!((0.0..=400.0).contains(&curve.endpoint.y), "{curve:?}");
        assert!((0.0..=400.0).contains(&curve.aeroplane.y), "{curve:?}");
    }
}

#[test]
fn sanitized_keeps_valid_settings() {
    let config = EngineConfig {
        speed_factor: 0.002,
        sweep_duration_ms: 0.0,
        curve_dip: -10.0,
        ..EngineConfig::default()
    };
    assert_eq!(config.sanitized(), config);
}
