//! Round engine
//!
//! Owns the single [`RoundState`] and moves it through
//! `Idle -> Playing -> Crashed -> Playing ...`. The host drives it: `tick` once
//! per animation frame while playing, `fire_due_timers` every frame so the
//! post-crash restart can run, and `set_view_active` when the view is shown
//! or hidden.
//!
//! The engine performs no I/O and every operation is infallible. Out-of-range
//! inputs (zero-sized surfaces, clocks that step backwards) are clamped.

mod state;
#[cfg(test)]
mod tests;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::crash::{CrashMode, CrashSource, DEFAULT_CRASH_POINTS};
use crate::curve::{CurveGeometry, CurveParams, multiplier_at};
use crate::surface::SurfaceSize;
use crate::timer::{TimerHandle, TimerQueue};

pub use state::{CrashReport, RoundState, RoundStatus, TickOutcome};

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Multiplier growth speed per millisecond (default: 0.0008)
    #[serde(default = "default_speed_factor")]
    pub speed_factor: f64,
    /// Time for the curve to cross the surface (default: 15000 ms)
    #[serde(default = "default_sweep_duration_ms")]
    pub sweep_duration_ms: f64,
    /// Turbulence amplitude in pixels (default: 20)
    #[serde(default = "default_oscillation_amplitude")]
    pub oscillation_amplitude: f64,
    /// Turbulence frequency in radians per ms (default: 0.004)
    #[serde(default = "default_oscillation_frequency")]
    pub oscillation_frequency: f64,
    /// Control point offset below the chord midpoint (default: 50 px)
    #[serde(default = "default_curve_dip")]
    pub curve_dip: f64,
    /// Aeroplane glyph height used for the on-screen clamp.
    ///
    /// Not read from the `[engine]` table; `Config::engine_config` copies it
    /// from `[render]` so the clamp and the drawn glyph agree.
    #[serde(skip, default = "default_aeroplane_size")]
    pub aeroplane_size: f64,
    /// Delay between a crash and the next round (default: 2000 ms)
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: f64,
    /// Crash source selection (default: fixed)
    #[serde(default)]
    pub crash_mode: CrashMode,
    /// Targets replayed in fixed mode
    #[serde(default = "default_crash_points")]
    pub crash_points: Vec<f64>,
    /// Seed for seeded mode; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// House edge for seeded mode (default: 0.01)
    #[serde(default = "default_house_edge")]
    pub house_edge: f64,
    /// Number of past crash multipliers kept (default: 20)
    #[serde(default = "default_history_len")]
    pub history_len: usize,
}

fn default_speed_factor() -> f64 {
    0.0008
}
fn default_sweep_duration_ms() -> f64 {
    15_000.0
}
fn default_oscillation_amplitude() -> f64 {
    20.0
}
fn default_oscillation_frequency() -> f64 {
    0.004
}
fn default_curve_dip() -> f64 {
    50.0
}
fn default_aeroplane_size() -> f64 {
    60.0
}
fn default_restart_delay_ms() -> f64 {
    2_000.0
}
fn default_crash_points() -> Vec<f64> {
    DEFAULT_CRASH_POINTS.to_vec()
}
fn default_house_edge() -> f64 {
    0.01
}
fn default_history_len() -> usize {
    20
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed_factor: default_speed_factor(),
            sweep_duration_ms: default_sweep_duration_ms(),
            oscillation_amplitude: default_oscillation_amplitude(),
            oscillation_frequency: default_oscillation_frequency(),
            curve_dip: default_curve_dip(),
            aeroplane_size: default_aeroplane_size(),
            restart_delay_ms: default_restart_delay_ms(),
            crash_mode: CrashMode::default(),
            crash_points: default_crash_points(),
            seed: None,
            house_edge: default_house_edge(),
            history_len: default_history_len(),
        }
    }
}

impl EngineConfig {
    /// Copy with every non-finite or out-of-range tunable reset to its
    /// default. TOML accepts `nan` and `inf`, so loaded files need this.
    pub fn sanitized(&self) -> Self {
        Self {
            speed_factor: checked("speed_factor", self.speed_factor, default_speed_factor(), 0.0),
            sweep_duration_ms: checked(
                "sweep_duration_ms",
                self.sweep_duration_ms,
                default_sweep_duration_ms(),
                f64::NEG_INFINITY,
            ),
            oscillation_amplitude: checked(
                "oscillation_amplitude",
                self.oscillation_amplitude,
                default_oscillation_amplitude(),
                f64::NEG_INFINITY,
            ),
            oscillation_frequency: checked(
                "oscillation_frequency",
                self.oscillation_frequency,
                default_oscillation_frequency(),
                f64::NEG_INFINITY,
            ),
            curve_dip: checked("curve_dip", self.curve_dip, default_curve_dip(), f64::NEG_INFINITY),
            aeroplane_size: checked("aeroplane_size", self.aeroplane_size, default_aeroplane_size(), 0.0),
            restart_delay_ms: checked(
                "restart_delay_ms",
                self.restart_delay_ms,
                default_restart_delay_ms(),
                0.0,
            ),
            ..self.clone()
        }
    }

    /// Curve shape parameters.
    pub fn curve_params(&self) -> CurveParams {
        CurveParams {
            sweep_duration_ms: self.sweep_duration_ms,
            oscillation_amplitude: self.oscillation_amplitude,
            oscillation_frequency: self.oscillation_frequency,
            curve_dip: self.curve_dip,
            aeroplane_size: self.aeroplane_size,
        }
    }
}

fn checked(name: &str, value: f64, default: f64, min: f64) -> f64 {
    if value.is_finite() && value >= min {
        value
    } else {
        warn!(field = name, value, default, "Invalid engine setting, using default");
        default
    }
}

/// Work scheduled by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineTimer {
    /// Start the next round (or go idle if the view is hidden).
    Restart,
}

/// Crash-game round engine.
///
/// Generic over the crash source so tests can pin targets; the runtime uses
/// `Box<dyn CrashSource>` built from config.
pub struct RoundEngine<S: CrashSource> {
    config: EngineConfig,
    source: S,
    state: RoundState,
    surface: SurfaceSize,
    timers: TimerQueue<EngineTimer>,
    /// Pending post-crash restart, if any.
    restart: Option<TimerHandle>,
    view_active: bool,
    /// Crash multipliers, newest first.
    history: VecDeque<f64>,
}

impl<S: CrashSource> RoundEngine<S> {
    /// Create an idle engine. Invalid tunables fall back to their defaults.
    pub fn new(config: EngineConfig, source: S, surface: SurfaceSize) -> Self {
        let config = config.sanitized();
        let state = RoundState::idle(source.current(), 0, surface);
        Self {
            config,
            source,
            state,
            surface,
            timers: TimerQueue::new(),
            restart: None,
            view_active: false,
            history: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn view_active(&self) -> bool {
        self.view_active
    }

    /// Recent crash multipliers, newest first.
    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }

    /// True while a post-crash restart is scheduled.
    pub fn restart_pending(&self) -> bool {
        self.restart.is_some_and(|h| self.timers.is_pending(h))
    }

    /// Timestamp of the next engine timer, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    /// Host resupplied the surface dimensions.
    ///
    /// The curve snaps back to its start position; the next tick recomputes
    /// it against the new bounds.
    pub fn resize(&mut self, surface: SurfaceSize) {
        if surface == self.surface {
            return;
        }
        debug!(width = surface.width, height = surface.height, "Surface resized");
        self.surface = surface;
        self.state.curve = CurveGeometry::start(surface);
    }

    /// Start a new round at `now`.
    ///
    /// Supersedes any round in progress and any pending restart.
    pub fn start_round(&mut self, now: f64) {
        self.cancel_restart();
        if self.surface.is_empty() {
            debug!("Starting round on an empty surface");
        }

        let round = self.state.round + 1;
        let crash_target = self.source.current();
        self.state = RoundState {
            status: RoundStatus::Playing,
            multiplier: 1.0,
            crash_target,
            started_at: Some(now),
            round,
            curve: CurveGeometry::start(self.surface),
        };
        info!(round, crash_target, "Round started");
    }

    /// Advance the round to `now`.
    ///
    /// Only meaningful while playing. Crashes on the same tick the multiplier
    /// reaches the target.
    pub fn tick(&mut self, now: f64) -> TickOutcome {
        if self.state.status != RoundStatus::Playing {
            return TickOutcome::Inactive;
        }

        let started_at = *self.state.started_at.get_or_insert(now);
        let elapsed = (now - started_at).max(0.0);

        let multiplier = multiplier_at(elapsed, self.config.speed_factor);
        self.state.multiplier = self.state.multiplier.max(multiplier);
        self.state.curve = CurveGeometry::at(elapsed, self.surface, &self.config.curve_params());

        if self.state.multiplier >= self.state.crash_target {
            let report = CrashReport {
                round: self.state.round,
                crash_target: self.state.crash_target,
                multiplier: self.state.multiplier,
                elapsed_ms: elapsed,
            };
            self.end_round(now);
            TickOutcome::Crashed(report)
        } else {
            TickOutcome::Continue
        }
    }

    /// Crash transition: mark crashed, advance the source, schedule a restart.
    fn end_round(&mut self, now: f64) {
        self.state.status = RoundStatus::Crashed;
        self.source.advance();

        self.history.push_front(self.state.multiplier);
        self.history.truncate(self.config.history_len);

        self.cancel_restart();
        let fire_at = now + self.config.restart_delay_ms.max(0.0);
        self.restart = Some(self.timers.schedule(fire_at, EngineTimer::Restart));
        info!(
            round = self.state.round,
            multiplier = self.state.multiplier,
            restart_at = fire_at,
            "Round crashed"
        );
    }

    /// Run every engine timer due at `now`.
    ///
    /// Returns true if any timer fired.
    pub fn fire_due_timers(&mut self, now: f64) -> bool {
        let mut fired = false;
        while let Some((handle, timer)) = self.timers.pop_due(now) {
            fired = true;
            match timer {
                EngineTimer::Restart => {
                    if self.restart != Some(handle) {
                        continue;
                    }
                    self.restart = None;
                    if self.view_active {
                        self.start_round(now);
                    } else {
                        debug!("View inactive at restart, going idle");
                        self.reset_to_idle();
                    }
                }
            }
        }
        fired
    }

    /// View activation signal from the host.
    ///
    /// Showing the view starts a round if the engine is idle; hiding it
    /// stops the engine.
    pub fn set_view_active(&mut self, active: bool, now: f64) {
        self.view_active = active;
        if active {
            if self.state.status == RoundStatus::Idle {
                self.start_round(now);
            }
        } else {
            self.stop();
        }
    }

    /// Stop everything: cancel pending timers and go idle.
    ///
    /// No round starts again until `start_round` or a view activation.
    pub fn stop(&mut self) {
        if self.state.status != RoundStatus::Idle || self.restart.is_some() {
            info!(round = self.state.round, "Engine stopped");
        }
        self.cancel_restart();
        self.timers.clear();
        self.reset_to_idle();
    }

    fn reset_to_idle(&mut self) {
        self.state = RoundState::idle(self.source.current(), self.state.round, self.surface);
    }

    fn cancel_restart(&mut self) {
        if let Some(handle) = self.restart.take()
            && self.timers.cancel(handle)
        {
            debug!(timer = handle.id(), "Cancelled pending restart");
        }
    }
}
