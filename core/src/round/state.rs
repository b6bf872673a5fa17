//! Round state owned by the engine.

use serde::Serialize;

use crate::curve::CurveGeometry;
use crate::surface::SurfaceSize;

/// Lifecycle of the single round the engine tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// No round running and none scheduled.
    Idle,
    /// Multiplier is climbing; `tick` advances the round.
    Playing,
    /// Round ended; a restart may be pending.
    Crashed,
}

/// Snapshot of the current round.
///
/// `started_at` is `None` only while `Idle`. The curve geometry is derived
/// from elapsed time and surface size on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub status: RoundStatus,
    /// Current multiplier, >= 1.00, non-decreasing within a round.
    pub multiplier: f64,
    /// Multiplier at which this round crashes.
    pub crash_target: f64,
    /// Host timestamp (ms) when the round started.
    pub started_at: Option<f64>,
    /// 1-based round counter; 0 before the first round.
    pub round: u64,
    pub curve: CurveGeometry,
}

impl RoundState {
    /// Cleared state shown while no round is active.
    pub fn idle(next_target: f64, round: u64, surface: SurfaceSize) -> Self {
        Self {
            status: RoundStatus::Idle,
            multiplier: 1.0,
            crash_target: next_target,
            started_at: None,
            round,
            curve: CurveGeometry::start(surface),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == RoundStatus::Playing
    }

    /// Multiplier formatted for display, e.g. `"1.37x"`.
    pub fn multiplier_label(&self) -> String {
        format!("{:.2}x", self.multiplier)
    }
}

/// Summary of a crashed round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrashReport {
    pub round: u64,
    pub crash_target: f64,
    /// Multiplier on the crashing tick (>= `crash_target`).
    pub multiplier: f64,
    pub elapsed_ms: f64,
}

/// What a call to `tick` did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Engine is not playing; nothing changed.
    Inactive,
    /// Round continues; the host should deliver another frame.
    Continue,
    /// Round crashed on this tick.
    Crashed(CrashReport),
}

impl TickOutcome {
    /// Whether the engine wants another animation frame.
    pub fn wants_frame(&self) -> bool {
        matches!(self, TickOutcome::Continue)
    }
}
