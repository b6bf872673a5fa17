//! Crash-target sources
//!
//! A round crashes when its multiplier reaches the target drawn here. The
//! default source replays a fixed list; the seeded source draws from a
//! house-edge distribution with a PCG generator so a given seed always
//! produces the same rounds.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::curve::round2;

/// Crash points used when nothing else is configured.
pub const DEFAULT_CRASH_POINTS: [f64; 7] = [15.0, 8.34, 25.34, 25.23, 18.0, 32.5, 39.0];

/// Smallest target a draw may produce. Targets must exceed 1.00.
pub const MIN_CRASH_TARGET: f64 = 1.01;

/// Largest target the seeded source will produce.
pub const MAX_CRASH_TARGET: f64 = 1000.0;

/// Which crash source the engine builds from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CrashMode {
    /// Replay the configured crash points in order.
    #[default]
    Fixed,
    /// Draw each target from a seeded generator.
    Seeded,
}

/// Supplies the crash target for each round.
///
/// `current` is read when a round starts; `advance` is called exactly once
/// when that round crashes.
pub trait CrashSource {
    /// Target for the round about to start (or in progress).
    fn current(&self) -> f64;

    /// Move on to the next round's target.
    fn advance(&mut self);
}

impl<T: CrashSource + ?Sized> CrashSource for Box<T> {
    fn current(&self) -> f64 {
        (**self).current()
    }

    fn advance(&mut self) {
        (**self).advance()
    }
}

/// Fixed, wrapping sequence of crash targets.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSequence {
    points: Vec<f64>,
    index: usize,
}

impl FixedSequence {
    /// Build from a list of targets.
    ///
    /// Values that are not finite or not above 1.00 are dropped. If nothing
    /// is left the default sequence is used.
    pub fn new(points: impl IntoIterator<Item = f64>) -> Self {
        let mut points: Vec<f64> = points
            .into_iter()
            .filter(|p| p.is_finite() && *p > 1.0)
            .collect();
        if points.is_empty() {
            tracing::warn!("No usable crash points configured, using defaults");
            points = DEFAULT_CRASH_POINTS.to_vec();
        }
        Self { points, index: 0 }
    }

    /// Position of the current target in the sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for FixedSequence {
    fn default() -> Self {
        Self::new(DEFAULT_CRASH_POINTS)
    }
}

impl CrashSource for FixedSequence {
    fn current(&self) -> f64 {
        self.points[self.index]
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % self.points.len();
    }
}

/// Seeded draw with a configurable house edge.
///
/// `target = floor(100 * (1 - edge) / (1 - u)) / 100` for uniform `u` in
/// `[0, 1)`, clamped to `[MIN_CRASH_TARGET, MAX_CRASH_TARGET]`.
#[derive(Debug, Clone)]
pub struct SeededCrashSource {
    rng: Pcg32,
    house_edge: f64,
    current: f64,
    seed: u64,
}

impl SeededCrashSource {
    pub fn new(seed: u64, house_edge: f64) -> Self {
        let house_edge = if house_edge.is_finite() {
            house_edge.clamp(0.0, 0.99)
        } else {
            0.0
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let current = draw(&mut rng, house_edge);
        Self {
            rng,
            house_edge,
            current,
            seed,
        }
    }

    /// Seed from the thread RNG. Not reproducible.
    pub fn from_entropy(house_edge: f64) -> Self {
        Self::new(rand::random::<u64>(), house_edge)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl CrashSource for SeededCrashSource {
    fn current(&self) -> f64 {
        self.current
    }

    fn advance(&mut self) {
        self.current = draw(&mut self.rng, self.house_edge);
    }
}

fn draw(rng: &mut Pcg32, house_edge: f64) -> f64 {
    let u: f64 = rng.random();
    let raw = (100.0 * (1.0 - house_edge) / (1.0 - u)).floor() / 100.0;
    round2(raw.clamp(MIN_CRASH_TARGET, MAX_CRASH_TARGET))
}

/// Build the configured crash source.
pub fn from_config(config: &crate::round::EngineConfig) -> Box<dyn CrashSource> {
    match config.crash_mode {
        CrashMode::Fixed => Box::new(FixedSequence::new(config.crash_points.iter().copied())),
        CrashMode::Seeded => {
            let source = match config.seed {
                Some(seed) => SeededCrashSource::new(seed, config.house_edge),
                None => SeededCrashSource::from_entropy(config.house_edge),
            };
            tracing::info!(seed = source.seed(), "Seeded crash source");
            Box::new(source)
        }
    }
}
