//! Host frame loop
//!
//! Ties the engine, renderer and surface together. The host owns the clock
//! and the display-refresh callback; each callback calls [`Runtime::frame`]
//! with the current timestamp in milliseconds.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::crash::{self, CrashSource};
use crate::render::{self, RenderConfig};
use crate::round::{RoundEngine, TickOutcome};
use crate::surface::Surface;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Frame rate assumed by headless hosts (default: 60)
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Per-frame CPU budget before a warning is logged (default: 4000 us)
    #[serde(default = "default_frame_budget_us")]
    pub frame_budget_us: u64,
}

fn default_frame_rate() -> u32 {
    60
}
fn default_frame_budget_us() -> u64 {
    4_000
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            frame_budget_us: default_frame_budget_us(),
        }
    }
}

impl RuntimeConfig {
    /// Milliseconds between frames at the configured rate.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate.max(1) as f64
    }
}

/// Result of one host frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Tick result, or `None` if the engine was not playing this frame.
    pub tick: Option<TickOutcome>,
    /// True if an engine timer (restart) fired this frame.
    pub timer_fired: bool,
    /// Number of draw commands submitted.
    pub commands: usize,
    /// True if the round is still flying and the host should schedule another
    /// frame right away. Otherwise the next useful frame is at the engine's
    /// next timer deadline, if any.
    pub wants_frame: bool,
}

/// Main runtime driving one engine onto one surface.
pub struct Runtime<S: Surface, C: CrashSource = Box<dyn CrashSource>> {
    engine: RoundEngine<C>,
    surface: S,
    render_config: RenderConfig,
    config: RuntimeConfig,
    frames: u64,
    frame_budget: Duration,
}

impl<S: Surface> Runtime<S> {
    /// Build a runtime from the application config.
    pub fn from_config(config: &Config, surface: S) -> Self {
        let engine_config = config.engine_config();
        let source = crash::from_config(&engine_config);
        let engine = RoundEngine::new(engine_config, source, surface.size());
        Self::new(engine, surface, config.render.clone(), config.runtime.clone())
    }
}

impl<S: Surface, C: CrashSource> Runtime<S, C> {
    pub fn new(engine: RoundEngine<C>, surface: S, render_config: RenderConfig, config: RuntimeConfig) -> Self {
        let frame_budget = Duration::from_micros(config.frame_budget_us);
        Self {
            engine,
            surface,
            render_config,
            config,
            frames: 0,
            frame_budget,
        }
    }

    pub fn engine(&self) -> &RoundEngine<C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RoundEngine<C> {
        &mut self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// View shown or hidden.
    pub fn set_view_active(&mut self, active: bool, now: f64) {
        self.engine.set_view_active(active, now);
        if !active {
            // Leave a cleared frame behind rather than the last curve.
            self.present();
        }
    }

    /// Host resized the surface; takes effect before the next tick.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.engine.resize(self.surface.size());
    }

    /// Run one frame at host time `now` (milliseconds).
    ///
    /// Fires due timers, ticks the engine if it is playing, then renders.
    pub fn frame(&mut self, now: f64) -> FrameReport {
        let frame_start = Instant::now();

        self.engine.resize(self.surface.size());
        let timer_fired = self.engine.fire_due_timers(now);
        let tick = self.engine.state().is_playing().then(|| self.engine.tick(now));
        let commands = self.present();

        let frame_time = frame_start.elapsed();
        if frame_time > self.frame_budget {
            warn!(
                "Frame took {:?}, exceeds budget of {:?}",
                frame_time, self.frame_budget
            );
        }

        FrameReport {
            tick,
            timer_fired,
            commands,
            wants_frame: tick.is_some_and(|t| t.wants_frame()),
        }
    }

    fn present(&mut self) -> usize {
        let commands = render::render(self.engine.state(), self.surface.size(), &self.render_config);
        self.surface.begin_frame();
        for command in &commands {
            self.surface.draw(command);
        }
        self.surface.end_frame();
        self.frames += 1;
        commands.len()
    }
}
