//! Shared test utilities for integration and unit tests

use crate::render::DrawCommand;
use crate::surface::{Surface, SurfaceSize};

// ============================================================================
// Recording Surface
// ============================================================================

/// Surface that keeps the commands of the most recent frame.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    current: Vec<DrawCommand>,
    last: Vec<DrawCommand>,
    frames: u64,
    resizes: u32,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            ..Default::default()
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn resizes(&self) -> u32 {
        self.resizes
    }

    /// Commands of the last completed frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last
    }

    /// Text drawn in the last completed frame, in order.
    pub fn last_texts(&self) -> Vec<String> {
        self.last
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether the last frame drew the aeroplane.
    pub fn last_frame_has_transform(&self) -> bool {
        self.last
            .iter()
            .any(|c| matches!(c, DrawCommand::PushTransform(_)))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = SurfaceSize::new(width, height);
        self.resizes += 1;
    }

    fn begin_frame(&mut self) {
        self.current.clear();
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.current.push(command.clone());
    }

    fn end_frame(&mut self) {
        self.last = std::mem::take(&mut self.current);
        self.frames += 1;
    }
}

// ============================================================================
// Frame Clock
// ============================================================================

/// Virtual display clock advancing a fixed step per frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    now: f64,
    step: f64,
}

impl FrameClock {
    /// Clock at `start` ms stepping `step` ms per frame.
    pub fn new(start: f64, step: f64) -> Self {
        Self { now: start, step }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move to the next frame and return its timestamp.
    pub fn advance(&mut self) -> f64 {
        self.now += self.step;
        self.now
    }
}
