//! Rendering surface abstraction
//!
//! The engine never talks to a canvas directly. The host hands the runtime a
//! [`Surface`] and the renderer's [`DrawCommand`]s are replayed onto it once
//! per frame.

use crate::render::DrawCommand;

/// Pixel dimensions of a rendering surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as a float for curve math.
    pub fn w(self) -> f64 {
        self.width as f64
    }

    /// Height as a float for curve math.
    pub fn h(self) -> f64 {
        self.height as f64
    }

    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Trait for presentation backends (canvas, terminal, recorder).
///
/// Mirrors a graphics backend: resized by the host, bracketed per frame,
/// fed draw commands in order.
pub trait Surface {
    /// Current surface dimensions.
    fn size(&self) -> SurfaceSize;

    /// Resize the surface. Called by the host before the next frame.
    fn resize(&mut self, width: u32, height: u32);

    /// Begin a new frame.
    fn begin_frame(&mut self) {}

    /// Replay one draw command.
    fn draw(&mut self, command: &DrawCommand);

    /// End the current frame.
    fn end_frame(&mut self) {}
}

/// Surface that draws nothing and only counts what it was given.
///
/// Used by the headless simulator.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    size: SurfaceSize,
    frames: u64,
    commands: u64,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            ..Default::default()
        }
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw commands received so far.
    pub fn commands(&self) -> u64 {
        self.commands
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = SurfaceSize::new(width, height);
    }

    fn draw(&mut self, _command: &DrawCommand) {
        self.commands += 1;
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
