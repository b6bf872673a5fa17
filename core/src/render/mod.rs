//! Curve renderer
//!
//! [`render`] is a pure function of the round state and surface size. It
//! never touches the engine; the runtime replays its output onto a
//! [`Surface`](crate::surface::Surface).

mod draw;
mod glyph;

use aviator_shared::Point2;
use serde::{Deserialize, Serialize};

use crate::round::{RoundState, RoundStatus};
use crate::surface::SurfaceSize;

pub use draw::{DrawCommand, Path, PathSegment, Rgba, Shadow, TextAlign, Transform};
pub use glyph::GLYPH_UNITS;

const GRADIENT_INNER: Rgba = Rgba::rgb(0x37, 0x00, 0xFF);
const GRADIENT_OUTER: Rgba = Rgba::rgb(0x1A, 0x1A, 0x1A);
const GRADIENT_INNER_RADIUS: f64 = 10.0;
const AREA_FILL: Rgba = Rgba::rgba(255, 0, 0, 0.1);
const CURVE_STROKE: Rgba = Rgba::rgb(0x05, 0x84, 0xB6);
const CURVE_GLOW: Shadow = Shadow {
    color: Rgba::rgba(5, 132, 182, 0.7),
    blur: 10.0,
    offset: Point2::new(2.0, 2.0),
};
const MULTIPLIER_TEXT: Rgba = Rgba::rgb(0x61, 0xDA, 0xFB);
const CRASHED_TEXT: Rgba = Rgba::rgb(0x3D, 0x03, 0x03);

/// Label drawn over a crashed round.
pub const CRASHED_LABEL: &str = "Crashed!!!";

/// Renderer tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Number of sunburst rays (default: 36)
    #[serde(default = "default_ray_count")]
    pub ray_count: u32,
    /// Ray opacity (default: 0.1)
    #[serde(default = "default_ray_opacity")]
    pub ray_opacity: f32,
    /// Ray and gradient reach as a fraction of the larger dimension (default: 0.7)
    #[serde(default = "default_ray_reach")]
    pub ray_reach: f64,
    /// Aeroplane height in pixels (default: 60)
    #[serde(default = "default_aeroplane_size")]
    pub aeroplane_size: f64,
    /// Aeroplane tilt in degrees (default: -10)
    #[serde(default = "default_tilt_degrees")]
    pub tilt_degrees: f64,
    /// Curve stroke width (default: 3)
    #[serde(default = "default_curve_width")]
    pub curve_width: f64,
    /// Multiplier text size in pixels (default: 30)
    #[serde(default = "default_multiplier_font_px")]
    pub multiplier_font_px: f64,
    /// Crash label size in pixels (default: 50)
    #[serde(default = "default_crashed_font_px")]
    pub crashed_font_px: f64,
}

fn default_ray_count() -> u32 {
    36
}
fn default_ray_opacity() -> f32 {
    0.1
}
fn default_ray_reach() -> f64 {
    0.7
}
fn default_aeroplane_size() -> f64 {
    60.0
}
fn default_tilt_degrees() -> f64 {
    -10.0
}
fn default_curve_width() -> f64 {
    3.0
}
fn default_multiplier_font_px() -> f64 {
    30.0
}
fn default_crashed_font_px() -> f64 {
    50.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ray_count: default_ray_count(),
            ray_opacity: default_ray_opacity(),
            ray_reach: default_ray_reach(),
            aeroplane_size: default_aeroplane_size(),
            tilt_degrees: default_tilt_degrees(),
            curve_width: default_curve_width(),
            multiplier_font_px: default_multiplier_font_px(),
            crashed_font_px: default_crashed_font_px(),
        }
    }
}

/// Produce the draw commands for one frame.
pub fn render(state: &RoundState, surface: SurfaceSize, config: &RenderConfig) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(64);
    let center = Point2::new(surface.w() / 2.0, surface.h() / 2.0);

    push_background(&mut out, surface, center, config);

    match state.status {
        RoundStatus::Playing => {
            push_curve(&mut out, state, surface, config);
            out.push(DrawCommand::PushTransform(Transform {
                translate: state.curve.aeroplane,
                rotate: config.tilt_degrees.to_radians(),
                scale: config.aeroplane_size / GLYPH_UNITS,
            }));
            glyph::push_aeroplane(&mut out);
            out.push(DrawCommand::PopTransform);
        }
        RoundStatus::Crashed => {
            out.push(DrawCommand::Text {
                text: CRASHED_LABEL.to_string(),
                position: center,
                size_px: config.crashed_font_px,
                color: CRASHED_TEXT,
                align: TextAlign::Center,
            });
        }
        RoundStatus::Idle => {}
    }

    if state.status != RoundStatus::Crashed {
        out.push(DrawCommand::Text {
            text: state.multiplier_label(),
            position: center,
            size_px: config.multiplier_font_px,
            color: MULTIPLIER_TEXT,
            align: TextAlign::Center,
        });
    }

    out
}

fn push_background(out: &mut Vec<DrawCommand>, surface: SurfaceSize, center: Point2, config: &RenderConfig) {
    let reach = surface.w().max(surface.h()) * config.ray_reach;

    out.push(DrawCommand::Clear { size: surface });
    out.push(DrawCommand::RadialGradient {
        center,
        inner_radius: GRADIENT_INNER_RADIUS,
        outer_radius: reach,
        inner: GRADIENT_INNER,
        outer: GRADIENT_OUTER,
    });

    let ray_color = Rgba::WHITE.with_alpha(config.ray_opacity);
    let step = std::f64::consts::TAU / config.ray_count.max(1) as f64;
    for i in 1..=config.ray_count {
        let angle = step * i as f64;
        out.push(DrawCommand::Line {
            from: center,
            to: Point2::new(center.x + reach * angle.cos(), center.y + reach * angle.sin()),
            color: ray_color,
            width: 1.0,
        });
    }
}

fn push_curve(out: &mut Vec<DrawCommand>, state: &RoundState, surface: SurfaceSize, config: &RenderConfig) {
    let curve = &state.curve;
    let bottom = surface.h();

    let area = Path::new()
        .move_to(curve.start.x, curve.start.y)
        .quad_to(curve.control, curve.endpoint)
        .line_to(curve.endpoint.x, bottom)
        .line_to(curve.start.x, bottom)
        .close();
    out.push(DrawCommand::FillPath {
        path: area,
        color: AREA_FILL,
        shadow: None,
    });

    let line = Path::new()
        .move_to(curve.start.x, curve.start.y)
        .quad_to(curve.control, curve.endpoint);
    out.push(DrawCommand::StrokePath {
        path: line,
        color: CURVE_STROKE,
        width: config.curve_width,
        shadow: Some(CURVE_GLOW),
    });
}
