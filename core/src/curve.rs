//! Crash-curve math
//!
//! Pure functions of elapsed time and surface bounds. The engine stores the
//! results each tick; nothing in here holds state.

use aviator_shared::Point2;
use glam::DVec2;

use crate::surface::SurfaceSize;

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Multiplier after `elapsed_ms` of flight.
///
/// `1 + (elapsed * speed)^1.5`, rounded to cents. Negative elapsed time (a
/// clock that stepped backwards) counts as zero.
pub fn multiplier_at(elapsed_ms: f64, speed_factor: f64) -> f64 {
    let scaled = (elapsed_ms.max(0.0) * speed_factor).max(0.0);
    round2(1.0 + scaled.powf(1.5))
}

/// Horizontal sweep progress in `[0, 1]`.
///
/// A zero (or negative, or NaN) sweep duration means the curve is already
/// fully swept.
pub fn sweep_progress(elapsed_ms: f64, sweep_duration_ms: f64) -> f64 {
    if !(sweep_duration_ms > 0.0) {
        return 1.0;
    }
    (elapsed_ms / sweep_duration_ms).clamp(0.0, 1.0)
}

/// Tunables for the curve shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    /// Time for the endpoint to cross the full surface width.
    pub sweep_duration_ms: f64,
    /// Vertical turbulence amplitude in pixels.
    pub oscillation_amplitude: f64,
    /// Turbulence angular frequency in radians per millisecond.
    pub oscillation_frequency: f64,
    /// How far the control point sits below the chord midpoint.
    pub curve_dip: f64,
    /// Aeroplane glyph height in pixels, used for the aeroplane clamp.
    pub aeroplane_size: f64,
}

/// Derived curve positions for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveGeometry {
    /// Fixed curve origin (bottom-left of the surface).
    pub start: Point2,
    /// Current end of the curve.
    pub endpoint: Point2,
    /// Quadratic control point.
    pub control: Point2,
    /// Aeroplane anchor (endpoint, clamped to keep the glyph on screen).
    pub aeroplane: Point2,
}

impl CurveGeometry {
    /// Start-of-round position: everything at the bottom-left corner.
    pub fn start(surface: SurfaceSize) -> Self {
        let start = Point2::new(0.0, surface.h());
        Self {
            start,
            endpoint: start,
            control: Point2::new(surface.w() / 4.0, surface.h()),
            aeroplane: start,
        }
    }

    /// Geometry after `elapsed_ms` of flight.
    pub fn at(elapsed_ms: f64, surface: SurfaceSize, params: &CurveParams) -> Self {
        let elapsed = elapsed_ms.max(0.0);
        let (w, h) = (surface.w(), surface.h());
        let progress = sweep_progress(elapsed, params.sweep_duration_ms);

        let start = DVec2::new(0.0, h);
        let base = start.lerp(DVec2::new(w, 0.0), progress);
        let wobble = finite_or_zero(params.oscillation_amplitude * (elapsed * params.oscillation_frequency).sin());

        let endpoint = DVec2::new(clamp_span(base.x, w), clamp_span(base.y + wobble, h));
        let mid = (start + endpoint) * 0.5;
        let control = DVec2::new(clamp_span(mid.x, w), clamp_span(mid.y + finite_or_zero(params.curve_dip), h));

        Self {
            start: to_point(start),
            endpoint: to_point(endpoint),
            control: to_point(control),
            aeroplane: Point2::new(endpoint.x, clamp_aeroplane_y(endpoint.y, h, params.aeroplane_size)),
        }
    }
}

/// Keep the aeroplane glyph inside the surface.
///
/// The glyph is centred on its anchor, so half its height is reserved at the
/// top and bottom. On surfaces shorter than the glyph the band collapses to
/// the vertical centre.
pub fn clamp_aeroplane_y(y: f64, height: f64, size: f64) -> f64 {
    let half = (finite_or_zero(size).max(0.0) / 2.0).min(height / 2.0);
    if y.is_nan() {
        return height - half;
    }
    y.clamp(half, height - half)
}

/// Clamp to `[0, max]`; NaN maps to 0.
fn clamp_span(value: f64, max: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, max) }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn to_point(v: DVec2) -> Point2 {
    Point2::new(v.x, v.y)
}
