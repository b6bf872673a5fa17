//! Aeroplane glyph
//!
//! Authored in a 150-unit tall box with the origin at the glyph anchor and
//! the nose pointing along +x. The renderer wraps it in a transform that
//! places, tilts and scales it.

use aviator_shared::Point2;

use super::draw::{DrawCommand, Path, Rgba, Shadow, TextAlign};

/// Height of the glyph's authoring box.
pub const GLYPH_UNITS: f64 = 150.0;

const BODY: Rgba = Rgba::WHITE;
const OUTLINE: Rgba = Rgba::rgb(0xCC, 0xCC, 0xCC);
const MARKING: Rgba = Rgba::rgb(0xFF, 0x00, 0x00);
const GLOW: Shadow = Shadow {
    color: Rgba::rgba(247, 247, 240, 0.9),
    blur: 10.0,
    offset: Point2::ZERO,
};

fn body_parts() -> [Path; 5] {
    [
        // Fuselage
        Path::new()
            .move_to(0.0, 0.0)
            .cubic_to((10.0, 20.0), (100.0, 20.0), (120.0, 0.0))
            .cubic_to((100.0, -20.0), (10.0, -20.0), (0.0, 0.0))
            .close(),
        // Canopy
        Path::new()
            .move_to(60.0, -10.0)
            .cubic_to((70.0, -25.0), (90.0, -25.0), (100.0, -10.0))
            .line_to(60.0, -10.0)
            .close(),
        // Main wing
        Path::new()
            .move_to(40.0, 0.0)
            .line_to(80.0, 40.0)
            .line_to(70.0, 50.0)
            .line_to(30.0, 10.0)
            .close(),
        // Tail fin
        Path::new()
            .move_to(-10.0, 0.0)
            .line_to(-30.0, -20.0)
            .line_to(-30.0, 0.0)
            .close(),
        // Horizontal stabilizer
        Path::new()
            .move_to(-20.0, 0.0)
            .line_to(-40.0, 5.0)
            .line_to(-40.0, -5.0)
            .line_to(-20.0, 0.0)
            .close(),
    ]
}

/// Append the glyph's commands in glyph units.
pub fn push_aeroplane(out: &mut Vec<DrawCommand>) {
    for path in body_parts() {
        out.push(DrawCommand::FillPath {
            path: path.clone(),
            color: BODY,
            shadow: Some(GLOW),
        });
        out.push(DrawCommand::StrokePath {
            path,
            color: OUTLINE,
            width: 1.0,
            shadow: Some(GLOW),
        });
    }

    // Propeller
    out.push(DrawCommand::FillRect {
        origin: Point2::new(120.0, -15.0),
        width: 10.0,
        height: 30.0,
        color: BODY,
    });
    out.push(DrawCommand::FillRect {
        origin: Point2::new(110.0, -5.0),
        width: 30.0,
        height: 10.0,
        color: BODY,
    });

    out.push(DrawCommand::Text {
        text: "X".to_string(),
        position: Point2::new(60.0, 5.0),
        size_px: 20.0,
        color: MARKING,
        align: TextAlign::Center,
    });
}
