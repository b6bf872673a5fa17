//! Draw command list
//!
//! Backend-neutral drawing primitives produced by the renderer. A canvas
//! backend maps them one-to-one onto 2D context calls; tests inspect them
//! directly.

use aviator_shared::Point2;
use smallvec::SmallVec;

use crate::surface::SurfaceSize;

/// RGBA colour with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// One segment of a path, in the current transform's units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point2),
    LineTo(Point2),
    /// Quadratic Bezier: control point, end point.
    QuadTo(Point2, Point2),
    /// Cubic Bezier: two control points, end point.
    CubicTo(Point2, Point2, Point2),
    Close,
}

/// A path built from segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: SmallVec<[PathSegment; 8]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::MoveTo(Point2::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::LineTo(Point2::new(x, y)));
        self
    }

    pub fn quad_to(mut self, control: Point2, end: Point2) -> Self {
        self.segments.push(PathSegment::QuadTo(control, end));
        self
    }

    pub fn cubic_to(mut self, c1: (f64, f64), c2: (f64, f64), end: (f64, f64)) -> Self {
        self.segments
            .push(PathSegment::CubicTo(c1.into(), c2.into(), end.into()));
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Every explicit point in the path (end points and control points).
    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.segments.iter().flat_map(|seg| {
            let pts: SmallVec<[Point2; 3]> = match *seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => SmallVec::from_slice(&[p]),
                PathSegment::QuadTo(c, p) => SmallVec::from_slice(&[c, p]),
                PathSegment::CubicTo(c1, c2, p) => SmallVec::from_slice(&[c1, c2, p]),
                PathSegment::Close => SmallVec::new(),
            };
            pts
        })
    }
}

/// Glow applied to a fill or stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f64,
    pub offset: Point2,
}

/// Affine placement for a group of commands.
///
/// Applied as translate, then rotate, then uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Point2,
    /// Rotation in radians (positive is clockwise on a y-down surface).
    pub rotate: f64,
    pub scale: f64,
}

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// A single drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Clear { size: SurfaceSize },
    /// Fill the surface with a two-stop radial gradient.
    RadialGradient {
        center: Point2,
        inner_radius: f64,
        outer_radius: f64,
        inner: Rgba,
        outer: Rgba,
    },
    /// Straight line segment.
    Line {
        from: Point2,
        to: Point2,
        color: Rgba,
        width: f64,
    },
    FillPath {
        path: Path,
        color: Rgba,
        shadow: Option<Shadow>,
    },
    StrokePath {
        path: Path,
        color: Rgba,
        width: f64,
        shadow: Option<Shadow>,
    },
    FillRect {
        origin: Point2,
        width: f64,
        height: f64,
        color: Rgba,
    },
    /// Bold text centred vertically on `position`.
    Text {
        text: String,
        position: Point2,
        size_px: f64,
        color: Rgba,
        align: TextAlign,
    },
    /// Push a transform; applies until the matching `PopTransform`.
    PushTransform(Transform),
    PopTransform,
}
