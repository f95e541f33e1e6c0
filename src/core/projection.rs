//! Stateless render projection.
//!
//! Maps a progress value (plus the container's pixel size and static shape
//! data) to what a renderer needs to draw: transforms for shapes, ghost
//! "blueprint" slots at the order positions, and bezier connection lines.
//! Nothing here holds simulation state; call it every frame.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::connections::VisibleConnection;
use crate::shapes::{ContainerSize, Point, Shape, ShapeKind, ShapeSize};

/// Piecewise-linear interpolation through `(stops[i], values[i])`, clamped
/// to the end values outside the stop range. `stops` must be ascending and
/// the same length as `values`.
pub fn interpolate(stops: &[f32], values: &[f32], t: f32) -> f32 {
    debug_assert_eq!(stops.len(), values.len());
    let n = stops.len().min(values.len());
    if n == 0 {
        return 0.0;
    }
    if t.is_nan() || t <= stops[0] {
        return values[0];
    }
    if t >= stops[n - 1] {
        return values[n - 1];
    }
    for w in 1..n {
        let (s0, s1) = (stops[w - 1], stops[w]);
        if t <= s1 {
            let span = s1 - s0;
            if span <= 0.0 {
                return values[w];
            }
            let u = (t - s0) / span;
            return values[w - 1] + (values[w] - values[w - 1]) * u;
        }
    }
    values[n - 1]
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// Shape curves.
const SHAPE_OPACITY: ([f32; 2], [f32; 2]) = ([0.0, 1.0], [0.6, 1.0]);
/// Snap pulse: overshoot near 0.95, settle slightly above 1.
const SHAPE_SCALE: ([f32; 4], [f32; 4]) = ([0.0, 0.8, 0.95, 1.0], [1.0, 1.0, 1.05, 1.02]);
/// Border flash toward the accent colour right before arrival.
const SHAPE_BORDER_ACCENT: ([f32; 4], [f32; 4]) = ([0.0, 0.9, 0.95, 1.0], [0.0, 0.0, 1.0, 0.0]);

// Blueprint slot curves.
const SLOT_OPACITY: ([f32; 4], [f32; 4]) = ([0.0, 0.3, 0.8, 1.0], [0.1, 0.1, 0.3, 0.0]);
const SLOT_SCALE: ([f32; 4], [f32; 4]) = ([0.0, 0.9, 0.95, 1.0], [1.0, 1.0, 1.05, 1.0]);

// Connection line curves (driven by the endpoints' average progress).
const LINE_OPACITY: ([f32; 3], [f32; 3]) = ([0.0, 0.3, 1.0], [0.3, 0.4, 0.7]);
const LINE_WARNING: ([f32; 3], [f32; 3]) = ([0.0, 0.6, 1.0], [1.0, 0.0, 0.0]);

pub const PROBLEM_STROKE_WIDTH: f32 = 1.5;
pub const STROKE_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear mix; `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let ch = |a: u8, b: u8| lerp(a as f32, b as f32, t).round().clamp(0.0, 255.0) as u8;
        Rgb {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Concrete colours for the tokens the projection mixes between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub border: Rgb,
    pub border_accent: Rgb,
    pub fg_tertiary: Rgb,
    pub chaos: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        // Dark theme.
        Self {
            border: Rgb::new(0x2a, 0x2a, 0x2e),
            border_accent: Rgb::new(0x7c, 0x8c, 0xff),
            fg_tertiary: Rgb::new(0x6b, 0x6b, 0x75),
            chaos: Rgb::new(0xef, 0x44, 0x44),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ShapeTransform {
    /// Top-left, container pixels.
    pub x: f32,
    pub y: f32,
    /// Degrees.
    pub rotate: f32,
    pub opacity: f32,
    pub scale: f32,
    /// 0 = neutral border, 1 = accent. `None` for circles (no border).
    pub border_accent: Option<f32>,
}

impl ShapeTransform {
    pub fn border_color(&self, palette: &Palette) -> Option<Rgb> {
        self.border_accent
            .map(|t| palette.border.mix(palette.border_accent, t))
    }
}

pub fn project_shape(shape: &Shape, progress: f32, container: ContainerSize) -> ShapeTransform {
    let t = sanitize(progress);
    let pos = shape.chaos_px(container).lerp(shape.order_px(container), t);
    ShapeTransform {
        x: pos.x,
        y: pos.y,
        rotate: lerp(shape.chaos.rotate, 0.0, t),
        opacity: interpolate(&SHAPE_OPACITY.0, &SHAPE_OPACITY.1, t),
        scale: interpolate(&SHAPE_SCALE.0, &SHAPE_SCALE.1, t),
        border_accent: (!shape.is_circle())
            .then(|| interpolate(&SHAPE_BORDER_ACCENT.0, &SHAPE_BORDER_ACCENT.1, t)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum CornerStyle {
    /// Fully rounded (circles).
    Full,
    /// 0.5rem (large blocks).
    Large,
    /// 0.375rem (everything else).
    Medium,
}

impl CornerStyle {
    pub fn for_shape(shape: &Shape) -> Self {
        match (shape.kind, shape.size) {
            (ShapeKind::Circle, _) => CornerStyle::Full,
            (_, ShapeSize::Lg) => CornerStyle::Large,
            _ => CornerStyle::Medium,
        }
    }
}

/// Dashed ghost outline marking where a shape will land.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SlotAppearance {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub opacity: f32,
    pub scale: f32,
    pub corner: CornerStyle,
}

/// Faint at rest, brightening as the shape approaches, gone on arrival.
pub fn project_slot(shape: &Shape, progress: f32, container: ContainerSize) -> SlotAppearance {
    let t = sanitize(progress);
    let pos = shape.order_px(container);
    SlotAppearance {
        x: pos.x,
        y: pos.y,
        width: shape.width,
        height: shape.height,
        opacity: interpolate(&SLOT_OPACITY.0, &SLOT_OPACITY.1, t),
        scale: interpolate(&SLOT_SCALE.0, &SLOT_SCALE.1, t),
        corner: CornerStyle::for_shape(shape),
    }
}

/// Quadratic bezier between two shape centres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LineGeometry {
    pub from: Point,
    pub to: Point,
    pub control: Point,
    pub opacity: f32,
    /// 1 = warning tone, 0 = neutral. Always 0 for non-problem lines.
    pub warning_mix: f32,
    pub stroke_width: f32,
}

impl LineGeometry {
    pub fn svg_path(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.from.x, self.from.y, self.control.x, self.control.y, self.to.x, self.to.y
        )
    }

    pub fn stroke_color(&self, palette: &Palette) -> Rgb {
        palette.fg_tertiary.mix(palette.chaos, self.warning_mix)
    }
}

fn center(shape: &Shape, top_left: Point) -> Point {
    let half = shape.half_size();
    Point::new(top_left.x + half.x, top_left.y + half.y)
}

/// Each endpoint moves with its own shape's progress; the bend and colour
/// follow the average of the two.
pub fn project_line(
    line: &VisibleConnection,
    from_progress: f32,
    to_progress: f32,
    container: ContainerSize,
) -> LineGeometry {
    let fp = sanitize(from_progress);
    let tp = sanitize(to_progress);
    let avg = (fp + tp) / 2.0;

    let a = &line.from_shape;
    let b = &line.to_shape;
    let from = center(a, a.chaos_px(container)).lerp(center(a, a.order_px(container)), fp);
    let to = center(b, b.chaos_px(container)).lerp(center(b, b.order_px(container)), tp);

    let curve = lerp(line.connection.chaos_curve, 0.0, avg);
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = (dx * dx + dy * dy).sqrt();
    let len = if len > 0.0 { len } else { 1.0 };
    let control = Point::new(
        (from.x + to.x) / 2.0 - dy / len * curve,
        (from.y + to.y) / 2.0 + dx / len * curve,
    );

    let is_problem = line.connection.is_problem;
    LineGeometry {
        from,
        to,
        control,
        opacity: interpolate(&LINE_OPACITY.0, &LINE_OPACITY.1, avg),
        warning_mix: if is_problem {
            interpolate(&LINE_WARNING.0, &LINE_WARNING.1, avg)
        } else {
            0.0
        },
        stroke_width: if is_problem {
            PROBLEM_STROKE_WIDTH
        } else {
            STROKE_WIDTH
        },
    }
}

fn sanitize(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}
