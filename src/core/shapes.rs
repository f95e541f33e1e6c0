//! Static shape registry for the hero workspace.
//!
//! Positions are percentages (0–100) of the workspace container. Both the
//! chaos and the order position live in the same coordinate space; pixel
//! positions are re-derived from the container size on every frame.
//!
//! The table is fixed data: no randomness, so every host renders the same
//! scatter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum ShapeKind {
    Rect,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum ShapeSize {
    Lg,
    Md,
    Sm,
    Circle,
}

/// Colour token; resolved to concrete colours by the host's theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "kebab-case"))]
pub enum ShapeColor {
    Elevated,
    AccentMuted,
    ChaosMuted,
    AccentSecondaryMuted,
    AccentSolid,
    ChaosSolid,
    OrderSolid,
    FgTertiary,
}

/// Scattered placement: percent of container plus rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ChaosPos {
    pub x: f32,
    pub y: f32,
    pub rotate: f32,
}

/// Aligned placement: percent of container.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OrderPos {
    pub x: f32,
    pub y: f32,
}

/// Pixel position inside the workspace container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Measured container size in pixels. Zero means "not laid out yet".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True once both dimensions are positive and finite.
    pub fn is_ready(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    fn percent_to_px(&self, x: f32, y: f32) -> Point {
        Point {
            x: x / 100.0 * self.width,
            y: y / 100.0 * self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Shape {
    pub id: &'static str,
    pub kind: ShapeKind,
    pub size: ShapeSize,
    pub color: ShapeColor,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    pub chaos: ChaosPos,
    pub order: OrderPos,
    pub z_index: i32,
    /// Idle jitter speed multiplier (higher = faster).
    pub jitter_speed: f32,
    pub mobile_visible: bool,
    pub tablet_visible: bool,
}

impl Shape {
    /// Top-left of the shape in its chaos placement.
    pub fn chaos_px(&self, container: ContainerSize) -> Point {
        container.percent_to_px(self.chaos.x, self.chaos.y)
    }

    /// Top-left of the shape in its order placement.
    pub fn order_px(&self, container: ContainerSize) -> Point {
        container.percent_to_px(self.order.x, self.order.y)
    }

    pub fn half_size(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_circle(&self) -> bool {
        self.kind == ShapeKind::Circle
    }
}

#[allow(clippy::too_many_arguments)]
const fn shape(
    id: &'static str,
    kind: ShapeKind,
    size: ShapeSize,
    color: ShapeColor,
    (width, height): (f32, f32),
    chaos: (f32, f32, f32),
    order: (f32, f32),
    z_index: i32,
    jitter_speed: f32,
    (mobile_visible, tablet_visible): (bool, bool),
) -> Shape {
    Shape {
        id,
        kind,
        size,
        color,
        width,
        height,
        chaos: ChaosPos {
            x: chaos.0,
            y: chaos.1,
            rotate: chaos.2,
        },
        order: OrderPos {
            x: order.0,
            y: order.1,
        },
        z_index,
        jitter_speed,
        mobile_visible,
        tablet_visible,
    }
}

use ShapeColor::*;
use ShapeKind::{Circle as C, Rect as R};

const LG: (f32, f32) = (80.0, 60.0);
const MD: (f32, f32) = (50.0, 35.0);
const SM: (f32, f32) = (30.0, 20.0);
const DOT: (f32, f32) = (16.0, 16.0);

/// Desktop: all 18, tablet: 15, mobile: 10.
#[rustfmt::skip]
pub static SHAPES: [Shape; 18] = [
    // Large blocks
    shape("lg-1", R, ShapeSize::Lg, Elevated, LG, (12.0, 15.0, -8.0), (10.0, 20.0), 3, 1.2, (true, true)),
    shape("lg-2", R, ShapeSize::Lg, Elevated, LG, (65.0, 25.0, 12.0), (40.0, 20.0), 2, 0.9, (true, true)),
    shape("lg-3", R, ShapeSize::Lg, Elevated, LG, (38.0, 70.0, -5.0), (70.0, 20.0), 4, 1.1, (true, true)),
    shape("lg-4", R, ShapeSize::Lg, Elevated, LG, (80.0, 60.0, 7.0), (25.0, 55.0), 1, 1.3, (false, true)),
    // Medium blocks
    shape("md-1", R, ShapeSize::Md, AccentMuted, MD, (25.0, 45.0, 14.0), (14.0, 42.0), 5, 1.4, (true, true)),
    shape("md-2", R, ShapeSize::Md, AccentSecondaryMuted, MD, (55.0, 10.0, -11.0), (44.0, 42.0), 6, 1.0, (true, true)),
    shape("md-3", R, ShapeSize::Md, AccentMuted, MD, (8.0, 65.0, 6.0), (74.0, 42.0), 3, 1.5, (true, true)),
    shape("md-4", R, ShapeSize::Md, AccentSecondaryMuted, MD, (75.0, 40.0, -9.0), (55.0, 55.0), 4, 0.8, (false, true)),
    shape("md-5", R, ShapeSize::Md, AccentMuted, MD, (45.0, 85.0, 10.0), (75.0, 55.0), 5, 1.2, (false, false)),
    shape("md-6", R, ShapeSize::Md, AccentSecondaryMuted, MD, (20.0, 80.0, -7.0), (14.0, 70.0), 2, 1.1, (false, false)),
    // Small blocks
    shape("sm-1", R, ShapeSize::Sm, ChaosMuted, SM, (50.0, 55.0, -15.0), (20.0, 85.0), 7, 1.6, (true, true)),
    shape("sm-2", R, ShapeSize::Sm, AccentMuted, SM, (30.0, 30.0, 13.0), (40.0, 85.0), 8, 1.3, (true, true)),
    shape("sm-3", R, ShapeSize::Sm, ChaosMuted, SM, (85.0, 15.0, -10.0), (60.0, 85.0), 6, 1.4, (false, true)),
    shape("sm-4", R, ShapeSize::Sm, AccentMuted, SM, (70.0, 75.0, 8.0), (80.0, 85.0), 5, 1.5, (false, true)),
    // Circles
    shape("circle-1", C, ShapeSize::Circle, AccentSolid, DOT, (42.0, 20.0, 0.0), (30.0, 36.0), 9, 2.0, (true, true)),
    shape("circle-2", C, ShapeSize::Circle, ChaosSolid, DOT, (18.0, 42.0, 0.0), (60.0, 36.0), 10, 1.8, (true, true)),
    shape("circle-3", C, ShapeSize::Circle, OrderSolid, DOT, (72.0, 50.0, 0.0), (50.0, 72.0), 9, 1.9, (false, true)),
    shape("circle-4", C, ShapeSize::Circle, FgTertiary, DOT, (60.0, 68.0, 0.0), (80.0, 72.0), 8, 2.1, (false, false)),
];
