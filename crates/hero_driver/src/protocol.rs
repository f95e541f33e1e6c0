//! Newline-delimited JSON protocol: input events on stdin, frames on stdout.

use chaos_order::breakpoint::Breakpoint;
use chaos_order::observer::SceneSnapshot;
use chaos_order::scene::SceneUpdate;
use chaos_order::shapes::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer position in container-local pixels.
    PointerMove { x: f32, y: f32 },
    PointerLeave,
    /// Active touch points; only the first one steers.
    TouchMove { touches: Vec<Point> },
    TouchEnd,
    ForceComplete,
    /// Workspace container was measured.
    Resize { width: f32, height: f32 },
    /// Viewport width changed.
    Viewport { width: u32 },
    ReducedMotion { enabled: bool },
    /// Ask for an observer snapshot.
    Snapshot,
    Shutdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameOut {
    pub seq: u64,
    pub breakpoint: Breakpoint,
    #[serde(flatten)]
    pub update: SceneUpdate,
    /// Show the "tap to organize" hint.
    pub tap_hint: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter: Option<Vec<Point>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Output {
    Frame(FrameOut),
    Snapshot(SceneSnapshot),
    Error { message: String },
}
