//! # chaos_order
//!
//! Engine behind the "chaos to order" hero animation: a scatter of blocks
//! that snap into a tidy layout as the pointer sweeps over them.
//!
//! Each shape carries a progress scalar driven by pointer proximity, with a
//! memory floor so progress made is never fully lost. Once enough shapes are
//! organized the whole workspace completes and stays complete.
//!
//! ## Quick Start
//!
//! ```
//! use chaos_order::prelude::*;
//!
//! let mut scene = HeroScene::with_queue(1280, BreakpointConfigs::default());
//! scene.resize(ContainerSize::new(1000.0, 400.0));
//!
//! scene.pointer_move(Point::new(120.0, 60.0));
//! if let Some(frame) = scene.organizer_mut().scheduler_mut().take_due() {
//!     scene.on_frame(frame);
//! }
//!
//! let update = scene.update();
//! assert!(!update.shapes.is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization of config and projection output
//!
//! ## Modules
//!
//! - [`shapes`], [`connections`]: static registries
//! - [`proximity`]: the per-frame simulation
//! - [`projection`]: progress to render values
//! - [`scene`]: retained scene with dirty-only updates
//! - [`observer`]: read-only snapshot adapters

#[path = "core/shapes.rs"]
pub mod shapes;

#[path = "core/connections.rs"]
pub mod connections;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/breakpoint.rs"]
pub mod breakpoint;

#[path = "core/frame.rs"]
pub mod frame;

#[path = "core/progress.rs"]
pub mod progress;

#[path = "core/proximity.rs"]
pub mod proximity;

#[path = "core/projection.rs"]
pub mod projection;

#[path = "core/jitter.rs"]
pub mod jitter;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/scene.rs"]
pub mod scene;

pub mod observer;

/// Prelude module for convenient imports.
///
/// ```
/// use chaos_order::prelude::*;
/// ```
pub mod prelude {
    pub use crate::breakpoint::{Breakpoint, BreakpointConfigs};
    pub use crate::config::ProximityConfig;
    pub use crate::connections::{visible_connections, Connection, VisibleConnection, CONNECTIONS};
    pub use crate::frame::{FrameId, FrameQueue, FrameScheduler};
    pub use crate::projection::{
        project_line, project_shape, project_slot, LineGeometry, Palette, ShapeTransform,
        SlotAppearance,
    };
    pub use crate::proximity::{Phase, Pointer, ProximityOrganizer, TickOutcome, TickReport};
    pub use crate::scene::{Changed, HeroScene, SceneUpdate};
    pub use crate::shapes::{ContainerSize, Point, Shape, SHAPES};
}
