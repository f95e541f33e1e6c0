//! Retained hero scene.
//!
//! Owns the organizer for the current breakpoint plus a cache of the last
//! projection for every shape, slot and line. [`HeroScene::update`] only
//! recomputes entries whose progress changed since the previous call, so a
//! frame where one shape moves costs one shape (plus its lines), not the
//! whole workspace.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::breakpoint::{Breakpoint, BreakpointConfigs};
use crate::connections::{visible_connections, VisibleConnection, CONNECTIONS};
use crate::frame::{FrameId, FrameQueue, FrameScheduler};
use crate::jitter::jitter_offset;
use crate::projection::{
    project_line, project_shape, project_slot, LineGeometry, ShapeTransform, SlotAppearance,
};
use crate::proximity::{ProximityOrganizer, TickReport};
use crate::shapes::{ContainerSize, Point};

/// Seconds a touch visitor waits before the "tap to organize" hint shows.
pub const TAP_HINT_DELAY_S: f32 = 1.5;

/// One recomputed entry of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Changed<T> {
    pub index: usize,
    pub id: &'static str,
    pub value: T,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SceneUpdate {
    pub shapes: Vec<Changed<ShapeTransform>>,
    pub slots: Vec<Changed<SlotAppearance>>,
    pub lines: Vec<Changed<LineGeometry>>,
    pub complete: bool,
}

impl SceneUpdate {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.slots.is_empty() && self.lines.is_empty()
    }
}

pub struct HeroScene<S: FrameScheduler = FrameQueue> {
    breakpoint: Breakpoint,
    configs: BreakpointConfigs,
    organizer: ProximityOrganizer<S>,
    lines: Vec<VisibleConnection>,
    reduced_motion: bool,
    touch_device: bool,
    shape_cache: Vec<ShapeTransform>,
    slot_cache: Vec<SlotAppearance>,
    line_cache: Vec<LineGeometry>,
}

impl HeroScene<FrameQueue> {
    pub fn with_queue(viewport_width: u32, configs: BreakpointConfigs) -> Self {
        Self::new(viewport_width, configs, FrameQueue::new())
    }
}

impl<S: FrameScheduler> HeroScene<S> {
    pub fn new(viewport_width: u32, configs: BreakpointConfigs, scheduler: S) -> Self {
        let breakpoint = Breakpoint::from_viewport_width(viewport_width);
        let shapes = breakpoint.visible_shapes();
        let lines = visible_connections(&CONNECTIONS, &shapes);
        let mut organizer = ProximityOrganizer::new(shapes, configs.get(breakpoint), scheduler);
        organizer.invalidate();

        let mut scene = Self {
            breakpoint,
            configs,
            organizer,
            lines,
            reduced_motion: false,
            touch_device: false,
            shape_cache: Vec::new(),
            slot_cache: Vec::new(),
            line_cache: Vec::new(),
        };
        scene.resize_caches();
        scene
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn organizer(&self) -> &ProximityOrganizer<S> {
        &self.organizer
    }

    pub fn organizer_mut(&mut self) -> &mut ProximityOrganizer<S> {
        &mut self.organizer
    }

    pub fn lines(&self) -> &[VisibleConnection] {
        &self.lines
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn touch_device(&self) -> bool {
        self.touch_device
    }

    /// Host reports whether the device has a touch screen.
    pub fn set_touch_device(&mut self, touch: bool) {
        self.touch_device = touch;
    }

    /// Whether the "tap to organize" hint is up, `elapsed_s` seconds after
    /// the scene was shown. Touch devices only, never once complete.
    pub fn tap_hint_visible(&self, elapsed_s: f32) -> bool {
        self.touch_device && !self.is_complete() && elapsed_s >= TAP_HINT_DELAY_S
    }

    /// Complete as presented: either the organizer finished or reduced
    /// motion bypasses it.
    pub fn is_complete(&self) -> bool {
        self.reduced_motion || self.organizer.is_complete()
    }

    /// Reclassify the viewport. Returns true when the breakpoint changed and
    /// the simulation was restarted for the new shape set.
    pub fn set_viewport_width(&mut self, width: u32) -> bool {
        let bp = Breakpoint::from_viewport_width(width);
        if bp == self.breakpoint {
            return false;
        }
        self.breakpoint = bp;
        let shapes = bp.visible_shapes();
        self.lines = visible_connections(&CONNECTIONS, &shapes);
        self.organizer.reset(shapes, self.configs.get(bp));
        self.resize_caches();
        true
    }

    pub fn resize(&mut self, container: ContainerSize) {
        if self.organizer.container() == container {
            return;
        }
        self.organizer.set_container(container);
        self.organizer.invalidate();
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        if self.reduced_motion == enabled {
            return;
        }
        self.reduced_motion = enabled;
        self.organizer.invalidate();
    }

    pub fn pointer_move(&mut self, pos: Point) {
        if !self.reduced_motion {
            self.organizer.pointer_move(pos);
        }
    }

    pub fn pointer_leave(&mut self) {
        if !self.reduced_motion {
            self.organizer.pointer_leave();
        }
    }

    pub fn touch_move(&mut self, touches: &[Point]) {
        if !self.reduced_motion {
            self.organizer.touch_move(touches);
        }
    }

    pub fn touch_end(&mut self) {
        if !self.reduced_motion {
            self.organizer.touch_end();
        }
    }

    pub fn force_complete(&mut self) {
        self.organizer.force_complete();
    }

    pub fn on_frame(&mut self, id: FrameId) -> Option<TickReport> {
        self.organizer.on_frame(id)
    }

    /// Progress as presented (pinned at 1 under reduced motion).
    pub fn presented_progress(&self, i: usize) -> f32 {
        if self.reduced_motion {
            1.0
        } else {
            self.organizer.progress().get(i)
        }
    }

    pub fn shape_transforms(&self) -> &[ShapeTransform] {
        &self.shape_cache
    }

    pub fn slot_appearances(&self) -> &[SlotAppearance] {
        &self.slot_cache
    }

    pub fn line_geometries(&self) -> &[LineGeometry] {
        &self.line_cache
    }

    /// Idle wobble per visible shape; all zero once complete.
    pub fn jitter_offsets(&self, elapsed_s: f32) -> Vec<Point> {
        let complete = self.is_complete();
        self.organizer
            .shapes()
            .iter()
            .map(|s| jitter_offset(s, elapsed_s, complete))
            .collect()
    }

    /// Recompute projections for everything that changed since the last
    /// call. Returns nothing while the container has no size.
    pub fn update(&mut self) -> SceneUpdate {
        let dirty = self.organizer.drain_dirty();
        let container = self.organizer.container();
        let mut out = SceneUpdate {
            complete: self.is_complete(),
            ..Default::default()
        };
        if dirty.is_empty() || !container.is_ready() {
            return out;
        }

        let mut touched = vec![false; self.shape_cache.len()];
        for &i in &dirty {
            let Some(shape) = self.organizer.shapes().get(i).copied() else {
                continue;
            };
            let p = self.presented_progress(i);
            let t = project_shape(&shape, p, container);
            let s = project_slot(&shape, p, container);
            self.shape_cache[i] = t;
            self.slot_cache[i] = s;
            touched[i] = true;
            out.shapes.push(Changed {
                index: i,
                id: shape.id,
                value: t,
            });
            out.slots.push(Changed {
                index: i,
                id: shape.id,
                value: s,
            });
        }

        for (k, line) in self.lines.iter().enumerate() {
            if !(touched[line.from_idx] || touched[line.to_idx]) {
                continue;
            }
            let g = project_line(
                line,
                self.presented_progress(line.from_idx),
                self.presented_progress(line.to_idx),
                container,
            );
            self.line_cache[k] = g;
            out.lines.push(Changed {
                index: k,
                id: line.connection.id,
                value: g,
            });
        }

        out
    }

    fn resize_caches(&mut self) {
        let container = self.organizer.container();
        let shapes = self.organizer.shapes();
        self.shape_cache = shapes
            .iter()
            .map(|s| project_shape(s, 0.0, container))
            .collect();
        self.slot_cache = shapes
            .iter()
            .map(|s| project_slot(s, 0.0, container))
            .collect();
        self.line_cache = self
            .lines
            .iter()
            .map(|l| project_line(l, 0.0, 0.0, container))
            .collect();
    }
}
