//! Pointer-proximity organizer.
//!
//! Every visible shape carries a progress scalar (0 = chaos, 1 = order).
//! While the pointer is near a shape's chaos position its progress is pulled
//! up quickly; once the pointer moves away it drifts back slowly, but never
//! below a "memory" floor derived from the closest approach so far. When
//! enough shapes are organized the whole set snaps to 1 and stays there.
//!
//! Input handlers only record the pointer and make sure a frame is
//! requested; all simulation math runs in [`ProximityOrganizer::tick`].

use crate::config::ProximityConfig;
use crate::frame::{FrameId, FrameQueue, FrameScheduler};
use crate::progress::ProgressSet;
use crate::shapes::{ContainerSize, Point, Shape};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Progress above which a shape counts as organized.
pub const ORGANIZED_THRESHOLD: f32 = 0.7;

/// Steps at or below this size are not written back (and do not keep the
/// loop alive).
pub const MOVEMENT_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum Phase {
    /// No frame scheduled.
    Idle,
    /// A frame is scheduled or being processed.
    Running,
    /// Terminal: every shape pinned at 1.
    Complete,
}

/// Last known pointer position in container-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pointer {
    #[default]
    Absent,
    At(Point),
}

impl Pointer {
    pub fn is_active(&self) -> bool {
        matches!(self, Pointer::At(_))
    }

    pub fn position(&self) -> Option<Point> {
        match *self {
            Pointer::At(p) => Some(p),
            Pointer::Absent => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Another frame was requested.
    Continue,
    /// Nothing moved and no pointer is active; the loop went idle.
    Settled,
    /// Auto-complete fired on this tick.
    Completed,
    /// The organizer was already complete; nothing happened.
    Inert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    /// Shapes whose stored progress changed this tick.
    pub moved: usize,
    /// Shapes above [`ORGANIZED_THRESHOLD`] after this tick.
    pub organized: usize,
}

pub struct ProximityOrganizer<S: FrameScheduler = FrameQueue> {
    shapes: Vec<Shape>,
    config: ProximityConfig,
    progress: ProgressSet,
    memory: Vec<f32>,
    pointer: Pointer,
    container: ContainerSize,
    phase: Phase,
    pending: Option<FrameId>,
    ticks: u64,
    scheduler: S,
}

impl ProximityOrganizer<FrameQueue> {
    /// Organizer backed by its own [`FrameQueue`].
    pub fn with_queue(shapes: Vec<Shape>, config: ProximityConfig) -> Self {
        Self::new(shapes, config, FrameQueue::new())
    }
}

impl<S: FrameScheduler> ProximityOrganizer<S> {
    pub fn new(shapes: Vec<Shape>, config: ProximityConfig, scheduler: S) -> Self {
        let n = shapes.len();
        Self {
            shapes,
            config,
            progress: ProgressSet::new(n),
            memory: vec![0.0; n],
            pointer: Pointer::Absent,
            container: ContainerSize::default(),
            phase: Phase::Idle,
            pending: None,
            ticks: 0,
            scheduler,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn progress(&self) -> &ProgressSet {
        &self.progress
    }

    /// Indices whose progress was written since the last call.
    pub fn drain_dirty(&mut self) -> Vec<usize> {
        self.progress.drain_dirty()
    }

    pub fn memory(&self, i: usize) -> f32 {
        self.memory.get(i).copied().unwrap_or(0.0)
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn container(&self) -> ContainerSize {
        self.container
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Latest measured container size (owned by the host's resize observer).
    pub fn set_container(&mut self, size: ContainerSize) {
        self.container = size;
    }

    /// Flag every shape as changed so subscribers re-read all of them.
    pub fn invalidate(&mut self) {
        self.progress.touch_all();
    }

    pub fn pointer_move(&mut self, pos: Point) {
        if self.is_complete() {
            return;
        }
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return;
        }
        self.pointer = Pointer::At(pos);
        self.ensure_running();
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = Pointer::Absent;
        // Keep ticking so shapes can drift back to their memory floor.
        self.ensure_running();
    }

    /// Follows the first touch point; an empty list is ignored.
    pub fn touch_move(&mut self, touches: &[Point]) {
        let Some(&first) = touches.first() else {
            return;
        };
        self.pointer_move(first);
    }

    pub fn touch_end(&mut self) {
        self.pointer_leave();
    }

    /// Jump straight to the organized state ("tap to organize").
    pub fn force_complete(&mut self) {
        if self.is_complete() {
            return;
        }
        self.complete();
    }

    /// Deliver a frame previously requested from the scheduler. Frames that
    /// are not the current pending one are ignored.
    pub fn on_frame(&mut self, id: FrameId) -> Option<TickReport> {
        if self.pending != Some(id) {
            return None;
        }
        self.pending = None;
        Some(self.tick())
    }

    /// Advance the simulation by one display frame. Any frame still
    /// scheduled is consumed; a new one is requested only on `Continue`.
    pub fn tick(&mut self) -> TickReport {
        self.cancel_pending();
        if self.is_complete() {
            return TickReport {
                outcome: TickOutcome::Inert,
                moved: 0,
                organized: self.shapes.len(),
            };
        }
        self.ticks += 1;

        let mut moved = 0usize;
        let mut organized = 0usize;

        if self.container.is_ready() {
            let ProximityConfig {
                influence_radius,
                organize_speed,
                decay_speed,
                memory_factor,
                ..
            } = self.config;
            let pointer = self.pointer.position();

            for (i, shape) in self.shapes.iter().enumerate() {
                let current = self.progress.get(i);
                let origin = shape.chaos_px(self.container);

                let dist = pointer.map_or(f32::INFINITY, |p| p.distance(origin));
                let target = if dist < influence_radius {
                    let proximity = 1.0 - dist / influence_radius;
                    // Quadratic ease-out.
                    let eased = proximity * (2.0 - proximity);
                    self.memory[i] = self.memory[i].max(eased * memory_factor);
                    current.max(eased)
                } else {
                    self.memory[i]
                };

                let rate = if target > current {
                    organize_speed
                } else {
                    decay_speed
                };
                let next = (current + (target - current) * rate).clamp(0.0, 1.0);

                if (next - current).abs() > MOVEMENT_EPSILON {
                    self.progress.set(i, next);
                    moved += 1;
                }
                if next > ORGANIZED_THRESHOLD {
                    organized += 1;
                }
            }

            let total = self.shapes.len();
            if organized >= self.config.required_organized(total) {
                self.complete();
                return TickReport {
                    outcome: TickOutcome::Completed,
                    moved,
                    organized,
                };
            }
        } else {
            // Not laid out yet: nothing meaningful to measure against.
            organized = self.progress.iter().filter(|&p| p > ORGANIZED_THRESHOLD).count();
        }

        let outcome = if moved > 0 || self.pointer.is_active() {
            self.phase = Phase::Running;
            if self.pending.is_none() {
                self.pending = Some(self.scheduler.request_frame());
            }
            TickOutcome::Continue
        } else {
            self.phase = Phase::Idle;
            TickOutcome::Settled
        };

        TickReport {
            outcome,
            moved,
            organized,
        }
    }

    /// Swap in a new visible set (breakpoint change). All progress and
    /// memory restart at 0 and any completed state is discarded.
    pub fn reset(&mut self, shapes: Vec<Shape>, config: ProximityConfig) {
        self.cancel_pending();
        let n = shapes.len();
        self.shapes = shapes;
        self.config = config;
        self.progress = ProgressSet::new(n);
        self.progress.touch_all();
        self.memory = vec![0.0; n];
        self.pointer = Pointer::Absent;
        self.phase = Phase::Idle;
        self.ticks = 0;
    }

    fn ensure_running(&mut self) {
        if self.is_complete() {
            return;
        }
        self.phase = Phase::Running;
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    fn complete(&mut self) {
        self.phase = Phase::Complete;
        self.progress.fill(1.0);
        self.memory.fill(1.0);
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
    }
}

impl<S: FrameScheduler> Drop for ProximityOrganizer<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl<S: FrameScheduler> std::fmt::Debug for ProximityOrganizer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximityOrganizer")
            .field("shapes", &self.shapes.len())
            .field("phase", &self.phase)
            .field("pointer", &self.pointer)
            .field("container", &self.container)
            .field("pending", &self.pending)
            .field("ticks", &self.ticks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::frame_noise;
    use crate::shapes::SHAPES;

    const SQUARE: ContainerSize = ContainerSize::new(1000.0, 1000.0);

    /// Shape whose chaos position is (x%, y%) of the container.
    fn shape_at(x: f32, y: f32) -> Shape {
        let mut s = SHAPES[0];
        s.chaos.x = x;
        s.chaos.y = y;
        s
    }

    fn organizer(shapes: Vec<Shape>, config: ProximityConfig) -> ProximityOrganizer {
        let mut o = ProximityOrganizer::with_queue(shapes, config);
        o.set_container(SQUARE);
        o
    }

    fn never_complete() -> ProximityConfig {
        ProximityConfig {
            auto_complete_threshold: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn pointer_on_shape_gives_one_organize_step() {
        // Two shapes so a single organized shape cannot auto-complete.
        let mut o = organizer(vec![shape_at(10.0, 10.0), shape_at(90.0, 90.0)], never_complete());

        o.pointer_move(Point::new(100.0, 100.0));
        let report = o.tick();

        assert_eq!(report.outcome, TickOutcome::Continue);
        assert!((o.progress().get(0) - 0.15).abs() < 1e-6);
        assert!((o.memory(0) - 0.6).abs() < 1e-6);
        assert_eq!(o.progress().get(1), 0.0);
        assert_eq!(o.memory(1), 0.0);
    }

    #[test]
    fn after_leaving_progress_climbs_to_memory_floor() {
        let mut o = organizer(vec![shape_at(10.0, 10.0), shape_at(90.0, 90.0)], never_complete());
        o.pointer_move(Point::new(100.0, 100.0));
        o.tick();
        o.pointer_leave();

        // Target is the 0.6 floor, above 0.15, so it approaches at organize speed.
        o.tick();
        let expected = 0.15 + (0.6 - 0.15) * 0.15;
        assert!((o.progress().get(0) - expected).abs() < 1e-6);

        let mut last = TickOutcome::Continue;
        for _ in 0..500 {
            last = o.tick().outcome;
            if last == TickOutcome::Settled {
                break;
            }
        }
        assert_eq!(last, TickOutcome::Settled);
        assert_eq!(o.phase(), Phase::Idle);
        let p = o.progress().get(0);
        assert!(p <= 0.6 + 1e-6 && p > 0.59, "settled at {p}");
    }

    #[test]
    fn decay_stops_at_memory_floor_not_zero() {
        let mut o = organizer(vec![shape_at(10.0, 10.0), shape_at(90.0, 90.0)], never_complete());
        o.pointer_move(Point::new(100.0, 100.0));
        for _ in 0..60 {
            o.tick();
        }
        let peak = o.progress().get(0);
        assert!(peak > 0.9);
        let floor = o.memory(0);
        assert!((floor - 0.6).abs() < 1e-6);

        o.pointer_leave();
        for _ in 0..2_000 {
            if o.tick().outcome == TickOutcome::Settled {
                break;
            }
        }
        let p = o.progress().get(0);
        assert!(p < peak);
        assert!(p >= floor - 1e-6, "fell through floor: {p}");
        // The loop stops once a decay step would be below the write epsilon.
        assert!(p - floor <= MOVEMENT_EPSILON / 0.02 + 1e-4, "did not converge: {p}");
        assert_eq!(o.phase(), Phase::Idle);
    }

    #[test]
    fn memory_never_decreases_and_progress_stays_in_range() {
        let shapes: Vec<Shape> = SHAPES.to_vec();
        let mut o = organizer(shapes, never_complete());
        let mut prev_memory = vec![0.0f32; o.shapes().len()];

        for frame in 0..400u64 {
            // Wild pointer: far outside, negative, and inside the container.
            let scale = if frame % 7 == 0 { 1.0e6 } else { 1400.0 };
            let x = (frame_noise(frame, 0) - 0.2) * scale;
            let y = (frame_noise(frame, 1) - 0.2) * scale;
            if frame % 11 == 0 {
                o.pointer_leave();
            } else {
                o.pointer_move(Point::new(x, y));
            }
            o.tick();

            for (i, prev) in prev_memory.iter_mut().enumerate() {
                let p = o.progress().get(i);
                assert!(p.is_finite() && (0.0..=1.0).contains(&p));
                let m = o.memory(i);
                assert!(m >= *prev, "memory dropped for shape {i}");
                *prev = m;
            }
        }
    }

    /// Ten shapes spread out; the first `organized` are pinned above 0.7 by
    /// giving them a matching memory floor.
    fn pinned(organized: usize) -> ProximityOrganizer {
        let shapes: Vec<Shape> = (0..10).map(|i| shape_at(5.0 + 9.0 * i as f32, 50.0)).collect();
        let mut o = organizer(shapes, ProximityConfig::default());
        for i in 0..organized {
            o.progress.set(i, 0.9);
            o.memory[i] = 0.9;
        }
        o
    }

    #[test]
    fn auto_complete_needs_ceil_of_threshold() {
        // 10 × 0.65 = 6.5, so 7 organized shapes are required.
        let mut o = pinned(6);
        let report = o.tick();
        assert_eq!(report.organized, 6);
        assert_ne!(report.outcome, TickOutcome::Completed);
        assert!(!o.is_complete());

        let mut o = pinned(7);
        let report = o.tick();
        assert_eq!(report.outcome, TickOutcome::Completed);
        assert!(o.is_complete());
        assert!(o.progress().iter().all(|p| p == 1.0));
        assert!((0..10).all(|i| o.memory(i) == 1.0));
    }

    #[test]
    fn empty_set_completes_on_first_tick() {
        let mut o = organizer(Vec::new(), ProximityConfig::default());
        assert_eq!(o.config().required_organized(0), 0);
        o.pointer_move(Point::new(10.0, 10.0));
        let report = o.tick();
        assert_eq!(report.outcome, TickOutcome::Completed);
        assert!(o.is_complete());
        assert!(o.pending_frame().is_none());
        assert!(!o.scheduler().is_pending());
    }

    #[test]
    fn exactly_threshold_progress_is_not_organized() {
        let mut o = pinned(0);
        for i in 0..10 {
            o.progress.set(i, ORGANIZED_THRESHOLD);
            o.memory[i] = ORGANIZED_THRESHOLD;
        }
        let report = o.tick();
        assert_eq!(report.organized, 0);
        assert!(!o.is_complete());
    }

    #[test]
    fn complete_is_terminal() {
        let mut o = organizer(SHAPES.to_vec(), ProximityConfig::default());
        o.pointer_move(Point::new(10.0, 10.0));
        assert!(o.pending_frame().is_some());

        o.force_complete();
        assert!(o.is_complete());
        assert!(o.pending_frame().is_none());
        assert!(!o.scheduler().is_pending());

        o.pointer_move(Point::new(500.0, 500.0));
        o.touch_move(&[Point::new(1.0, 1.0)]);
        o.pointer_leave();
        o.force_complete();
        assert_eq!(o.tick().outcome, TickOutcome::Inert);

        assert!(o.is_complete());
        assert!(o.pending_frame().is_none());
        assert!(o.progress().iter().all(|p| p == 1.0));
    }

    #[test]
    fn loop_requests_one_frame_at_a_time() {
        let mut o = organizer(vec![shape_at(10.0, 10.0), shape_at(90.0, 90.0)], never_complete());
        o.pointer_move(Point::new(100.0, 100.0));
        o.pointer_move(Point::new(101.0, 100.0));
        assert_eq!(o.scheduler().requested(), 1);

        let id = o.scheduler_mut().take_due().unwrap();
        let report = o.on_frame(id).unwrap();
        assert_eq!(report.outcome, TickOutcome::Continue);
        assert_eq!(o.scheduler().requested(), 2);

        // Replaying a stale frame does nothing.
        assert!(o.on_frame(id).is_none());
    }

    #[test]
    fn settles_when_nothing_moves_and_pointer_gone() {
        let mut o = organizer(vec![shape_at(10.0, 10.0)], never_complete());
        o.pointer_leave();
        assert_eq!(o.phase(), Phase::Running);
        let id = o.scheduler_mut().take_due().unwrap();
        let report = o.on_frame(id).unwrap();
        assert_eq!(report.outcome, TickOutcome::Settled);
        assert_eq!(o.phase(), Phase::Idle);
        assert!(!o.scheduler().is_pending());
    }

    #[test]
    fn direct_tick_consumes_scheduled_frame() {
        let mut o = organizer(vec![shape_at(10.0, 10.0)], never_complete());
        o.pointer_leave();
        assert!(o.pending_frame().is_some());

        let report = o.tick();
        assert_eq!(report.outcome, TickOutcome::Settled);
        assert_eq!(o.phase(), Phase::Idle);
        assert!(o.pending_frame().is_none());
        assert!(!o.scheduler().is_pending());

        // While the pointer is active a direct tick swaps in a fresh frame.
        o.pointer_move(Point::new(100.0, 100.0));
        let first = o.pending_frame();
        assert_eq!(o.tick().outcome, TickOutcome::Continue);
        let second = o.pending_frame();
        assert!(second.is_some() && second != first);
        assert_eq!(o.scheduler().pending(), second);
    }

    #[test]
    fn idle_never_has_a_frame_scheduled() {
        let mut o = organizer(SHAPES[..6].to_vec(), never_complete());
        for frame in 0..300u64 {
            match frame % 5 {
                0 => o.pointer_leave(),
                1 => o.touch_end(),
                _ => o.pointer_move(Point::new(frame_noise(frame, 0) * 1000.0, frame_noise(frame, 1) * 1000.0)),
            }
            if frame % 3 == 0 {
                o.tick();
            } else if let Some(id) = o.scheduler_mut().take_due() {
                o.on_frame(id);
            }
            if o.phase() == Phase::Idle {
                assert!(o.pending_frame().is_none(), "idle with a frame at {frame}");
                assert!(!o.scheduler().is_pending());
            }
        }
    }

    #[test]
    fn zero_sized_container_skips_proximity() {
        let mut o = ProximityOrganizer::with_queue(vec![shape_at(0.0, 0.0)], never_complete());
        o.pointer_move(Point::new(0.0, 0.0));
        let report = o.tick();
        assert_eq!(report.moved, 0);
        assert_eq!(report.outcome, TickOutcome::Continue);
        assert_eq!(o.progress().get(0), 0.0);
        assert_eq!(o.memory(0), 0.0);

        o.pointer_leave();
        assert_eq!(o.tick().outcome, TickOutcome::Settled);
    }

    #[test]
    fn empty_touch_list_is_a_no_op() {
        let mut o = organizer(vec![shape_at(10.0, 10.0)], never_complete());
        o.touch_move(&[]);
        assert_eq!(o.phase(), Phase::Idle);
        assert!(o.pending_frame().is_none());
        assert_eq!(o.pointer(), Pointer::Absent);

        o.touch_move(&[Point::new(100.0, 100.0), Point::new(900.0, 900.0)]);
        assert_eq!(o.pointer(), Pointer::At(Point::new(100.0, 100.0)));
        o.touch_end();
        assert_eq!(o.pointer(), Pointer::Absent);
    }

    #[test]
    fn non_finite_pointer_is_ignored() {
        let mut o = organizer(vec![shape_at(10.0, 10.0)], never_complete());
        o.pointer_move(Point::new(f32::NAN, 3.0));
        assert_eq!(o.pointer(), Pointer::Absent);
        assert!(o.pending_frame().is_none());
    }

    #[test]
    fn reset_clears_progress_memory_and_completion() {
        let mut o = organizer(SHAPES.to_vec(), ProximityConfig::default());
        o.pointer_move(Point::new(120.0, 150.0));
        for _ in 0..10 {
            o.tick();
        }
        o.force_complete();

        let mobile: Vec<Shape> = SHAPES.iter().copied().filter(|s| s.mobile_visible).collect();
        o.reset(mobile, ProximityConfig::default().with_influence_radius(150.0));

        assert_eq!(o.shapes().len(), 10);
        assert_eq!(o.phase(), Phase::Idle);
        assert!(o.progress().iter().all(|p| p == 0.0));
        assert!((0..10).all(|i| o.memory(i) == 0.0));
        assert_eq!(o.config().influence_radius, 150.0);
    }

    #[test]
    fn drop_cancels_pending_frame() {
        let mut queue = FrameQueue::new();
        {
            let mut o = ProximityOrganizer::new(vec![shape_at(10.0, 10.0)], never_complete(), &mut queue);
            o.set_container(SQUARE);
            o.pointer_move(Point::new(5.0, 5.0));
            assert!(o.scheduler().is_pending());
        }
        assert!(!queue.is_pending());
        assert_eq!(queue.cancelled(), 1);
    }

    #[test]
    fn sweeping_the_pointer_eventually_completes() {
        let mut o = organizer(SHAPES.to_vec(), ProximityConfig::default());
        let mut completed = false;
        'outer: for _ in 0..20 {
            for s in SHAPES.iter() {
                let p = s.chaos_px(SQUARE);
                o.pointer_move(p);
                for _ in 0..5 {
                    if o.tick().outcome == TickOutcome::Completed {
                        completed = true;
                        break 'outer;
                    }
                }
            }
        }
        assert!(completed);
        assert!(o.progress().iter().all(|p| p == 1.0));
    }
}
