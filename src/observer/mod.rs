#[cfg(feature = "serde")]
use serde::Serialize;

use crate::breakpoint::Breakpoint;
use crate::frame::FrameScheduler;
use crate::proximity::{Phase, ProximityOrganizer, ORGANIZED_THRESHOLD};
use crate::scene::HeroScene;

/// A read-only snapshot of where the organizer stands.
///
/// Design intent:
/// - Observers cannot mutate or steer the simulation.
/// - Snapshotting is on-demand and allocates; the frame loop does not.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OrganizerSnapshot {
    pub phase: Phase,
    pub ticks: u64,
    pub pointer_active: bool,
    pub pending_frame: Option<u64>,
    pub organized: usize,
    pub required: usize,
    pub shapes: Vec<ShapeSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ShapeSnapshot {
    pub id: &'static str,
    pub progress: f32,
    pub memory: f32,
}

pub struct OrganizerAdapter<'a, S: FrameScheduler> {
    organizer: &'a ProximityOrganizer<S>,
}

impl<'a, S: FrameScheduler> OrganizerAdapter<'a, S> {
    pub fn new(organizer: &'a ProximityOrganizer<S>) -> Self {
        Self { organizer }
    }

    pub fn snapshot(&self) -> OrganizerSnapshot {
        let o = self.organizer;
        let shapes: Vec<ShapeSnapshot> = o
            .shapes()
            .iter()
            .enumerate()
            .map(|(i, s)| ShapeSnapshot {
                id: s.id,
                progress: o.progress().get(i),
                memory: o.memory(i),
            })
            .collect();

        OrganizerSnapshot {
            phase: o.phase(),
            ticks: o.ticks(),
            pointer_active: o.pointer().is_active(),
            pending_frame: o.pending_frame().map(|f| f.0),
            organized: shapes.iter().filter(|s| s.progress > ORGANIZED_THRESHOLD).count(),
            required: o.config().required_organized(shapes.len()),
            shapes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SceneSnapshot {
    pub breakpoint: Breakpoint,
    pub reduced_motion: bool,
    pub touch_device: bool,
    pub complete: bool,
    pub organizer: OrganizerSnapshot,
}

pub struct SceneAdapter<'a, S: FrameScheduler> {
    scene: &'a HeroScene<S>,
}

impl<'a, S: FrameScheduler> SceneAdapter<'a, S> {
    pub fn new(scene: &'a HeroScene<S>) -> Self {
        Self { scene }
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            breakpoint: self.scene.breakpoint(),
            reduced_motion: self.scene.reduced_motion(),
            touch_device: self.scene.touch_device(),
            complete: self.scene.is_complete(),
            organizer: OrganizerAdapter::new(self.scene.organizer()).snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::BreakpointConfigs;
    use crate::shapes::{ContainerSize, Point};

    #[test]
    fn snapshot_tracks_progress_and_completion() {
        let mut scene = HeroScene::with_queue(800, BreakpointConfigs::default());
        scene.resize(ContainerSize::new(700.0, 400.0));

        let snap = SceneAdapter::new(&scene).snapshot();
        assert_eq!(snap.breakpoint, Breakpoint::Tablet);
        assert_eq!(snap.organizer.shapes.len(), 15);
        assert_eq!(snap.organizer.required, 10);
        assert_eq!(snap.organizer.phase, Phase::Idle);
        assert!(!snap.complete);
        assert!(!snap.touch_device);

        scene.set_touch_device(true);
        assert!(SceneAdapter::new(&scene).snapshot().touch_device);

        scene.pointer_move(Point::new(84.0, 60.0));
        let snap = SceneAdapter::new(&scene).snapshot();
        assert!(snap.organizer.pointer_active);
        assert!(snap.organizer.pending_frame.is_some());

        scene.force_complete();
        let snap = SceneAdapter::new(&scene).snapshot();
        assert!(snap.complete);
        assert_eq!(snap.organizer.phase, Phase::Complete);
        assert_eq!(snap.organizer.organized, 15);
        assert!(snap.organizer.shapes.iter().all(|s| s.progress == 1.0 && s.memory == 1.0));
    }
}
