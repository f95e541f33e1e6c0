//! Scene plus the bookkeeping the frame loop needs, kept free of I/O.

use chaos_order::frame::FrameQueue;
use chaos_order::observer::SceneAdapter;
use chaos_order::proximity::TickOutcome;
use chaos_order::scene::HeroScene;
use chaos_order::shapes::{ContainerSize, Point};
use tracing::{debug, info};

use crate::protocol::{FrameOut, InputEvent, Output};
use crate::settings::DriverSettings;

pub enum Control {
    Continue,
    Reply(Output),
    Shutdown,
}

pub struct Driver {
    scene: HeroScene<FrameQueue>,
    emit_jitter: bool,
    seq: u64,
    last_complete: bool,
    last_tap_hint: bool,
}

impl Driver {
    pub fn new(settings: &DriverSettings) -> Self {
        let mut scene = HeroScene::with_queue(settings.viewport_width, settings.configs);
        scene.resize(settings.initial_container());
        scene.set_reduced_motion(settings.reduced_motion);
        scene.set_touch_device(settings.touch_device);
        Self {
            scene,
            emit_jitter: settings.emit_jitter,
            seq: 0,
            last_complete: false,
            last_tap_hint: false,
        }
    }

    pub fn scene(&self) -> &HeroScene<FrameQueue> {
        &self.scene
    }

    pub fn handle(&mut self, event: InputEvent) -> Control {
        match event {
            InputEvent::PointerMove { x, y } => self.scene.pointer_move(Point::new(x, y)),
            InputEvent::PointerLeave => self.scene.pointer_leave(),
            InputEvent::TouchMove { touches } => self.scene.touch_move(&touches),
            InputEvent::TouchEnd => self.scene.touch_end(),
            InputEvent::ForceComplete => self.scene.force_complete(),
            InputEvent::Resize { width, height } => {
                debug!(width, height, "container resized");
                self.scene.resize(ContainerSize::new(width, height));
            }
            InputEvent::Viewport { width } => {
                if self.scene.set_viewport_width(width) {
                    info!(
                        breakpoint = self.scene.breakpoint().label(),
                        shapes = self.scene.organizer().shapes().len(),
                        "breakpoint changed; progress reset"
                    );
                }
            }
            InputEvent::ReducedMotion { enabled } => {
                info!(enabled, "reduced motion");
                self.scene.set_reduced_motion(enabled);
            }
            InputEvent::Snapshot => {
                return Control::Reply(Output::Snapshot(SceneAdapter::new(&self.scene).snapshot()));
            }
            InputEvent::Shutdown => return Control::Shutdown,
        }
        Control::Continue
    }

    /// One display frame: deliver the pending organizer frame, then collect
    /// whatever changed. `None` when there is nothing to send.
    pub fn frame(&mut self, elapsed_s: f32) -> Option<Output> {
        if let Some(id) = self.scene.organizer_mut().scheduler_mut().take_due() {
            if let Some(report) = self.scene.on_frame(id) {
                if report.outcome == TickOutcome::Completed {
                    info!(organized = report.organized, "auto-complete");
                }
            }
        }

        let update = self.scene.update();
        let complete = update.complete;
        let jitter = (self.emit_jitter && !complete).then(|| self.scene.jitter_offsets(elapsed_s));

        let tap_hint = self.scene.tap_hint_visible(elapsed_s);

        let became_complete = complete && !self.last_complete;
        let changed_state = complete != self.last_complete || tap_hint != self.last_tap_hint;
        self.last_complete = complete;
        self.last_tap_hint = tap_hint;
        if update.is_empty() && jitter.is_none() && !changed_state {
            return None;
        }
        if became_complete {
            info!(ticks = self.scene.organizer().ticks(), "workspace complete");
        }

        self.seq += 1;
        Some(Output::Frame(FrameOut {
            seq: self.seq,
            breakpoint: self.scene.breakpoint(),
            update,
            tap_hint,
            jitter,
        }))
    }
}
