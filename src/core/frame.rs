//! Display-synchronized frame scheduling.
//!
//! The organizer never runs its own loop. It asks a [`FrameScheduler`] for
//! the next frame and the host calls back into it when that frame fires.
//! At most one frame is ever outstanding per organizer.

/// Handle for a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

pub trait FrameScheduler {
    /// Request a callback on the next display frame.
    fn request_frame(&mut self) -> FrameId;

    /// Withdraw a previously requested frame. Unknown ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Single-slot frame queue driven by the host's own clock.
///
/// The host polls [`FrameQueue::take_due`] once per display frame and, if a
/// frame was pending, delivers it to the organizer.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameId>,
    requested: u64,
    cancelled: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// Pop the pending frame, if any. Call once per display frame.
    pub fn take_due(&mut self) -> Option<FrameId> {
        self.pending.take()
    }

    /// Total frames requested over the queue's lifetime.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total frames cancelled before they fired.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = FrameId(self.next_id);
        self.pending = Some(id);
        self.requested += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending == Some(id) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_frame(&mut self) -> FrameId {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        (**self).cancel_frame(id)
    }
}
