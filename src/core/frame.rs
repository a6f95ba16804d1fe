//! Owned animation loop handle
//!
//! The host's "run once before next repaint" primitive sits behind
//! [`FrameScheduler`]; [`FrameLoop`] tracks the single outstanding request so
//! stopping the loop can cancel it, and stopping twice does nothing.

use tracing::{debug, warn};

pub trait FrameScheduler {
    type Handle: Copy + std::fmt::Debug;

    /// Ask for one callback before the next repaint. `None` if the host refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    state: LoopState,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Request the first frame. Only valid from `Idle`.
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        self.state = LoopState::Running;
        self.schedule_next();
        true
    }

    /// Called at the top of the frame callback. The request that fired is no
    /// longer pending; returns whether the frame should run at all.
    pub fn frame_fired(&mut self) -> bool {
        self.pending = None;
        self.is_running()
    }

    /// Queue the following frame (no-op when stopped or already queued)
    pub fn schedule_next(&mut self) {
        if !self.is_running() || self.pending.is_some() {
            return;
        }
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            warn!("Host refused frame request, animation halted");
            self.state = LoopState::Stopped;
        }
    }

    /// Cancel any pending frame. Returns `true` only on the first call.
    pub fn stop(&mut self) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }
        self.state = LoopState::Stopped;
        if let Some(handle) = self.pending.take() {
            debug!(?handle, "Cancelling pending frame");
            self.scheduler.cancel_frame(handle);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockScheduler {
        next_id: u32,
        requested: Vec<u32>,
        cancelled: Vec<u32>,
        refuse: bool,
    }

    impl FrameScheduler for MockScheduler {
        type Handle = u32;

        fn request_frame(&mut self) -> Option<u32> {
            if self.refuse {
                return None;
            }
            self.next_id += 1;
            self.requested.push(self.next_id);
            Some(self.next_id)
        }

        fn cancel_frame(&mut self, handle: u32) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn test_start_requests_one_frame() {
        let mut frames = FrameLoop::new(MockScheduler::default());
        assert!(frames.start());
        assert!(!frames.start());
        assert!(frames.has_pending());

        // Already pending: no duplicate request
        frames.schedule_next();
        assert_eq!(frames.scheduler.requested, vec![1]);
    }

    #[test]
    fn test_frame_cycle() {
        let mut frames = FrameLoop::new(MockScheduler::default());
        frames.start();
        for _ in 0..3 {
            assert!(frames.frame_fired());
            assert!(!frames.has_pending());
            frames.schedule_next();
        }
        assert_eq!(frames.scheduler.requested, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_stop_cancels_pending_once() {
        let mut frames = FrameLoop::new(MockScheduler::default());
        frames.start();

        assert!(frames.stop());
        assert!(!frames.stop());
        assert_eq!(frames.scheduler.cancelled, vec![1]);
        assert!(!frames.has_pending());

        // A callback already in flight sees the loop stopped and schedules nothing
        assert!(!frames.frame_fired());
        frames.schedule_next();
        assert_eq!(frames.scheduler.requested, vec![1]);
        assert_eq!(frames.state(), LoopState::Stopped);
    }

    #[test]
    fn test_stop_before_start() {
        let mut frames = FrameLoop::new(MockScheduler::default());
        assert!(frames.stop());
        assert!(!frames.start());
        assert!(frames.scheduler.cancelled.is_empty());
    }

    #[test]
    fn test_refused_request_halts() {
        let mut frames = FrameLoop::new(MockScheduler {
            refuse: true,
            ..MockScheduler::default()
        });
        frames.start();
        assert_eq!(frames.state(), LoopState::Stopped);
        assert!(!frames.has_pending());
    }
}
