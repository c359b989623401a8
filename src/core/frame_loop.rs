//! Cooperative frame loop over the host's frame scheduler.

use super::BackdropError;

/// The host primitive that invokes a callback once per display refresh.
pub trait FrameScheduler {
    /// Token identifying one pending request.
    type Handle: Copy + std::fmt::Debug;

    /// Ask for the frame callback to run once on the next refresh.
    fn request_frame(&mut self) -> Result<Self::Handle, BackdropError>;

    /// Drop a pending request so its callback never runs.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Lifecycle of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Never started, or the scheduler failed.
    Idle,
    /// A frame is pending or currently rendering.
    Running,
    /// Suspended while the page is hidden.
    Paused,
}

/// Keeps at most one frame request outstanding and handles pause/resume.
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    state: LoopState,
    frames: u64,
}

impl<S: FrameScheduler> FrameLoop<S> {
    /// Wrap a scheduler. The loop starts idle.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            state: LoopState::Idle,
            frames: 0,
        }
    }

    /// Begin requesting frames. No-op while already running.
    pub fn start(&mut self) {
        if self.state == LoopState::Running {
            return;
        }
        self.state = LoopState::Running;
        self.request();
    }

    /// Called first thing in the frame callback.
    ///
    /// Forgets the handle that just fired and reports whether the frame
    /// should render.
    pub fn on_frame(&mut self) -> bool {
        self.pending = None;
        if self.state != LoopState::Running {
            return false;
        }
        self.frames += 1;
        true
    }

    /// Request the following frame after a frame has rendered.
    pub fn schedule_next(&mut self) {
        if self.state == LoopState::Running {
            self.request();
        }
    }

    /// Cancel the pending request. Idempotent.
    pub fn pause(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.state == LoopState::Running {
            log::debug!("frame loop paused after {} frames", self.frames);
            self.state = LoopState::Paused;
        }
    }

    /// Restart from a fresh request after [`pause`](Self::pause). Idempotent.
    pub fn resume(&mut self) {
        if self.state != LoopState::Paused {
            return;
        }
        log::debug!("frame loop resumed");
        self.state = LoopState::Running;
        self.request();
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether frames are being produced.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Handle of the outstanding request, if any.
    #[inline]
    pub fn pending(&self) -> Option<S::Handle> {
        self.pending
    }

    /// Frames rendered so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Access the underlying scheduler.
    #[inline]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn request(&mut self) {
        if self.pending.is_some() {
            return;
        }
        match self.scheduler.request_frame() {
            Ok(handle) => self.pending = Some(handle),
            Err(err) => {
                log::warn!("stopping frame loop: {}", err);
                self.state = LoopState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScheduler {
        next: u32,
        requested: Vec<u32>,
        cancelled: Vec<u32>,
        fail: bool,
    }

    impl CountingScheduler {
        fn live(&self) -> usize {
            self.requested
                .iter()
                .filter(|h| !self.cancelled.contains(h))
                .count()
        }
    }

    impl FrameScheduler for CountingScheduler {
        type Handle = u32;

        fn request_frame(&mut self) -> Result<u32, BackdropError> {
            if self.fail {
                return Err(BackdropError::SchedulerUnavailable("test".into()));
            }
            self.next += 1;
            self.requested.push(self.next);
            Ok(self.next)
        }

        fn cancel_frame(&mut self, handle: u32) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn test_start_requests_one_frame() {
        let mut lp = FrameLoop::new(CountingScheduler::default());
        lp.start();
        lp.start();
        assert!(lp.is_running());
        assert_eq!(lp.scheduler().requested.len(), 1);
        assert_eq!(lp.pending(), Some(1));
    }

    #[test]
    fn test_frame_then_schedule_next() {
        let mut lp = FrameLoop::new(CountingScheduler::default());
        lp.start();
        assert!(lp.on_frame());
        assert_eq!(lp.pending(), None);
        lp.schedule_next();
        assert_eq!(lp.pending(), Some(2));
        assert_eq!(lp.frames(), 1);
    }

    #[test]
    fn test_double_pause_cancels_once() {
        let mut lp = FrameLoop::new(CountingScheduler::default());
        lp.start();
        lp.pause();
        lp.pause();
        assert_eq!(lp.state(), LoopState::Paused);
        assert_eq!(lp.scheduler().cancelled, vec![1]);
        assert_eq!(lp.scheduler().live(), 0);
    }

    #[test]
    fn test_double_resume_leaves_one_loop() {
        let mut lp = FrameLoop::new(CountingScheduler::default());
        lp.start();
        lp.pause();
        lp.resume();
        lp.resume();
        assert!(lp.is_running());
        assert_eq!(lp.scheduler().live(), 1);
        assert_eq!(lp.scheduler().requested.len(), 2);
    }

    #[test]
    fn test_resume_while_running_is_noop() {
        let mut lp = FrameLoop::new(CountingScheduler::default());
        lp.start();
        lp.resume();
        assert_eq!(lp.scheduler().requested.len(), 1);
    }

    #[test]
    fn test_stale_callback_after_pause_does_not_render() {
        let mut lp = FrameLoop::new(CountingScheduler::default());
        lp.start();
        lp.pause();
        assert!(!lp.on_frame());
        lp.schedule_next();
        assert_eq!(lp.pending(), None);
    }

    #[test]
    fn test_scheduler_failure_goes_idle() {
        let mut lp = FrameLoop::new(CountingScheduler {
            fail: true,
            ..Default::default()
        });
        lp.start();
        assert_eq!(lp.state(), LoopState::Idle);
        assert_eq!(lp.pending(), None);
    }
}
