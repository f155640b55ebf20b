//! Host hooks for the frame runtime.

/// Asks the host for frames.
///
/// The runtime calls [`schedule_frame`](RuntimeScheduler::schedule_frame)
/// whenever a frame callback is registered. Hosts typically forward this to
/// their windowing layer's "request redraw".
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler that ignores frame requests. Useful when the host pumps frames
/// unconditionally, and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
