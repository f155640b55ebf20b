use slidepanel_animation::{Easing, OffsetSettler};
use slidepanel_core::{FrameCallbackRegistration, FrameClock};

use crate::state::PanelState;

/// One frame of settle progress, for the settle that owns `token`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleStep {
    pub offset: f32,
    pub running: bool,
    pub target: PanelState,
}

/// Frame-stepped motion towards a rest anchor.
///
/// Every start and every invalidation bumps a generation token. Frame
/// callbacks carry the token they were scheduled with; a callback whose token
/// is no longer current does nothing, so a superseded settle can never
/// finalize over a newer state.
#[derive(Debug)]
pub struct SettleAnimator {
    clock: FrameClock,
    settler: OffsetSettler,
    target: Option<PanelState>,
    token: u64,
    registration: Option<FrameCallbackRegistration>,
}

impl SettleAnimator {
    pub fn new(clock: FrameClock, easing: Easing) -> Self {
        Self {
            clock,
            settler: OffsetSettler::new(easing),
            target: None,
            token: 0,
            registration: None,
        }
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.token == token && self.target.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.target.is_some()
    }

    /// Rest state of the settle in flight.
    pub fn target(&self) -> Option<PanelState> {
        self.target
    }

    /// Starts settling towards `target`. Returns the new token, or `None`
    /// when `from == to` and there is nothing to animate.
    pub fn start(&mut self, from: f32, to: f32, target: PanelState, duration_ms: u64) -> Option<u64> {
        self.invalidate();
        if !self.settler.start(from, to, duration_ms) {
            return None;
        }
        self.target = Some(target);
        log::trace!(
            "settle #{} {from} -> {to} ({target}) over {duration_ms}ms",
            self.token
        );
        Some(self.token)
    }

    /// Requests the next frame. `on_frame` receives the frame time.
    pub fn schedule(&mut self, on_frame: impl FnOnce(u64) + 'static) {
        let registration = self.clock.with_frame_nanos(on_frame);
        if !registration.is_active() {
            log::warn!("frame runtime is gone, settle #{} will not advance", self.token);
        }
        self.registration = Some(registration);
    }

    /// Advances the settle owning `token`. `None` if that settle is stale.
    pub fn step(&mut self, token: u64, frame_time_nanos: u64) -> Option<SettleStep> {
        if !self.is_current(token) {
            log::trace!("dropping stale settle frame #{token}, current #{}", self.token);
            return None;
        }
        let target = self.target?;
        let frame = self.settler.step(frame_time_nanos);
        if !frame.running {
            self.target = None;
            self.registration = None;
        }
        Some(SettleStep {
            offset: frame.offset,
            running: frame.running,
            target,
        })
    }

    /// Abandons the settle in flight, if any.
    pub fn invalidate(&mut self) {
        self.token = self.token.wrapping_add(1);
        self.target = None;
        self.settler.cancel();
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
    }
}

#[cfg(test)]
#[path = "tests/settle_tests.rs"]
mod tests;
