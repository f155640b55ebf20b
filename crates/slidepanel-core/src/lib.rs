//! Single-threaded frame runtime for slidepanel.
//!
//! Everything in the panel stack is driven by callbacks the host invokes:
//! pointer events, nested-scroll events and animation frames. This crate owns
//! the last of those. Work that must happen "on the next frame" registers a
//! callback with a [`FrameClock`]; the host calls
//! [`RuntimeHandle::drain_frame_callbacks`] once per vsync.

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle};

pub(crate) type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::platform::{DefaultScheduler, RuntimeScheduler};
    pub use crate::runtime::{Runtime, RuntimeHandle};
}
