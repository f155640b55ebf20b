//! Easing curves and frame-stepped settle motion for slidepanel
//!
//! The settle primitive here knows nothing about panels or frames queues: it
//! is asked once per frame where the value should be and whether it still
//! needs motion. Scheduling lives with the caller.

mod easing;
mod settler;

pub use easing::Easing;
pub use settler::{
    settle_duration_millis, OffsetSettler, SettleFrame, BASE_SETTLE_DURATION_MS,
    MAX_SETTLE_DURATION_MS,
};

pub mod prelude {
    pub use crate::easing::Easing;
    pub use crate::settler::{OffsetSettler, SettleFrame};
}
