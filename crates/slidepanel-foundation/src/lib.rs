//! Geometry, pointer input and velocity primitives for slidepanel
//!
//! This crate holds the plain data the panel core consumes from its host:
//! positions and rectangles, pointer events, nested-scroll axes, the gesture
//! thresholds of a [`ViewConfiguration`], and the [`VelocityTracker1D`] used
//! to turn a pointer stream into a release velocity.

mod geometry;
pub mod gesture_constants;
pub mod input;
mod velocity_tracker;
mod view_configuration;

pub use geometry::*;
pub use gesture_constants::{MAX_FLING_VELOCITY, MIN_FLING_VELOCITY, TOUCH_SLOP};
pub use input::{PointerEvent, PointerEventKind, PointerId, ScrollAxes, ScrollAxis};
pub use velocity_tracker::{VelocityTracker1D, ASSUME_STOPPED_MS};
pub use view_configuration::ViewConfiguration;

pub mod prelude {
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::input::{PointerEvent, PointerEventKind, PointerId, ScrollAxes};
    pub use crate::velocity_tracker::VelocityTracker1D;
    pub use crate::view_configuration::ViewConfiguration;
}
