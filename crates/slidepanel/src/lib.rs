//! Bottom sliding panel controller
//!
//! A [`ScrollPanel`] drives a panel anchored to the bottom of a container
//! between four rest anchors: hidden, collapsed, half-expanded and
//! full-expanded. Three things can move it: a pointer drag on the panel,
//! scroll distance handed over by nested scrolling content, and the settle
//! that follows a release. All of them report to one state machine, which
//! notifies a [`PanelCallback`].
//!
//! The controller does not own the element tree. The host implements
//! [`PanelHost`] for geometry and position updates, forwards layout, pointer
//! and nested-scroll events, and drains the frame runtime once per frame.

mod anchors;
mod arbiter;
mod config;
mod controller;
mod drag;
mod error;
mod host;
mod listener;
mod nested_scroll;
mod registry;
mod settle;
mod state;

pub use anchors::{AnchorGeometry, AnchorModel, AnchorSet};
pub use arbiter::{ArbiterContext, GestureArbiter};
pub use config::PanelConfig;
pub use controller::ScrollPanel;
pub use drag::{resolve_snap_target, DragController, DragSession, SnapDirection};
pub use error::PanelError;
pub use host::{find_scrolling_child, ElementId, PanelHost};
pub use listener::PanelCallback;
pub use nested_scroll::{NestedScrollCoordinator, NestedScrollSession, PreScrollOutcome, StopOutcome};
pub use registry::PanelRegistry;
pub use settle::{SettleAnimator, SettleStep};
pub use state::PanelState;

pub use slidepanel_animation::Easing;
pub use slidepanel_core::{DefaultScheduler, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler};
pub use slidepanel_foundation::{
    EdgeInsets, Point, PointerEvent, PointerEventKind, PointerId, Rect, ScrollAxes, ScrollAxis, Size,
    ViewConfiguration,
};

pub mod prelude {
    pub use crate::config::PanelConfig;
    pub use crate::controller::ScrollPanel;
    pub use crate::error::PanelError;
    pub use crate::host::{ElementId, PanelHost};
    pub use crate::listener::PanelCallback;
    pub use crate::registry::PanelRegistry;
    pub use crate::state::PanelState;
}
