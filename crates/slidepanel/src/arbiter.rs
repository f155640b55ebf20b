use slidepanel_foundation::{PointerEvent, PointerId, Rect};

use crate::drag::DragSession;
use crate::state::PanelState;

/// What the arbiter needs to know about the tree at the moment of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbiterContext {
    pub state: PanelState,
    pub panel_bounds: Option<Rect>,
    /// Bounds of the inner nested-scrolling content, if there is one.
    pub scroll_bounds: Option<Rect>,
    pub inner_can_scroll_up: bool,
}

impl ArbiterContext {
    pub(crate) fn in_panel(&self, x: f32, y: f32) -> bool {
        self.panel_bounds.is_some_and(|rect| rect.contains(x, y))
    }

    pub(crate) fn in_scroll_child(&self, x: f32, y: f32) -> bool {
        self.scroll_bounds.is_some_and(|rect| rect.contains(x, y))
    }
}

/// Decides who owns a pointer gesture: the panel or its inner content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureArbiter {
    touch_slop: f32,
}

impl GestureArbiter {
    pub fn new(touch_slop: f32) -> Self {
        Self { touch_slop }
    }

    /// Opens a session for a pointer down.
    ///
    /// A down on the inner content is recorded as touching-inner. A down
    /// outside both the inner content and the panel ignores the whole
    /// gesture.
    pub fn begin(&self, down: &PointerEvent, ctx: &ArbiterContext) -> DragSession {
        let (x, y) = (down.x(), down.y());
        let touching_inner = ctx.in_scroll_child(x, y);
        let ignore_events = !touching_inner && !ctx.in_panel(x, y);
        if ignore_events {
            log::trace!("pointer {} down outside panel, ignoring gesture", down.id);
        }
        DragSession::new(down, touching_inner, ignore_events)
    }

    pub fn exceeds_slop(&self, session: &DragSession, y: f32) -> bool {
        (session.initial_y - y).abs() > self.touch_slop
    }

    /// Whether the panel may take `pointer`.
    pub fn can_capture(&self, session: &DragSession, pointer: PointerId, ctx: &ArbiterContext) -> bool {
        if ctx.state == PanelState::Dragging || session.touching_inner {
            return false;
        }
        !(ctx.state == PanelState::FullExpanded
            && session.active_pointer == Some(pointer)
            && ctx.inner_can_scroll_up)
    }

    /// A move on the panel, away from the inner content, that has travelled
    /// past slop. The panel intercepts without having captured yet.
    pub fn should_intercept_move(
        &self,
        session: &DragSession,
        event: &PointerEvent,
        ctx: &ArbiterContext,
    ) -> bool {
        ctx.scroll_bounds.is_some()
            && !session.ignore_events
            && ctx.state != PanelState::Dragging
            && !ctx.in_scroll_child(event.x(), event.y())
            && self.exceeds_slop(session, event.y())
    }

    /// A down on the panel while it settles catches it mid-flight.
    pub fn catches_settle(&self, session: &DragSession, event: &PointerEvent, ctx: &ArbiterContext) -> bool {
        ctx.state == PanelState::Settling
            && !session.ignore_events
            && ctx.in_panel(event.x(), event.y())
            && self.can_capture(session, event.id, ctx)
    }
}

#[cfg(test)]
#[path = "tests/arbiter_tests.rs"]
mod tests;
