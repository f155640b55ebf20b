use slidepanel_foundation::{PointerEvent, PointerId, VelocityTracker1D, ViewConfiguration};

use crate::anchors::AnchorSet;
use crate::state::PanelState;

/// Which way the panel was heading when a gesture let go of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapDirection {
    /// Towards the full-expanded anchor (panel top decreasing).
    Expanding,
    /// No motion; the nearest anchor wins.
    Still,
    /// Towards the collapsed anchor (panel top increasing).
    Collapsing,
}

impl SnapDirection {
    /// From a release velocity in px/s, positive downwards.
    pub fn from_velocity(velocity: f32) -> Self {
        if velocity < 0.0 {
            SnapDirection::Expanding
        } else if velocity > 0.0 {
            SnapDirection::Collapsing
        } else {
            SnapDirection::Still
        }
    }

    /// From the last nested pre-scroll delta, positive when content scrolls
    /// up and the panel rises.
    pub fn from_scroll_delta(dy: f32) -> Self {
        Self::from_velocity(-dy)
    }
}

/// Rest state a released panel at `top` should settle to.
///
/// A moving release snaps to the next anchor on its side of half. A still
/// release picks the nearest of full, half and collapsed; ties go to the
/// more expanded anchor.
pub fn resolve_snap_target(anchors: &AnchorSet, top: f32, direction: SnapDirection) -> PanelState {
    match direction {
        SnapDirection::Expanding => {
            if top < anchors.half_expanded {
                PanelState::FullExpanded
            } else {
                PanelState::HalfExpanded
            }
        }
        SnapDirection::Collapsing => {
            if top < anchors.half_expanded {
                PanelState::HalfExpanded
            } else {
                PanelState::Collapsed
            }
        }
        SnapDirection::Still => {
            let to_full = (top - anchors.full_expanded).abs();
            let to_half = (top - anchors.half_expanded).abs();
            if to_full <= to_half {
                return PanelState::FullExpanded;
            }
            let to_collapsed = (top - anchors.collapsed).abs();
            if to_half <= to_collapsed {
                PanelState::HalfExpanded
            } else {
                PanelState::Collapsed
            }
        }
    }
}

/// One pointer gesture, from down to up or cancel.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub(crate) pointer: PointerId,
    /// Set when the gesture started on the inner scrollable content.
    pub(crate) active_pointer: Option<PointerId>,
    pub(crate) initial_y: f32,
    pub(crate) last_y: f32,
    pub(crate) touching_inner: bool,
    pub(crate) ignore_events: bool,
    tracker: VelocityTracker1D,
}

impl DragSession {
    pub(crate) fn new(down: &PointerEvent, touching_inner: bool, ignore_events: bool) -> Self {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_vertical_movement(down);
        Self {
            pointer: down.id,
            active_pointer: touching_inner.then_some(down.id),
            initial_y: down.y(),
            last_y: down.y(),
            touching_inner,
            ignore_events,
            tracker,
        }
    }

    /// A session that swallows everything until the next down.
    pub(crate) fn ignoring(event: &PointerEvent) -> Self {
        Self::new(event, false, true)
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn initial_y(&self) -> f32 {
        self.initial_y
    }

    pub fn is_touching_inner(&self) -> bool {
        self.touching_inner
    }

    pub fn is_ignoring(&self) -> bool {
        self.ignore_events
    }

    pub(crate) fn track(&mut self, event: &PointerEvent) {
        self.tracker.add_vertical_movement(event);
    }

    pub(crate) fn velocity(&self) -> f32 {
        self.tracker.calculate_velocity()
    }
}

/// Owns the live pointer drag of the panel.
#[derive(Debug)]
pub struct DragController {
    view_configuration: ViewConfiguration,
    session: Option<DragSession>,
    captured: bool,
    /// Where a cancelled drag goes back to.
    pre_drag_rest: Option<PanelState>,
}

impl DragController {
    pub fn new(view_configuration: ViewConfiguration) -> Self {
        Self {
            view_configuration,
            session: None,
            captured: false,
            pre_drag_rest: None,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut DragSession> {
        self.session.as_mut()
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub(crate) fn begin(&mut self, session: DragSession) {
        self.session = Some(session);
        self.captured = false;
        self.pre_drag_rest = None;
    }

    /// Marks the ongoing gesture, or a new one starting at `event`, as
    /// ignored.
    pub(crate) fn ignore_gesture(&mut self, event: &PointerEvent) {
        match self.session.as_mut() {
            Some(session) => session.ignore_events = true,
            None => self.session = Some(DragSession::ignoring(event)),
        }
    }

    /// Takes the pointer. `resume_to` is the rest state the panel was in, or
    /// was heading towards, when the drag began.
    pub(crate) fn capture(&mut self, resume_to: Option<PanelState>) {
        self.captured = true;
        self.pre_drag_rest = resume_to;
        if let Some(session) = self.session.as_ref() {
            log::trace!(
                "drag captured pointer {} at y {}",
                session.pointer,
                session.last_y
            );
        }
    }

    /// Offset after moving the panel at `top` by `dy`, clamped to the drag
    /// range.
    pub fn drag_target(anchors: &AnchorSet, top: f32, dy: f32) -> f32 {
        anchors.clamp_drag(top + dy)
    }

    /// Release velocity of the current session, clamped to the fling range.
    pub fn release_velocity(&self) -> f32 {
        let raw = self
            .session
            .as_ref()
            .map(DragSession::velocity)
            .unwrap_or(0.0);
        self.view_configuration.clamp_fling_velocity(raw)
    }

    pub fn pre_drag_rest(&self) -> Option<PanelState> {
        self.pre_drag_rest
    }

    /// Ends the gesture. Returns whether the panel had been captured.
    pub(crate) fn end(&mut self) -> bool {
        let was_captured = self.captured;
        self.session = None;
        self.captured = false;
        self.pre_drag_rest = None;
        was_captured
    }
}

#[cfg(test)]
#[path = "tests/drag_tests.rs"]
mod tests;
