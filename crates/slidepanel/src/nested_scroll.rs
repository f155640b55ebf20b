use slidepanel_foundation::ScrollAxes;

use crate::anchors::AnchorSet;
use crate::drag::{resolve_snap_target, SnapDirection};
use crate::host::ElementId;
use crate::state::PanelState;

/// Bookkeeping for one nested scroll, from start to stop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NestedScrollSession {
    pub last_scroll_delta: f32,
    pub consumed_any: bool,
    target: Option<ElementId>,
}

/// Result of offering a pre-scroll delta to the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreScrollOutcome {
    /// Part of `dy` the panel took, with the sign of `dy`.
    pub consumed: f32,
    /// New panel top, when the panel moved or hit an anchor.
    pub new_top: Option<f32>,
    pub state: Option<PanelState>,
}

impl PreScrollOutcome {
    const NONE: Self = Self {
        consumed: 0.0,
        new_top: None,
        state: None,
    };
}

/// What to do once the inner content stops scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The panel already sits on the full-expanded anchor.
    FullExpanded,
    /// Settle to the given rest state.
    Snap(PanelState),
    /// Someone else moved the panel last; leave it.
    Ignore,
}

/// Turns scroll distance the inner content did not use into panel movement.
#[derive(Debug, Default)]
pub struct NestedScrollCoordinator {
    session: NestedScrollSession,
}

impl NestedScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &NestedScrollSession {
        &self.session
    }

    /// Accepts vertical scrolls only.
    pub fn start(&mut self, target: ElementId, axes: ScrollAxes) -> bool {
        self.session = NestedScrollSession {
            target: Some(target),
            ..NestedScrollSession::default()
        };
        axes.is_vertical()
    }

    /// Offers `dy` to the panel sitting at `top`. Positive `dy` raises it.
    ///
    /// Upwards the panel takes everything up to the full-expanded anchor.
    /// Downwards it acts only once the inner content is back at its own top,
    /// and takes everything down to the collapsed anchor.
    pub fn pre_scroll(
        &mut self,
        target: ElementId,
        dy: f32,
        top: f32,
        anchors: &AnchorSet,
        inner_can_scroll_up: bool,
    ) -> PreScrollOutcome {
        if dy == 0.0 {
            return PreScrollOutcome::NONE;
        }

        let new_top = top - dy;
        let outcome = if dy > 0.0 {
            if new_top < anchors.full_expanded {
                PreScrollOutcome {
                    consumed: top - anchors.full_expanded,
                    new_top: Some(anchors.full_expanded),
                    state: Some(PanelState::FullExpanded),
                }
            } else {
                PreScrollOutcome {
                    consumed: dy,
                    new_top: Some(new_top),
                    state: Some(PanelState::Dragging),
                }
            }
        } else if inner_can_scroll_up {
            return PreScrollOutcome::NONE;
        } else if new_top <= anchors.collapsed {
            PreScrollOutcome {
                consumed: dy,
                new_top: Some(new_top),
                state: Some(PanelState::Dragging),
            }
        } else {
            PreScrollOutcome {
                consumed: top - anchors.collapsed,
                new_top: Some(anchors.collapsed),
                state: Some(PanelState::Collapsed),
            }
        };

        // Only scrolls that reached the panel arm the stop heuristic.
        self.session.target = Some(target);
        self.session.last_scroll_delta = dy;
        self.session.consumed_any = true;
        outcome
    }

    /// Picks the snap for the end of a nested scroll on `target`.
    pub fn stop(&mut self, target: ElementId, top: f32, anchors: &AnchorSet) -> StopOutcome {
        let session = std::mem::take(&mut self.session);
        if top == anchors.full_expanded {
            return StopOutcome::FullExpanded;
        }
        if !session.consumed_any || session.target != Some(target) {
            return StopOutcome::Ignore;
        }
        let direction = SnapDirection::from_scroll_delta(session.last_scroll_delta);
        StopOutcome::Snap(resolve_snap_target(anchors, top, direction))
    }

    /// Whether the panel claims a fling on its scroll child. It does unless
    /// it is fully expanded, where the content flings natively.
    pub fn pre_fling(state: PanelState) -> bool {
        state != PanelState::FullExpanded
    }

    pub fn reset(&mut self) {
        self.session = NestedScrollSession::default();
    }
}

#[cfg(test)]
#[path = "tests/nested_scroll_tests.rs"]
mod tests;
