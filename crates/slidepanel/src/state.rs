use smallvec::SmallVec;

use crate::anchors::AnchorSet;
use crate::error::PanelError;

/// Where the panel is, or what it is doing.
///
/// The first four are rest states tied to an anchor. `Dragging` and
/// `Settling` are transient and can not be requested programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelState {
    Hidden,
    Collapsed,
    HalfExpanded,
    FullExpanded,
    Dragging,
    Settling,
}

impl PanelState {
    /// Stable numeric code, `1..=6` in declaration order.
    pub fn code(self) -> i32 {
        match self {
            PanelState::Hidden => 1,
            PanelState::Collapsed => 2,
            PanelState::HalfExpanded => 3,
            PanelState::FullExpanded => 4,
            PanelState::Dragging => 5,
            PanelState::Settling => 6,
        }
    }

    pub fn is_rest(self) -> bool {
        !matches!(self, PanelState::Dragging | PanelState::Settling)
    }

    /// Rest states whose anchor keeps the expanded content out of sight.
    pub fn hides_expanded_content(self) -> bool {
        matches!(self, PanelState::Hidden | PanelState::Collapsed)
    }
}

impl TryFrom<i32> for PanelState {
    type Error = PanelError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(PanelState::Hidden),
            2 => Ok(PanelState::Collapsed),
            3 => Ok(PanelState::HalfExpanded),
            4 => Ok(PanelState::FullExpanded),
            5 => Ok(PanelState::Dragging),
            6 => Ok(PanelState::Settling),
            _ => Err(PanelError::UnknownState { raw }),
        }
    }
}

impl std::fmt::Display for PanelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PanelState::Hidden => "Hidden",
            PanelState::Collapsed => "Collapsed",
            PanelState::HalfExpanded => "HalfExpanded",
            PanelState::FullExpanded => "FullExpanded",
            PanelState::Dragging => "Dragging",
            PanelState::Settling => "Settling",
        };
        f.write_str(name)
    }
}

/// Side effects produced by the state machine, delivered by the controller
/// once its own borrow is released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PanelEvent {
    StateChanged { old: PanelState, new: PanelState },
    /// The panel moved and listeners should hear about it.
    Slide(f32),
    /// The panel moved without a slide notification (layout, hide).
    Placed(f32),
    ExpandedVisibility(bool),
}

/// Owns the current state, the panel offset and the expanded content
/// visibility. Every mutation of the three goes through here so the
/// visibility rule and the notification rules hold on every path.
#[derive(Debug)]
pub(crate) struct PanelStateMachine {
    state: PanelState,
    offset: f32,
    collapsed_offset: Option<f32>,
    expanded_visible: bool,
    events: SmallVec<[PanelEvent; 4]>,
}

impl PanelStateMachine {
    pub(crate) fn new() -> Self {
        Self {
            state: PanelState::Hidden,
            offset: 0.0,
            collapsed_offset: None,
            expanded_visible: false,
            events: SmallVec::new(),
        }
    }

    pub(crate) fn state(&self) -> PanelState {
        self.state
    }

    pub(crate) fn offset(&self) -> f32 {
        self.offset
    }

    pub(crate) fn expanded_visible(&self) -> bool {
        self.expanded_visible
    }

    /// Called after anchors are recomputed. Visibility is re-evaluated on
    /// the next placement.
    pub(crate) fn set_anchors(&mut self, anchors: &AnchorSet) {
        self.collapsed_offset = Some(anchors.collapsed);
    }

    /// Re-sends the current visibility so a freshly laid out host matches.
    pub(crate) fn announce_visibility(&mut self) {
        self.events
            .push(PanelEvent::ExpandedVisibility(self.expanded_visible));
    }

    /// Switches state. Notifies only when the state actually changes.
    pub(crate) fn apply_state(&mut self, new: PanelState) -> bool {
        let old = self.state;
        if old == new {
            return false;
        }
        self.state = new;
        log::debug!("panel state {old} -> {new} at offset {}", self.offset);
        self.events.push(PanelEvent::StateChanged { old, new });
        self.sync_visibility();
        true
    }

    /// Moves the panel and reports a slide.
    pub(crate) fn apply_offset(&mut self, offset: f32) {
        self.offset = offset;
        log::trace!("panel slide to {offset}");
        self.events.push(PanelEvent::Slide(offset));
        self.sync_visibility();
    }

    /// Moves the panel without a slide notification.
    pub(crate) fn place(&mut self, offset: f32) {
        self.offset = offset;
        self.events.push(PanelEvent::Placed(offset));
        self.sync_visibility();
    }

    pub(crate) fn take_events(&mut self) -> SmallVec<[PanelEvent; 4]> {
        std::mem::take(&mut self.events)
    }

    fn sync_visibility(&mut self) {
        let at_collapsed = self.collapsed_offset == Some(self.offset);
        let visible = !(at_collapsed || self.state.hides_expanded_content());
        if visible != self.expanded_visible {
            self.expanded_visible = visible;
            self.events.push(PanelEvent::ExpandedVisibility(visible));
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
