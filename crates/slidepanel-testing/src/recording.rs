use std::cell::RefCell;

use slidepanel::{PanelCallback, PanelState, ScrollPanel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelRecord {
    StateChanged { old: PanelState, new: PanelState },
    Slide(f32),
    ExpandedVisibility(bool),
}

/// Listener that keeps everything it hears, in order.
#[derive(Debug, Default)]
pub struct RecordingCallback {
    records: RefCell<Vec<PanelRecord>>,
}

impl RecordingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<PanelRecord> {
        self.records.borrow().clone()
    }

    pub fn state_changes(&self) -> Vec<(PanelState, PanelState)> {
        self.records
            .borrow()
            .iter()
            .filter_map(|record| match record {
                PanelRecord::StateChanged { old, new } => Some((*old, *new)),
                _ => None,
            })
            .collect()
    }

    pub fn slides(&self) -> Vec<f32> {
        self.records
            .borrow()
            .iter()
            .filter_map(|record| match record {
                PanelRecord::Slide(offset) => Some(*offset),
                _ => None,
            })
            .collect()
    }

    pub fn last_state(&self) -> Option<PanelState> {
        self.state_changes().last().map(|(_, new)| *new)
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl PanelCallback for RecordingCallback {
    fn on_state_changed(&self, _panel: &ScrollPanel, old: PanelState, new: PanelState) {
        self.records
            .borrow_mut()
            .push(PanelRecord::StateChanged { old, new });
    }

    fn on_slide(&self, _panel: &ScrollPanel, offset: f32) {
        self.records.borrow_mut().push(PanelRecord::Slide(offset));
    }

    fn on_expanded_content_visibility(&self, _panel: &ScrollPanel, visible: bool) {
        self.records
            .borrow_mut()
            .push(PanelRecord::ExpandedVisibility(visible));
    }
}
