//! Assertion helpers for panel robot tests.

use slidepanel::{PanelState, ScrollPanel};

use crate::recording::RecordingCallback;

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert the exact sequence of state changes the listener heard.
pub fn assert_state_changes(
    recorder: &RecordingCallback,
    expected: &[(PanelState, PanelState)],
    msg: &str,
) {
    assert_eq!(recorder.state_changes(), expected, "{}", msg);
}

/// Assert the panel rests on the anchor of `state`.
pub fn assert_rests_at(panel: &ScrollPanel, state: PanelState, msg: &str) {
    assert_eq!(panel.state(), state, "{}: state", msg);
    let anchors = panel
        .anchors()
        .unwrap_or_else(|| panic!("{}: panel was never laid out", msg));
    let expected = anchors
        .offset_for(state)
        .unwrap_or_else(|| panic!("{}: {} has no anchor", msg, state));
    assert_eq!(panel.offset(), expected, "{}: offset", msg);
}

/// Assert every reported slide lies within the drag range.
pub fn assert_slides_within_drag_range(panel: &ScrollPanel, recorder: &RecordingCallback, msg: &str) {
    let Some(anchors) = panel.anchors() else {
        panic!("{}: panel was never laid out", msg);
    };
    for offset in recorder.slides() {
        assert!(
            offset >= anchors.full_expanded && offset <= anchors.collapsed,
            "{}: slide {} outside [{}, {}]",
            msg,
            offset,
            anchors.full_expanded,
            anchors.collapsed
        );
    }
}

/// Assert that a collection has an expected count.
pub fn assert_count<T>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {}",
        msg,
        expected,
        items.len()
    );
}
