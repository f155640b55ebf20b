use std::cell::Cell;
use std::rc::Rc;

use slidepanel::{PanelCallback, PanelConfig, PanelError, PanelState, PointerEvent, ScrollAxes, ScrollPanel};
use slidepanel_testing::host::{EXPANDED, HEADER, LIST};
use slidepanel_testing::{FakePanelHost, PanelRobot};

fn config() -> PanelConfig {
    PanelConfig::default()
        .with_full_expanded_offset(100.0)
        .with_half_expanded_offset(400.0)
}

fn host() -> Rc<FakePanelHost> {
    FakePanelHost::builder().with_list(3000.0).build()
}

/// Laid out and resting at `state`, with the recorder cleared.
fn resting(state: PanelState) -> PanelRobot {
    let mut robot = PanelRobot::unlaid(host(), config());
    robot.panel().set_state(state).unwrap();
    robot.layout();
    robot.recorder().clear();
    robot
}

/// Routes an event the way a container does: intercept first, then the
/// panel once it has intercepted.
fn dispatch(panel: &ScrollPanel, event: PointerEvent, intercepted: &mut bool) {
    if !*intercepted {
        *intercepted = panel.on_intercept_pointer_event(&event);
    } else {
        panel.on_pointer_event(&event);
    }
}

#[test]
fn state_requested_before_layout_applies_once_on_layout() {
    let mut robot = PanelRobot::unlaid(host(), config());
    robot.panel().set_state(PanelState::FullExpanded).unwrap();
    assert_eq!(robot.panel().state(), PanelState::Hidden);
    assert_eq!(robot.panel().pending_state(), Some(PanelState::FullExpanded));
    assert!(robot.recorder().state_changes().is_empty());

    robot.layout();
    assert_eq!(
        robot.recorder().state_changes(),
        vec![(PanelState::Hidden, PanelState::FullExpanded)]
    );
    assert_eq!(robot.panel().offset(), 100.0);
    assert_eq!(robot.host().panel_top(), 100.0);
    assert!(robot.recorder().slides().is_empty());
    assert!(!robot.runtime().needs_frame());
}

#[test]
fn layout_derives_anchors() {
    let mut robot = PanelRobot::unlaid(host(), config());
    robot.layout();
    let anchors = robot.panel().anchors().unwrap();
    assert_eq!(anchors.hidden, 1000.0);
    assert_eq!(anchors.collapsed, 900.0);
    assert_eq!(anchors.half_expanded, 400.0);
    assert_eq!(anchors.full_expanded, 100.0);
    assert_eq!(robot.panel().collapsed_offset(), 900.0);
    assert_eq!(robot.panel().offset(), 1000.0);
    assert_eq!(robot.host().scroll_resets(), 1);

    robot.layout();
    assert_eq!(robot.host().scroll_resets(), 1);
}

#[test]
fn below_to_element_overrides_full_offset() {
    let host = FakePanelHost::builder().with_header(150.0).build();
    let mut robot = PanelRobot::unlaid(
        host,
        config().with_full_expanded_offset(0.0).with_below_to(HEADER),
    );
    assert_eq!(robot.panel().full_expanded_offset(), 0.0);
    robot.layout();
    assert_eq!(robot.panel().full_expanded_offset(), 150.0);
}

#[test]
fn transient_states_are_rejected() {
    let robot = resting(PanelState::Collapsed);
    assert_eq!(
        robot.panel().set_state(PanelState::Dragging),
        Err(PanelError::IllegalState {
            state: PanelState::Dragging
        })
    );
    assert_eq!(
        robot.panel().set_state_code(9),
        Err(PanelError::UnknownState { raw: 9 })
    );
    assert_eq!(robot.panel().set_state_code(3), Ok(()));
    assert_eq!(robot.panel().state(), PanelState::Settling);
}

#[test]
fn hide_twice_notifies_once() {
    let robot = resting(PanelState::Collapsed);
    robot.panel().hide();
    robot.panel().hide();
    assert_eq!(
        robot.recorder().state_changes(),
        vec![(PanelState::Collapsed, PanelState::Hidden)]
    );
    assert_eq!(robot.panel().offset(), 1000.0);
    assert!(robot.panel().is_hidden());
}

#[test]
fn set_state_to_current_is_silent() {
    let robot = resting(PanelState::Collapsed);
    robot.panel().set_state(PanelState::Collapsed).unwrap();
    assert!(robot.recorder().state_changes().is_empty());
    assert!(!robot.runtime().needs_frame());
}

#[test]
fn set_state_settles_through_frames() {
    let mut robot = resting(PanelState::Collapsed);
    robot.panel().set_state(PanelState::HalfExpanded).unwrap();
    assert_eq!(robot.panel().state(), PanelState::Settling);
    assert!(robot.runtime().needs_frame());

    robot.settle();
    assert_eq!(robot.panel().state(), PanelState::HalfExpanded);
    assert_eq!(robot.panel().offset(), 400.0);
    assert!(robot.panel().is_expanded());
    assert_eq!(
        robot.recorder().state_changes(),
        vec![
            (PanelState::Collapsed, PanelState::Settling),
            (PanelState::Settling, PanelState::HalfExpanded),
        ]
    );
    let slides = robot.recorder().slides();
    assert_eq!(slides.last(), Some(&400.0));
    assert!(slides.windows(2).all(|pair| pair[1] <= pair[0]));
}

#[test]
fn drag_release_upwards_settles_to_half() {
    let mut robot = resting(PanelState::Collapsed);
    let panel = robot.panel().clone();
    let mut intercepted = false;
    dispatch(&panel, PointerEvent::down(50.0, 920.0, 0), &mut intercepted);
    assert!(!intercepted);
    dispatch(&panel, PointerEvent::moved(50.0, 905.0, 10), &mut intercepted);
    assert!(intercepted);
    assert_eq!(panel.state(), PanelState::Dragging);

    let mut y = 905.0;
    for step in 2..=5 {
        y -= 50.0;
        dispatch(&panel, PointerEvent::moved(50.0, y, step * 10), &mut intercepted);
    }
    assert_eq!(panel.offset(), 700.0);
    dispatch(&panel, PointerEvent::up(50.0, y - 10.0, 60), &mut intercepted);
    assert_eq!(panel.state(), PanelState::Settling);

    robot.settle();
    assert_eq!(panel.state(), PanelState::HalfExpanded);
    assert_eq!(panel.offset(), 400.0);
}

#[test]
fn drag_is_clamped_to_drag_range() {
    let robot = resting(PanelState::Collapsed);
    let panel = robot.panel();
    let mut intercepted = false;
    dispatch(panel, PointerEvent::down(50.0, 920.0, 0), &mut intercepted);
    dispatch(panel, PointerEvent::moved(50.0, 905.0, 10), &mut intercepted);
    dispatch(panel, PointerEvent::moved(50.0, -5000.0, 20), &mut intercepted);
    assert_eq!(panel.offset(), 100.0);
    dispatch(panel, PointerEvent::moved(50.0, 9000.0, 30), &mut intercepted);
    assert_eq!(panel.offset(), 900.0);
}

#[test]
fn cancel_returns_to_rest_state_before_drag() {
    let mut robot = resting(PanelState::HalfExpanded);
    let panel = robot.panel().clone();
    let mut intercepted = false;
    dispatch(&panel, PointerEvent::down(50.0, 410.0, 0), &mut intercepted);
    dispatch(&panel, PointerEvent::moved(50.0, 430.0, 10), &mut intercepted);
    dispatch(&panel, PointerEvent::moved(50.0, 800.0, 20), &mut intercepted);
    assert_eq!(panel.offset(), 770.0);
    dispatch(&panel, PointerEvent::cancel(50.0, 800.0, 30), &mut intercepted);

    robot.settle();
    assert_eq!(panel.state(), PanelState::HalfExpanded);
    assert_eq!(panel.offset(), 400.0);
}

#[test]
fn down_outside_panel_never_captures() {
    let robot = resting(PanelState::Collapsed);
    let panel = robot.panel();
    let mut intercepted = false;
    dispatch(panel, PointerEvent::down(50.0, 500.0, 0), &mut intercepted);
    dispatch(panel, PointerEvent::moved(50.0, 300.0, 10), &mut intercepted);
    assert!(!intercepted);
    assert!(!panel.on_pointer_event(&PointerEvent::moved(50.0, 250.0, 20)));
    assert_eq!(panel.state(), PanelState::Collapsed);
    assert_eq!(panel.offset(), 900.0);
}

#[test]
fn hidden_host_element_takes_no_gestures() {
    let robot = resting(PanelState::Collapsed);
    robot.host().set_shown(false);
    assert!(!robot
        .panel()
        .on_intercept_pointer_event(&PointerEvent::down(50.0, 920.0, 0)));
    assert!(!robot
        .panel()
        .on_pointer_event(&PointerEvent::moved(50.0, 700.0, 10)));
    assert_eq!(robot.panel().state(), PanelState::Collapsed);
}

#[test]
fn new_capture_makes_running_settle_stale() {
    let mut robot = resting(PanelState::Collapsed);
    robot.panel().set_state(PanelState::FullExpanded).unwrap();
    robot.advance_frames(3);
    let caught_at = robot.panel().offset();
    assert!(caught_at < 900.0 && caught_at > 100.0);

    let down = PointerEvent::down(50.0, caught_at + 20.0, 0);
    assert!(robot.panel().on_intercept_pointer_event(&down));
    assert_eq!(robot.panel().state(), PanelState::Dragging);
    robot.advance_frames(30);
    assert_eq!(robot.panel().offset(), caught_at);
    assert_eq!(robot.panel().state(), PanelState::Dragging);
}

#[test]
fn programmatic_state_cancels_drag() {
    let mut robot = resting(PanelState::Collapsed);
    let panel = robot.panel().clone();
    let mut intercepted = false;
    dispatch(&panel, PointerEvent::down(50.0, 920.0, 0), &mut intercepted);
    dispatch(&panel, PointerEvent::moved(50.0, 905.0, 10), &mut intercepted);
    dispatch(&panel, PointerEvent::moved(50.0, 700.0, 20), &mut intercepted);

    panel.set_state(PanelState::FullExpanded).unwrap();
    assert!(!panel.on_pointer_event(&PointerEvent::moved(50.0, 800.0, 30)));
    robot.settle();
    assert_eq!(panel.state(), PanelState::FullExpanded);
    assert_eq!(panel.offset(), 100.0);
}

#[test]
fn nested_scroll_up_consumes_to_full_expanded() {
    let robot = resting(PanelState::HalfExpanded);
    let panel = robot.panel();
    assert!(panel.on_start_nested_scroll(LIST, ScrollAxes::VERTICAL));
    assert_eq!(panel.on_nested_pre_scroll(LIST, 280.0), 280.0);
    assert_eq!(panel.offset(), 120.0);
    assert_eq!(panel.state(), PanelState::Dragging);

    assert_eq!(panel.on_nested_pre_scroll(LIST, 30.0), 20.0);
    assert_eq!(panel.offset(), 100.0);
    assert_eq!(panel.state(), PanelState::FullExpanded);

    panel.on_stop_nested_scroll(LIST);
    assert_eq!(panel.state(), PanelState::FullExpanded);
    assert!(!robot.runtime().needs_frame());
}

#[test]
fn nested_scroll_down_waits_for_content_top() {
    let robot = resting(PanelState::FullExpanded);
    let panel = robot.panel();
    robot.host().set_list_scroll(200.0);
    panel.on_start_nested_scroll(LIST, ScrollAxes::VERTICAL);
    assert_eq!(panel.on_nested_pre_scroll(LIST, -40.0), 0.0);
    assert_eq!(panel.offset(), 100.0);

    robot.host().set_list_scroll(0.0);
    assert_eq!(panel.on_nested_pre_scroll(LIST, -40.0), -40.0);
    assert_eq!(panel.offset(), 140.0);
}

#[test]
fn nested_scroll_from_unknown_target_is_ignored() {
    let robot = resting(PanelState::HalfExpanded);
    assert_eq!(robot.panel().on_nested_pre_scroll(EXPANDED, 50.0), 0.0);
    assert_eq!(robot.panel().offset(), 400.0);
    assert!(!robot.panel().on_nested_pre_fling(EXPANDED, -900.0));
}

#[test]
fn nested_scroll_stop_snaps_in_last_direction() {
    let mut robot = resting(PanelState::HalfExpanded);
    let panel = robot.panel().clone();
    panel.on_start_nested_scroll(LIST, ScrollAxes::VERTICAL);
    panel.on_nested_pre_scroll(LIST, -50.0);
    assert_eq!(panel.offset(), 450.0);
    panel.on_stop_nested_scroll(LIST);
    assert_eq!(panel.state(), PanelState::Settling);
    robot.settle();
    assert_eq!(panel.state(), PanelState::Collapsed);
}

#[test]
fn pre_fling_is_claimed_until_fully_expanded() {
    let mut robot = resting(PanelState::HalfExpanded);
    assert!(robot.panel().on_nested_pre_fling(LIST, -900.0));
    robot.panel().set_state(PanelState::FullExpanded).unwrap();
    robot.settle();
    assert!(!robot.panel().on_nested_pre_fling(LIST, -900.0));
}

#[test]
fn expanded_content_tracks_collapsed_offset() {
    let robot = resting(PanelState::Collapsed);
    let panel = robot.panel();
    assert_eq!(robot.host().is_visible(EXPANDED), Some(false));
    assert!(!panel.is_expanded_content_visible());

    let mut intercepted = false;
    dispatch(panel, PointerEvent::down(50.0, 920.0, 0), &mut intercepted);
    dispatch(panel, PointerEvent::moved(50.0, 905.0, 10), &mut intercepted);
    dispatch(panel, PointerEvent::moved(50.0, 855.0, 20), &mut intercepted);
    assert_eq!(robot.host().is_visible(EXPANDED), Some(true));

    dispatch(panel, PointerEvent::moved(50.0, 905.0, 30), &mut intercepted);
    assert_eq!(panel.offset(), 900.0);
    assert_eq!(robot.host().is_visible(EXPANDED), Some(false));
}

#[test]
fn missing_panel_skips_layout() {
    let mut robot = PanelRobot::unlaid(host(), config());
    robot.host().remove_panel();
    robot.layout();
    assert!(!robot.panel().is_laid_out());
    assert_eq!(robot.panel().collapsed_offset(), 0.0);
}

#[test]
fn set_full_expanded_offset_replaces_resting_panel() {
    let robot = resting(PanelState::FullExpanded);
    robot.panel().set_full_expanded_offset(200.0);
    assert_eq!(robot.panel().full_expanded_offset(), 200.0);
    assert_eq!(robot.panel().offset(), 200.0);
    assert_eq!(robot.host().panel_top(), 200.0);
    assert!(robot.recorder().state_changes().is_empty());
}

struct HideWhenCollapsed {
    hidden: Cell<bool>,
}

impl PanelCallback for HideWhenCollapsed {
    fn on_state_changed(&self, panel: &ScrollPanel, _old: PanelState, new: PanelState) {
        if new == PanelState::Collapsed && !self.hidden.get() {
            self.hidden.set(true);
            panel.hide();
        }
    }

    fn on_slide(&self, _panel: &ScrollPanel, _offset: f32) {}
}

#[test]
fn listener_may_drive_the_panel() {
    let robot = resting(PanelState::HalfExpanded);
    robot.panel().set_listener(Some(Rc::new(HideWhenCollapsed {
        hidden: Cell::new(false),
    })));
    robot.panel().show_collapsed();
    assert_eq!(robot.panel().state(), PanelState::Hidden);
    assert_eq!(robot.panel().offset(), 1000.0);
}
