use slidepanel::{PanelConfig, PanelState};
use slidepanel_testing::robot_assertions::{assert_approx_eq, assert_rests_at};
use slidepanel_testing::{FakePanelHost, PanelRobot};

fn robot_at(state: PanelState) -> PanelRobot {
    let host = FakePanelHost::builder().with_list(3000.0).build();
    let config = PanelConfig::default()
        .with_full_expanded_offset(100.0)
        .with_half_expanded_offset(400.0);
    let mut robot = PanelRobot::new(host, config);
    robot.show_collapsed();
    robot.panel().set_state(state).unwrap();
    robot.settle();
    robot.recorder().clear();
    robot
}

#[test]
fn scroll_up_stops_exactly_at_full_expanded() {
    let mut robot = robot_at(PanelState::HalfExpanded);
    let consumed = robot.nested_scroll(&[280.0, 30.0]);
    assert_eq!(consumed, vec![280.0, 20.0]);
    assert_rests_at(robot.panel(), PanelState::FullExpanded, "scroll up");
    assert_approx_eq(robot.host().list_scroll(), 10.0, 0.001, "list takes the rest");
}

#[test]
fn list_gesture_moves_panel_before_content() {
    let mut robot = robot_at(PanelState::HalfExpanded);
    robot.press(200.0, 600.0);
    let mut y = 600.0;
    for _ in 0..7 {
        y -= 50.0;
        robot.move_to(200.0, y);
    }
    assert_eq!(robot.panel().state(), PanelState::FullExpanded);
    assert_eq!(robot.panel().offset(), 100.0);
    assert_eq!(robot.host().list_scroll(), 50.0);

    robot.release();
    assert_eq!(robot.last_fling_claimed(), Some(false));
    assert_eq!(robot.settle(), 0);
    assert_rests_at(robot.panel(), PanelState::FullExpanded, "list gesture");
}

#[test]
fn scrolled_list_returns_to_top_before_panel_moves() {
    let mut robot = robot_at(PanelState::FullExpanded);
    robot.host().set_list_scroll(200.0);
    robot.press(200.0, 500.0);
    let mut y = 500.0;
    for _ in 0..4 {
        y += 50.0;
        robot.move_to(200.0, y);
    }
    assert_eq!(robot.host().list_scroll(), 0.0);
    assert_eq!(robot.panel().offset(), 100.0);

    for _ in 0..2 {
        y += 50.0;
        robot.move_to(200.0, y);
    }
    assert_eq!(robot.panel().offset(), 200.0);
    assert_eq!(robot.panel().state(), PanelState::Dragging);

    robot.release();
    assert_eq!(robot.last_fling_claimed(), Some(true));
    robot.settle();
    assert_rests_at(robot.panel(), PanelState::HalfExpanded, "scroll down");
}

#[test]
fn scroll_down_stops_at_collapsed() {
    let mut robot = robot_at(PanelState::HalfExpanded);
    let consumed = robot.nested_scroll(&[-300.0, -300.0]);
    assert_eq!(consumed, vec![-300.0, -200.0]);
    assert_rests_at(robot.panel(), PanelState::Collapsed, "scroll down");
    assert_eq!(
        robot.host().is_visible(slidepanel_testing::host::EXPANDED),
        Some(false)
    );
}

#[test]
fn scroll_end_between_anchors_settles() {
    let mut robot = robot_at(PanelState::HalfExpanded);
    robot.nested_scroll(&[60.0]);
    assert_eq!(robot.panel().state(), PanelState::Settling);
    robot.settle();
    assert_rests_at(robot.panel(), PanelState::FullExpanded, "settle after scroll");
}

#[test]
fn programmatic_state_overrides_nested_scroll() {
    let mut robot = robot_at(PanelState::HalfExpanded);
    assert!(robot
        .panel()
        .on_start_nested_scroll(slidepanel_testing::host::LIST, slidepanel::ScrollAxes::VERTICAL));
    robot
        .panel()
        .on_nested_pre_scroll(slidepanel_testing::host::LIST, 50.0);
    robot.panel().set_state(PanelState::Collapsed).unwrap();
    robot
        .panel()
        .on_stop_nested_scroll(slidepanel_testing::host::LIST);
    robot.settle();
    assert_rests_at(robot.panel(), PanelState::Collapsed, "override");
}

#[test]
fn list_is_reset_to_top_on_first_layout() {
    let robot = robot_at(PanelState::HalfExpanded);
    assert_eq!(robot.host().scroll_resets(), 1);
    assert_eq!(robot.host().list_scroll(), 0.0);
}

#[test]
fn content_scroll_alone_keeps_panel_where_it_rests() {
    let mut robot = robot_at(PanelState::HalfExpanded);
    robot.host().set_list_scroll(200.0);
    let consumed = robot.nested_scroll(&[-10.0]);
    assert_eq!(consumed, vec![0.0]);
    assert_eq!(robot.host().list_scroll(), 190.0);
    assert_eq!(robot.settle(), 0);
    assert_rests_at(robot.panel(), PanelState::HalfExpanded, "content scroll");
    assert!(robot.recorder().state_changes().is_empty());
}
