use std::cell::Cell;
use std::rc::Rc;

use anyhow::Context;
use log::{debug, info};
use slidepanel::{PanelCallback, PanelConfig, PanelError, PanelState, ScrollPanel};
use slidepanel_testing::{FakePanelHost, PanelRobot};
use web_time::Instant;

/// Logs every notification and keeps a tally for the summary line.
#[derive(Default)]
struct LoggingCallback {
    transitions: Cell<usize>,
    slides: Cell<usize>,
}

impl PanelCallback for LoggingCallback {
    fn on_state_changed(&self, _panel: &ScrollPanel, old: PanelState, new: PanelState) {
        self.transitions.set(self.transitions.get() + 1);
        info!("state {old} -> {new}");
    }

    fn on_slide(&self, _panel: &ScrollPanel, offset: f32) {
        self.slides.set(self.slides.get() + 1);
        debug!("slide top={offset:.1}");
    }

    fn on_expanded_content_visibility(&self, _panel: &ScrollPanel, visible: bool) {
        info!("expanded content visible={visible}");
    }
}

fn scene(name: &str, robot: &mut PanelRobot, script: impl FnOnce(&mut PanelRobot)) {
    let started = Instant::now();
    script(robot);
    let frames = robot.settle();
    info!(
        "{name}: resting {} at top={:.1} after {frames} frames ({:?})",
        robot.panel().state(),
        robot.panel().offset(),
        started.elapsed()
    );
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let host = FakePanelHost::builder()
        .container(400.0, 1000.0)
        .with_list(3000.0)
        .build();
    let config = PanelConfig::default()
        .with_full_expanded_offset(100.0)
        .with_half_expanded_offset(400.0);
    let mut robot = PanelRobot::new(host, config);

    let callback = Rc::new(LoggingCallback::default());
    robot.panel().set_listener(Some(callback.clone()));

    scene("show collapsed", &mut robot, |robot| robot.panel().show_collapsed());
    scene("fling to half", &mut robot, |robot| {
        robot.drag(200.0, 950.0, 600.0, 8);
    });
    scene("drag toward full", &mut robot, |robot| {
        robot.drag(200.0, 420.0, 150.0, 40);
    });
    scene("list scroll", &mut robot, |robot| {
        let consumed = robot.nested_scroll(&[40.0, 40.0, -40.0]);
        info!("panel consumed {consumed:?}");
    });
    scene("drag down", &mut robot, |robot| {
        robot.drag(200.0, 150.0, 900.0, 10);
    });

    robot
        .panel()
        .set_state(PanelState::HalfExpanded)
        .context("expanding programmatically")?;
    robot.settle();

    match robot.panel().set_state(PanelState::Dragging) {
        Err(err @ PanelError::IllegalState { .. }) => info!("rejected: {err}"),
        other => anyhow::bail!("dragging is not a rest state, got {other:?}"),
    }

    robot.panel().hide();
    info!(
        "done: {} transitions, {} slides, final state {}",
        callback.transitions.get(),
        callback.slides.get(),
        robot.panel().state()
    );
    Ok(())
}
