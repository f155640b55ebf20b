//! Robot-style driver for a panel on a [`FakePanelHost`].
//!
//! The robot routes pointer events the way a container would: each event is
//! offered to the panel's intercept hook until the panel claims the gesture,
//! after which it goes straight to the panel. A gesture that starts on the
//! list is handled by the list itself, which turns finger movement into
//! nested scroll offered to the panel first.
//!
//! # Example
//!
//! ```
//! use slidepanel::{PanelConfig, PanelState};
//! use slidepanel_testing::{FakePanelHost, PanelRobot};
//!
//! let host = FakePanelHost::builder().with_list(3000.0).build();
//! let config = PanelConfig::default().with_half_expanded_offset(400.0);
//! let mut robot = PanelRobot::new(host, config);
//! robot.show_collapsed();
//!
//! robot.drag(200.0, 950.0, 600.0, 8);
//! robot.settle();
//! assert_eq!(robot.panel().state(), PanelState::HalfExpanded);
//! ```

use std::rc::Rc;
use std::sync::Arc;

use slidepanel::{PanelConfig, PanelHost, ScrollPanel};
use slidepanel_core::{DefaultScheduler, Runtime};
use slidepanel_foundation::{PointerEvent, ScrollAxes};

use crate::host::{FakePanelHost, LIST, PANEL};
use crate::recording::RecordingCallback;

/// Nanoseconds per 60 Hz frame.
pub const FRAME_NANOS: u64 = 16_666_667;
/// Pointer samples are this far apart unless told otherwise.
pub const DEFAULT_EVENT_INTERVAL_MS: i64 = 10;
const MAX_SETTLE_FRAMES: usize = 600;

#[derive(Debug, Clone, Copy)]
struct GestureRoute {
    intercepted: bool,
    on_list: bool,
    nested_started: bool,
    last_y: f32,
    /// Last list-driven scroll delta, for the fling estimate on release.
    last_scroll_dy: f32,
}

/// Drives a [`ScrollPanel`] through pointer, nested-scroll and frame input.
pub struct PanelRobot {
    runtime: Runtime,
    host: Rc<FakePanelHost>,
    panel: ScrollPanel,
    recorder: Rc<RecordingCallback>,
    uptime_ms: i64,
    frame_time_nanos: u64,
    gesture: Option<GestureRoute>,
    last_fling_claimed: Option<bool>,
}

impl PanelRobot {
    /// Creates the panel on `host` and lays it out once.
    pub fn new(host: Rc<FakePanelHost>, config: PanelConfig) -> Self {
        let robot = Self::unlaid(host, config);
        robot.panel.on_layout();
        robot
    }

    /// Like [`new`](Self::new) but without the initial layout.
    pub fn unlaid(host: Rc<FakePanelHost>, config: PanelConfig) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let panel = ScrollPanel::new(host.clone(), PANEL, config, runtime.frame_clock());
        let recorder = Rc::new(RecordingCallback::new());
        panel.set_listener(Some(recorder.clone()));
        Self {
            runtime,
            host,
            panel,
            recorder,
            uptime_ms: 0,
            frame_time_nanos: 0,
            gesture: None,
            last_fling_claimed: None,
        }
    }

    pub fn panel(&self) -> &ScrollPanel {
        &self.panel
    }

    pub fn host(&self) -> &FakePanelHost {
        &self.host
    }

    pub fn recorder(&self) -> &RecordingCallback {
        &self.recorder
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn layout(&mut self) {
        self.panel.on_layout();
    }

    /// Jumps to collapsed and forgets what the listener heard so far.
    pub fn show_collapsed(&mut self) {
        self.panel.show_collapsed();
        self.recorder.clear();
    }

    /// Whether the last list release let the panel claim the fling.
    pub fn last_fling_claimed(&self) -> Option<bool> {
        self.last_fling_claimed
    }

    pub fn advance_uptime(&mut self, millis: i64) {
        self.uptime_ms += millis;
    }

    // Pointer input

    pub fn press(&mut self, x: f32, y: f32) {
        let on_list = self
            .host
            .bounds(LIST)
            .is_some_and(|rect| rect.contains(x, y));
        let event = PointerEvent::down(x, y, self.uptime_ms);
        let intercepted = self.panel.on_intercept_pointer_event(&event);
        if intercepted {
            self.panel.on_pointer_event(&event);
        }
        log::trace!("robot press at ({x}, {y}), on list: {on_list}, intercepted: {intercepted}");
        self.gesture = Some(GestureRoute {
            intercepted,
            on_list,
            nested_started: false,
            last_y: y,
            last_scroll_dy: 0.0,
        });
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.uptime_ms += DEFAULT_EVENT_INTERVAL_MS;
        let Some(mut route) = self.gesture else {
            return;
        };
        let event = PointerEvent::moved(x, y, self.uptime_ms);
        if route.intercepted {
            self.panel.on_pointer_event(&event);
        } else if self.panel.on_intercept_pointer_event(&event) {
            route.intercepted = true;
            if route.nested_started {
                self.panel.on_stop_nested_scroll(LIST);
                route.nested_started = false;
            }
        } else if route.on_list {
            let dy = route.last_y - y;
            if dy != 0.0 {
                if !route.nested_started {
                    route.nested_started = self
                        .panel
                        .on_start_nested_scroll(LIST, ScrollAxes::VERTICAL);
                }
                if route.nested_started {
                    let consumed = self.panel.on_nested_pre_scroll(LIST, dy);
                    self.host.scroll_list(dy - consumed);
                }
                route.last_scroll_dy = dy;
            }
        }
        route.last_y = y;
        self.gesture = Some(route);
    }

    pub fn release(&mut self) {
        self.finish(false);
    }

    pub fn cancel(&mut self) {
        self.finish(true);
    }

    fn finish(&mut self, cancelled: bool) {
        let Some(route) = self.gesture.take() else {
            return;
        };
        self.uptime_ms += DEFAULT_EVENT_INTERVAL_MS;
        let (x, y) = (0.0, route.last_y);
        let event = if cancelled {
            PointerEvent::cancel(x, y, self.uptime_ms)
        } else {
            PointerEvent::up(x, y, self.uptime_ms)
        };
        if route.intercepted {
            self.panel.on_pointer_event(&event);
        } else {
            self.panel.on_intercept_pointer_event(&event);
        }
        if route.nested_started {
            if !cancelled && route.last_scroll_dy != 0.0 {
                // px per event interval, as px/s downwards.
                let velocity =
                    -route.last_scroll_dy * 1000.0 / DEFAULT_EVENT_INTERVAL_MS as f32;
                self.last_fling_claimed = Some(self.panel.on_nested_pre_fling(LIST, velocity));
            }
            self.panel.on_stop_nested_scroll(LIST);
        }
    }

    /// Press at `from_y`, move to `to_y` in `steps` equal moves, release.
    pub fn drag(&mut self, x: f32, from_y: f32, to_y: f32, steps: usize) {
        self.press(x, from_y);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.move_to(x, from_y + (to_y - from_y) * t);
        }
        self.release();
    }

    // Nested scroll the list performs on its own

    /// One nested scroll of the list: start, one pre-scroll per delta, stop.
    /// Positive deltas scroll content up. Returns what the panel consumed.
    pub fn nested_scroll(&mut self, deltas: &[f32]) -> Vec<f32> {
        if !self.panel.on_start_nested_scroll(LIST, ScrollAxes::VERTICAL) {
            return Vec::new();
        }
        let consumed = deltas
            .iter()
            .map(|&dy| {
                let consumed = self.panel.on_nested_pre_scroll(LIST, dy);
                self.host.scroll_list(dy - consumed);
                consumed
            })
            .collect();
        self.panel.on_stop_nested_scroll(LIST);
        consumed
    }

    // Frames

    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_NANOS;
        self.runtime
            .handle()
            .drain_frame_callbacks(self.frame_time_nanos);
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Pumps frames until nothing is scheduled. Returns how many ran.
    ///
    /// Panics if the panel is still asking for frames after ten seconds of
    /// simulated time.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.needs_frame() {
            assert!(
                frames < MAX_SETTLE_FRAMES,
                "panel still settling after {MAX_SETTLE_FRAMES} frames"
            );
            self.advance_frame();
            frames += 1;
        }
        frames
    }
}

impl std::fmt::Debug for PanelRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelRobot")
            .field("panel", &self.panel)
            .field("uptime_ms", &self.uptime_ms)
            .field("frame_time_nanos", &self.frame_time_nanos)
            .finish()
    }
}
