use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use slidepanel_core::{DefaultScheduler, Runtime};

use super::*;

const FRAME: u64 = 16_666_667;

fn animator(runtime: &Runtime) -> SettleAnimator {
    SettleAnimator::new(runtime.frame_clock(), Easing::LinearEasing)
}

#[test]
fn no_travel_returns_no_token() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut settle = animator(&runtime);
    assert_eq!(settle.start(300.0, 300.0, PanelState::HalfExpanded, 200), None);
    assert!(!settle.is_running());
}

#[test]
fn steps_to_target_then_stops() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut settle = animator(&runtime);
    let token = settle.start(500.0, 300.0, PanelState::HalfExpanded, 100).unwrap();
    assert_eq!(settle.target(), Some(PanelState::HalfExpanded));

    let first = settle.step(token, 0).unwrap();
    assert_eq!(first.offset, 500.0);
    assert!(first.running);

    let mut last = first;
    let mut frame = 1;
    while last.running {
        last = settle.step(token, frame * FRAME).unwrap();
        frame += 1;
    }
    assert_eq!(last.offset, 300.0);
    assert_eq!(last.target, PanelState::HalfExpanded);
    assert!(!settle.is_running());
    assert!(settle.step(token, frame * FRAME).is_none());
}

#[test]
fn restart_makes_old_token_stale() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut settle = animator(&runtime);
    let first = settle.start(500.0, 300.0, PanelState::HalfExpanded, 100).unwrap();
    let second = settle.start(500.0, 100.0, PanelState::FullExpanded, 100).unwrap();
    assert_ne!(first, second);
    assert!(settle.step(first, 0).is_none());
    assert_eq!(settle.step(second, 0).unwrap().target, PanelState::FullExpanded);
}

#[test]
fn invalidate_cancels_pending_frame() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut settle = animator(&runtime);
    let fired = Rc::new(Cell::new(false));
    let token = settle.start(500.0, 300.0, PanelState::HalfExpanded, 100).unwrap();
    let flag = Rc::clone(&fired);
    settle.schedule(move |_| flag.set(true));
    assert!(runtime.needs_frame());

    settle.invalidate();
    assert!(!settle.is_current(token));
    runtime.handle().drain_frame_callbacks(0);
    assert!(!fired.get());
}

#[test]
fn scheduled_frame_fires_on_drain() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut settle = animator(&runtime);
    let fired = Rc::new(Cell::new(0u64));
    settle.start(500.0, 300.0, PanelState::HalfExpanded, 100).unwrap();
    let seen = Rc::clone(&fired);
    settle.schedule(move |time| seen.set(time));
    runtime.handle().drain_frame_callbacks(42);
    assert_eq!(fired.get(), 42);
}
