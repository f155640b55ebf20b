use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slidepanel_animation::settle_duration_millis;
use slidepanel_core::FrameClock;
use slidepanel_foundation::{PointerEvent, PointerEventKind, ScrollAxes};

use crate::anchors::{AnchorGeometry, AnchorModel, AnchorSet};
use crate::arbiter::{ArbiterContext, GestureArbiter};
use crate::config::PanelConfig;
use crate::drag::{resolve_snap_target, DragController, SnapDirection};
use crate::error::PanelError;
use crate::host::{find_scrolling_child, ElementId, PanelHost};
use crate::listener::PanelCallback;
use crate::nested_scroll::{NestedScrollCoordinator, StopOutcome};
use crate::settle::SettleAnimator;
use crate::state::{PanelEvent, PanelState, PanelStateMachine};

/// Elements the controller tracks under its panel.
#[derive(Debug, Clone, Copy)]
struct PanelElements {
    panel: ElementId,
    /// Child 0, visible while collapsed.
    collapsed: Option<ElementId>,
    /// Child 1, shown only while the panel is expanded.
    expanded: Option<ElementId>,
    scroll_child: Option<ElementId>,
}

struct PanelInner {
    weak_self: Weak<RefCell<PanelInner>>,
    host: Rc<dyn PanelHost>,
    config: PanelConfig,
    elements: PanelElements,
    anchors: AnchorModel,
    machine: PanelStateMachine,
    arbiter: GestureArbiter,
    drag: DragController,
    nested: NestedScrollCoordinator,
    settle: SettleAnimator,
    /// Rest state requested before the first layout.
    pending_state: Option<PanelState>,
    listener: Option<Rc<dyn PanelCallback>>,
}

/// Controller for one bottom sliding panel.
///
/// Cloning yields another handle to the same panel. The host feeds it layout
/// passes, pointer events and nested-scroll events; frame callbacks registered
/// on the [`FrameClock`] drive settles.
#[derive(Clone)]
pub struct ScrollPanel {
    inner: Rc<RefCell<PanelInner>>,
}

impl ScrollPanel {
    pub fn new(
        host: Rc<dyn PanelHost>,
        panel: ElementId,
        config: PanelConfig,
        frame_clock: FrameClock,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak_self| {
            RefCell::new(PanelInner {
                weak_self: weak_self.clone(),
                host,
                anchors: AnchorModel::new(config.full_expanded_offset, config.half_expanded_offset),
                machine: PanelStateMachine::new(),
                arbiter: GestureArbiter::new(config.view_configuration.touch_slop),
                drag: DragController::new(config.view_configuration),
                nested: NestedScrollCoordinator::new(),
                settle: SettleAnimator::new(frame_clock, config.settle_easing),
                elements: PanelElements {
                    panel,
                    collapsed: None,
                    expanded: None,
                    scroll_child: None,
                },
                config,
                pending_state: None,
                listener: None,
            })
        });
        Self { inner }
    }

    pub fn element(&self) -> ElementId {
        self.inner.borrow().elements.panel
    }

    /// Recomputes anchors from the host and re-places the panel for its
    /// current state. The first pass applies any rest state requested before
    /// it.
    pub fn on_layout(&self) {
        self.inner.borrow_mut().layout();
        self.flush();
    }

    /// Offers an event before it reaches the panel's children. Returning
    /// `true` asks the host to route the rest of the gesture to
    /// [`on_pointer_event`](Self::on_pointer_event).
    pub fn on_intercept_pointer_event(&self, event: &PointerEvent) -> bool {
        let intercepted = self.inner.borrow_mut().intercept(event);
        self.flush();
        intercepted
    }

    /// Handles an event the panel owns. Returns whether it was consumed.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> bool {
        let consumed = self.inner.borrow_mut().touch(event);
        self.flush();
        consumed
    }

    pub fn on_start_nested_scroll(&self, target: ElementId, axes: ScrollAxes) -> bool {
        self.inner.borrow_mut().nested.start(target, axes)
    }

    /// Offers a scroll delta before `target` scrolls. Positive `dy` scrolls
    /// content up. Returns the part the panel consumed.
    pub fn on_nested_pre_scroll(&self, target: ElementId, dy: f32) -> f32 {
        let consumed = self.inner.borrow_mut().nested_pre_scroll(target, dy);
        self.flush();
        consumed
    }

    pub fn on_stop_nested_scroll(&self, target: ElementId) {
        self.inner.borrow_mut().stop_nested_scroll(target);
        self.flush();
    }

    /// Whether the panel claims a fling of `target`, keeping the content
    /// from flinging.
    pub fn on_nested_pre_fling(&self, target: ElementId, _velocity_y: f32) -> bool {
        let inner = self.inner.borrow();
        inner.elements.scroll_child == Some(target)
            && NestedScrollCoordinator::pre_fling(inner.machine.state())
    }

    /// Moves the panel off-screen at once.
    pub fn hide(&self) {
        self.inner.borrow_mut().force_rest(PanelState::Hidden);
        self.flush();
    }

    /// Moves the panel to the collapsed anchor at once.
    pub fn show_collapsed(&self) {
        self.inner.borrow_mut().force_rest(PanelState::Collapsed);
        self.flush();
    }

    /// Animates to `target`, a rest state.
    ///
    /// Before the first layout the request is stored and applied, without
    /// animation, by that layout; [`state`](Self::state) keeps reporting the
    /// current state until then.
    pub fn set_state(&self, target: PanelState) -> Result<(), PanelError> {
        let result = self.inner.borrow_mut().set_state(target);
        self.flush();
        result
    }

    /// [`set_state`](Self::set_state) from a raw state code.
    pub fn set_state_code(&self, raw: i32) -> Result<(), PanelError> {
        self.set_state(PanelState::try_from(raw)?)
    }

    pub fn state(&self) -> PanelState {
        self.inner.borrow().machine.state()
    }

    pub fn pending_state(&self) -> Option<PanelState> {
        self.inner.borrow().pending_state
    }

    pub fn is_expanded(&self) -> bool {
        matches!(
            self.state(),
            PanelState::HalfExpanded | PanelState::FullExpanded
        )
    }

    pub fn is_hidden(&self) -> bool {
        self.state() == PanelState::Hidden
    }

    pub fn is_laid_out(&self) -> bool {
        self.inner.borrow().anchors.anchors().is_some()
    }

    /// Current panel top.
    pub fn offset(&self) -> f32 {
        self.inner.borrow().machine.offset()
    }

    pub fn is_expanded_content_visible(&self) -> bool {
        self.inner.borrow().machine.expanded_visible()
    }

    pub fn anchors(&self) -> Option<AnchorSet> {
        self.inner.borrow().anchors.anchors().copied()
    }

    pub fn full_expanded_offset(&self) -> f32 {
        let inner = self.inner.borrow();
        inner
            .anchors
            .anchors()
            .map(|anchors| anchors.full_expanded)
            .unwrap_or_else(|| inner.anchors.configured_full_expanded())
    }

    pub fn half_expanded_offset(&self) -> f32 {
        let inner = self.inner.borrow();
        inner
            .anchors
            .anchors()
            .map(|anchors| anchors.half_expanded)
            .unwrap_or_else(|| inner.anchors.configured_half_expanded())
    }

    /// Zero until the first layout.
    pub fn collapsed_offset(&self) -> f32 {
        self.inner
            .borrow()
            .anchors
            .anchors()
            .map(|anchors| anchors.collapsed)
            .unwrap_or(0.0)
    }

    /// Changes the full-expanded anchor. A laid out panel resting on an
    /// anchor is re-placed on the new anchors right away, and a settle in
    /// flight heads for its target's new anchor instead.
    pub fn set_full_expanded_offset(&self, offset: f32) {
        self.inner.borrow_mut().set_full_expanded_offset(offset);
        self.flush();
    }

    pub fn set_listener(&self, listener: Option<Rc<dyn PanelCallback>>) {
        self.inner.borrow_mut().listener = listener;
    }

    pub fn is_settling(&self) -> bool {
        self.inner.borrow().settle.is_running()
    }

    fn on_settle_frame(&self, token: u64, frame_time_nanos: u64) {
        self.inner
            .borrow_mut()
            .advance_settle(token, frame_time_nanos);
        self.flush();
    }

    /// Delivers queued side effects with no borrow held.
    fn flush(&self) {
        let (events, host, listener, elements) = {
            let mut inner = self.inner.borrow_mut();
            let events = inner.machine.take_events();
            if events.is_empty() {
                return;
            }
            (
                events,
                Rc::clone(&inner.host),
                inner.listener.clone(),
                inner.elements,
            )
        };

        for event in events {
            match event {
                PanelEvent::StateChanged { old, new } => {
                    if let Some(listener) = listener.as_ref() {
                        listener.on_state_changed(self, old, new);
                    }
                }
                PanelEvent::Slide(offset) => {
                    host.set_panel_top(elements.panel, offset);
                    if let Some(listener) = listener.as_ref() {
                        listener.on_slide(self, offset);
                    }
                }
                PanelEvent::Placed(offset) => host.set_panel_top(elements.panel, offset),
                PanelEvent::ExpandedVisibility(visible) => {
                    if let Some(expanded) = elements.expanded {
                        host.set_visible(expanded, visible);
                    }
                    if let Some(listener) = listener.as_ref() {
                        listener.on_expanded_content_visibility(self, visible);
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for ScrollPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("ScrollPanel")
                .field("element", &inner.elements.panel)
                .field("state", &inner.machine.state())
                .field("offset", &inner.machine.offset())
                .field("anchors", &inner.anchors.anchors())
                .finish(),
            Err(_) => f.debug_struct("ScrollPanel").finish_non_exhaustive(),
        }
    }
}

impl PanelInner {
    fn laid_out_anchors(&self) -> Option<AnchorSet> {
        self.anchors.anchors().copied()
    }

    fn layout(&mut self) {
        let host = Rc::clone(&self.host);
        let panel = self.elements.panel;
        if host.bounds(panel).is_none() {
            log::warn!("panel {panel} is no longer in the tree, skipping layout");
            return;
        }

        let collapsed = host.child_at(panel, 0);
        let expanded = host.child_at(panel, 1);
        if collapsed.is_none() || expanded.is_none() {
            log::warn!("panel {panel} should have a collapsed and an expanded child");
        }
        let collapsed_content_height = collapsed
            .and_then(|id| host.bounds(id))
            .map(|rect| rect.height)
            .unwrap_or(0.0);
        let full_expanded_override = self.config.below_to.and_then(|id| {
            let bottom = host.bounds(id).map(|rect| rect.bottom());
            if bottom.is_none() {
                log::debug!("below-to element {id} not found, using configured offset");
            }
            bottom
        });

        let previous = self.laid_out_anchors();
        let anchors = self.anchors.recompute(AnchorGeometry {
            container_height: host.container_size().height,
            collapsed_content_height,
            vertical_padding: host.padding(panel).vertical_sum(),
            full_expanded_override,
        });
        self.elements.collapsed = collapsed;
        self.elements.expanded = expanded;
        self.machine.set_anchors(&anchors);

        match self.pending_state.take() {
            Some(pending) => {
                if let Some(offset) = anchors.offset_for(pending) {
                    self.machine.place(offset);
                }
                self.machine.apply_state(pending);
            }
            None => {
                let offset = anchors
                    .offset_for(self.machine.state())
                    .unwrap_or_else(|| self.machine.offset());
                self.machine.place(offset);
            }
        }
        self.machine.announce_visibility();
        if previous.is_some_and(|previous| previous != anchors) {
            self.retarget_settle();
        }

        let scroll_child = find_scrolling_child(host.as_ref(), panel);
        if scroll_child != self.elements.scroll_child {
            log::debug!("panel {panel} scroll child is now {scroll_child:?}");
            self.elements.scroll_child = scroll_child;
            if let Some(id) = scroll_child {
                host.scroll_to_top(id);
            }
        }
    }

    fn arbiter_context(&self) -> ArbiterContext {
        let scroll_child = self.elements.scroll_child;
        ArbiterContext {
            state: self.machine.state(),
            panel_bounds: self.host.bounds(self.elements.panel),
            scroll_bounds: scroll_child.and_then(|id| self.host.bounds(id)),
            inner_can_scroll_up: scroll_child.is_some_and(|id| self.host.can_scroll_up(id)),
        }
    }

    /// Opens a session for `down` and catches a running settle under it.
    fn begin_gesture(&mut self, down: &PointerEvent) -> bool {
        let ctx = self.arbiter_context();
        let session = self.arbiter.begin(down, &ctx);
        let catches = self.arbiter.catches_settle(&session, down, &ctx);
        self.drag.begin(session);
        if catches {
            self.capture_drag();
        }
        catches
    }

    fn intercept(&mut self, event: &PointerEvent) -> bool {
        if !self.host.is_shown(self.elements.panel) {
            self.drag.ignore_gesture(event);
            return false;
        }
        if self.laid_out_anchors().is_none() {
            return false;
        }

        match event.kind {
            PointerEventKind::Down => self.begin_gesture(event),
            PointerEventKind::Move => {
                let ctx = self.arbiter_context();
                let captured = self.drag.is_captured();
                let Some(session) = self.drag.session_mut() else {
                    return false;
                };
                session.track(event);
                if captured {
                    return true;
                }
                if session.ignore_events {
                    return false;
                }
                let session = session.clone();
                let y = event.y();
                let capture = self.arbiter.exceeds_slop(&session, y)
                    && ctx.in_panel(event.x(), y)
                    && self.arbiter.can_capture(&session, event.id, &ctx);
                let intercept = capture || self.arbiter.should_intercept_move(&session, event, &ctx);
                if let Some(session) = self.drag.session_mut() {
                    session.last_y = y;
                }
                if capture {
                    self.capture_drag();
                }
                intercept
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                self.finish_gesture(event);
                false
            }
        }
    }

    fn touch(&mut self, event: &PointerEvent) -> bool {
        if !self.host.is_shown(self.elements.panel) || self.laid_out_anchors().is_none() {
            return false;
        }
        if self.machine.state() == PanelState::Dragging && event.kind == PointerEventKind::Down {
            return true;
        }

        match event.kind {
            PointerEventKind::Down => {
                if self.drag.session().is_none() {
                    self.begin_gesture(event);
                }
                !self.drag.session().is_some_and(|s| s.ignore_events)
            }
            PointerEventKind::Move => {
                let captured = self.drag.is_captured();
                let Some(session) = self.drag.session_mut() else {
                    return false;
                };
                if session.ignore_events {
                    return false;
                }
                session.track(event);
                let dy = event.y() - session.last_y;
                session.last_y = event.y();
                if captured {
                    self.drag_by(dy);
                } else if self
                    .drag
                    .session()
                    .is_some_and(|session| self.arbiter.exceeds_slop(session, event.y()))
                {
                    // The children passed on this gesture, so it is the panel's.
                    self.capture_drag();
                }
                true
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                let ignored = self.drag.session().is_some_and(|s| s.ignore_events);
                self.finish_gesture(event);
                !ignored
            }
        }
    }

    fn capture_drag(&mut self) {
        let resume_to = match self.machine.state() {
            PanelState::Settling => self.settle.target(),
            PanelState::Dragging => None,
            rest => Some(rest),
        };
        self.settle.invalidate();
        self.nested.reset();
        self.drag.capture(resume_to);
        self.machine.apply_state(PanelState::Dragging);
    }

    fn drag_by(&mut self, dy: f32) {
        let Some(anchors) = self.laid_out_anchors() else {
            return;
        };
        let top = self.machine.offset();
        let target = DragController::drag_target(&anchors, top, dy);
        if target != top {
            self.machine.apply_offset(target);
        }
    }

    /// Ends the gesture. A captured drag is released on up and sent back to
    /// where it started on cancel.
    fn finish_gesture(&mut self, event: &PointerEvent) {
        if event.kind == PointerEventKind::Up {
            if let Some(session) = self.drag.session_mut() {
                session.track(event);
            }
        }
        let velocity = self.drag.release_velocity();
        let resume_to = self.drag.pre_drag_rest();
        if !self.drag.end() {
            return;
        }
        let Some(anchors) = self.laid_out_anchors() else {
            return;
        };
        let top = self.machine.offset();
        let (target, velocity) = match event.kind {
            PointerEventKind::Cancel => (
                resume_to.unwrap_or_else(|| resolve_snap_target(&anchors, top, SnapDirection::Still)),
                0.0,
            ),
            _ => (
                resolve_snap_target(&anchors, top, SnapDirection::from_velocity(velocity)),
                velocity,
            ),
        };
        log::debug!(
            "drag {:?} at {top} with velocity {velocity}, settling to {target}",
            event.kind
        );
        self.settle_or_warn(target, velocity);
    }

    fn nested_pre_scroll(&mut self, target: ElementId, dy: f32) -> f32 {
        if self.elements.scroll_child != Some(target) {
            return 0.0;
        }
        let Some(anchors) = self.laid_out_anchors() else {
            return 0.0;
        };
        let inner_can_scroll_up = dy < 0.0 && self.host.can_scroll_up(target);
        let top = self.machine.offset();
        let outcome = self
            .nested
            .pre_scroll(target, dy, top, &anchors, inner_can_scroll_up);
        if let Some(state) = outcome.state {
            self.settle.invalidate();
            self.machine.apply_state(state);
        }
        if let Some(new_top) = outcome.new_top {
            if new_top != top {
                self.machine.apply_offset(new_top);
            }
        }
        outcome.consumed
    }

    fn stop_nested_scroll(&mut self, target: ElementId) {
        let Some(anchors) = self.laid_out_anchors() else {
            return;
        };
        match self.nested.stop(target, self.machine.offset(), &anchors) {
            StopOutcome::FullExpanded => {
                self.settle.invalidate();
                self.machine.apply_state(PanelState::FullExpanded);
            }
            StopOutcome::Snap(state) => self.settle_or_warn(state, 0.0),
            StopOutcome::Ignore => {}
        }
    }

    /// Drops any gesture or settle in flight.
    fn cancel_gestures(&mut self) {
        if self.drag.end() {
            log::debug!("programmatic change cancels drag on {}", self.elements.panel);
        }
        self.nested.reset();
        self.settle.invalidate();
    }

    fn force_rest(&mut self, state: PanelState) {
        let Some(anchors) = self.laid_out_anchors() else {
            self.pending_state = (state != self.machine.state()).then_some(state);
            return;
        };
        self.cancel_gestures();
        if let Some(offset) = anchors.offset_for(state) {
            self.machine.place(offset);
        }
        self.machine.apply_state(state);
    }

    fn set_state(&mut self, target: PanelState) -> Result<(), PanelError> {
        if !target.is_rest() {
            return Err(PanelError::IllegalState { state: target });
        }
        if self.laid_out_anchors().is_none() {
            log::debug!("panel {} not laid out, deferring {target}", self.elements.panel);
            self.pending_state = (target != self.machine.state()).then_some(target);
            return Ok(());
        }
        if target == self.machine.state() {
            return Ok(());
        }
        self.cancel_gestures();
        self.settle_to(target, 0.0)
    }

    fn set_full_expanded_offset(&mut self, offset: f32) {
        let Some(anchors) = self.anchors.set_full_expanded(offset) else {
            return;
        };
        self.machine.set_anchors(&anchors);
        if let Some(anchor) = anchors.offset_for(self.machine.state()) {
            self.machine.place(anchor);
        }
        self.retarget_settle();
    }

    /// Restarts a running settle towards the current anchor of its target.
    fn retarget_settle(&mut self) {
        if self.machine.state() != PanelState::Settling {
            return;
        }
        let Some(target) = self.settle.target() else {
            return;
        };
        log::debug!(
            "anchors moved under panel {}, re-aiming settle at {target}",
            self.elements.panel
        );
        self.settle_or_warn(target, 0.0);
    }

    fn settle_or_warn(&mut self, target: PanelState, velocity: f32) {
        if let Err(err) = self.settle_to(target, velocity) {
            log::warn!("panel {} settle rejected: {err}", self.elements.panel);
        }
    }

    /// Animates to the anchor of `target`, or switches straight to it when
    /// already there.
    fn settle_to(&mut self, target: PanelState, velocity: f32) -> Result<(), PanelError> {
        let Some(anchors) = self.laid_out_anchors() else {
            return Ok(());
        };
        let to = anchors
            .offset_for(target)
            .ok_or(PanelError::IllegalState { state: target })?;
        let from = self.machine.offset();
        let duration = settle_duration_millis(to - from, velocity, anchors.drag_range(), anchors.hidden);
        match self.settle.start(from, to, target, duration) {
            Some(token) => {
                self.machine.apply_state(PanelState::Settling);
                self.schedule_settle_frame(token);
            }
            None => {
                self.machine.apply_state(target);
            }
        }
        Ok(())
    }

    fn schedule_settle_frame(&mut self, token: u64) {
        let weak = self.weak_self.clone();
        self.settle.schedule(move |frame_time_nanos| {
            if let Some(inner) = weak.upgrade() {
                ScrollPanel { inner }.on_settle_frame(token, frame_time_nanos);
            }
        });
    }

    fn advance_settle(&mut self, token: u64, frame_time_nanos: u64) {
        let Some(step) = self.settle.step(token, frame_time_nanos) else {
            return;
        };
        if step.offset != self.machine.offset() {
            self.machine.apply_offset(step.offset);
        }
        if step.running {
            self.schedule_settle_frame(token);
        } else {
            self.machine.apply_state(step.target);
        }
    }
}
