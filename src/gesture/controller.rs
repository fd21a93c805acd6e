// SPDX-License-Identifier: MPL-2.0
//! Drag-to-dismiss controller.
//!
//! Owns the layout origin, the per-sequence [`DragSession`] and the release
//! policy. Pointer events arrive from the gesture router; the controller
//! reports scales and release intent to a [`DragListener`] and never draws.
//!
//! ```text
//! Idle ──down+commit──► Dragging ──up──┬─ scale < threshold, listener handled ─► Idle
//!   ▲                                  └─ otherwise ─► Settling ──ticks──► Idle
//!   └──────────────── down during Settling re-arms ◄───────┘
//! ```

use crate::config::{defaults, GestureSettings};
use crate::domain::gesture::DismissThreshold;
use crate::gesture::event::{PointerAction, PointerEvent, PointerId};
use crate::gesture::scale::{scale, Unmeasured};
use crate::gesture::tracker::{
    DragCallback, DragTracker, Phase, Position, Release, ReleaseDecision, Step,
};
use iced_core::{Point, Vector};
use std::time::Duration;

/// Receives the controller's externally visible effects.
pub trait DragListener {
    /// Content moved; `scale` is clamped to at most `1.0` but has no floor.
    fn on_position_changed(&mut self, content: Position, scale: f32);

    /// A release crossed below the threshold.
    ///
    /// Returning `true` means the listener handles navigation itself and the
    /// content must not snap back.
    fn on_released(&mut self) -> bool;

    /// A snap-back animation reached the origin.
    fn on_settled(&mut self) {}
}

/// Position the content returns to, captured on every layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragOrigin {
    pub x: i32,
    pub y: i32,
}

impl DragOrigin {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn as_position(self) -> Position {
        Point::new(self.x, self.y)
    }
}

/// Mutable state of one drag sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub current_top: i32,
    pub total_height: i32,
    pub scale: f32,
    pub threshold: DismissThreshold,
}

/// Externally visible controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
    Settling,
}

/// What the host has to do after feeding the controller an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    None,
    /// Schedule a frame tick; settling is in progress.
    RequestFrame,
    /// The listener took over after a dismissing release.
    Dismissed,
}

#[derive(Debug, Clone)]
pub struct DragController<L> {
    origin: DragOrigin,
    total_height: i32,
    threshold: DismissThreshold,
    session: Option<DragSession>,
    tracker: DragTracker,
    /// A down stopped a settle and no drag has started since.
    interrupted: bool,
    listener: Option<L>,
}

/// Policy handed to the tracker for the duration of one call.
struct DismissPolicy<'a, L> {
    origin: DragOrigin,
    total_height: i32,
    session: &'a mut Option<DragSession>,
    listener: Option<&'a mut L>,
}

impl<L: DragListener> DragCallback for DismissPolicy<'_, L> {
    fn try_capture(&mut self, pointer: PointerId) -> bool {
        log::debug!("capturing content for {pointer:?}");
        true
    }

    fn on_position_changed(&mut self, position: Position, _delta: Vector<i32>) {
        let total_height = self
            .session
            .as_ref()
            .map_or(self.total_height, |session| session.total_height);
        let value = match scale(position.y, self.origin.y, total_height) {
            Ok(value) => value,
            Err(Unmeasured) => {
                log::trace!("skipping scale before layout");
                return;
            }
        };
        if let Some(session) = self.session.as_mut() {
            session.current_top = position.y;
            session.scale = value;
        }
        if let Some(listener) = self.listener.as_deref_mut() {
            listener.on_position_changed(position, value);
        }
    }

    fn on_released(&mut self, release: Release) -> ReleaseDecision {
        let snap_back = ReleaseDecision::Settle(self.origin.as_position());
        let Some(session) = self.session.take() else {
            return snap_back;
        };
        if release.cancelled {
            log::debug!("drag cancelled at scale {}", session.scale);
            return snap_back;
        }
        if session.threshold.is_crossed_by(session.scale) {
            if let Some(listener) = self.listener.as_deref_mut() {
                if listener.on_released() {
                    log::debug!("release at scale {} handled by listener", session.scale);
                    return ReleaseDecision::Hold;
                }
            }
        }
        log::debug!(
            "release at scale {} (threshold {}), snapping back",
            session.scale,
            session.threshold.value()
        );
        snap_back
    }

}

impl<L: DragListener> DragController<L> {
    #[must_use]
    pub fn new(threshold: DismissThreshold) -> Self {
        Self::with_settings(GestureSettings {
            threshold,
            ..GestureSettings::default()
        })
    }

    #[must_use]
    pub fn with_settings(settings: GestureSettings) -> Self {
        Self {
            origin: DragOrigin::default(),
            total_height: 0,
            threshold: settings.threshold,
            session: None,
            tracker: DragTracker::new(settings.settle, defaults::MAX_RELEASE_VELOCITY),
            interrupted: false,
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: L) {
        self.listener = Some(listener);
    }

    pub fn take_listener(&mut self) -> Option<L> {
        self.listener.take()
    }

    #[must_use]
    pub fn listener(&self) -> Option<&L> {
        self.listener.as_ref()
    }

    pub fn listener_mut(&mut self) -> Option<&mut L> {
        self.listener.as_mut()
    }

    #[must_use]
    pub fn threshold(&self) -> DismissThreshold {
        self.threshold
    }

    /// Changes the threshold for sessions started afterwards.
    pub fn set_threshold(&mut self, threshold: DismissThreshold) {
        self.threshold = threshold;
    }

    #[must_use]
    pub fn origin(&self) -> DragOrigin {
        self.origin
    }

    #[must_use]
    pub fn total_height(&self) -> i32 {
        self.total_height
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Current content position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.tracker.position()
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        match self.tracker.phase() {
            Phase::Idle => DragState::Idle,
            Phase::Dragging => DragState::Dragging,
            Phase::Settling => DragState::Settling,
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.tracker.is_armed()
    }

    /// Records the result of a layout pass.
    ///
    /// While idle the content is placed back at the new origin; during a
    /// drag or settle only the origin and height are updated.
    pub fn on_layout(&mut self, origin: DragOrigin, total_height: i32) {
        self.origin = origin;
        self.total_height = total_height;
        self.tracker.set_settle_range(total_height);
        if self.state() == DragState::Idle {
            self.tracker.set_position(origin.as_position());
        }
    }

    fn policy(&mut self) -> (&mut DragTracker, DismissPolicy<'_, L>) {
        let policy = DismissPolicy {
            origin: self.origin,
            total_height: self.total_height,
            session: &mut self.session,
            listener: self.listener.as_mut(),
        };
        (&mut self.tracker, policy)
    }

    /// Starts a session for the armed pointer.
    ///
    /// Returns `false` when no down event armed the controller.
    pub fn begin_drag(&mut self) -> bool {
        if self.state() == DragState::Dragging {
            return true;
        }
        let position = self.tracker.position();
        let session = DragSession {
            current_top: position.y,
            total_height: self.total_height,
            scale: scale(position.y, self.origin.y, self.total_height).unwrap_or(1.0),
            threshold: self.threshold,
        };
        let (tracker, mut policy) = self.policy();
        if !tracker.begin_drag(&mut policy) {
            log::trace!("drag begin rejected: controller not armed");
            return false;
        }
        log::debug!("drag started at top {}", session.current_top);
        self.session = Some(session);
        self.interrupted = false;
        true
    }

    /// Feeds a pointer event.
    ///
    /// Down events arm the controller (interrupting any settle); moves,
    /// ups and cancels without an armed pointer are ignored, as are events
    /// of any pointer other than the armed one.
    pub fn process(&mut self, event: &PointerEvent) -> Outcome {
        if event.action == PointerAction::Down {
            if self.state() == DragState::Dragging {
                return Outcome::None;
            }
            if self.state() == DragState::Settling {
                self.interrupted = true;
            }
            self.session = None;
            self.tracker.arm(event);
            return Outcome::None;
        }
        let was_armed = self.tracker.is_armed() && self.state() != DragState::Dragging;
        let (tracker, mut policy) = self.policy();
        let step = tracker.process(event, &mut policy);
        if was_armed && !self.tracker.is_armed() {
            return self.disarm();
        }
        match step {
            Step::Done => Outcome::None,
            Step::NeedsFrame => Outcome::RequestFrame,
            Step::Held => Outcome::Dismissed,
        }
    }

    /// Drops an armed pointer that did not turn into a drag.
    ///
    /// If that pointer had stopped a settle, the content settles back to
    /// the origin and [`Outcome::RequestFrame`] is returned.
    pub fn disarm(&mut self) -> Outcome {
        self.tracker.disarm();
        if !std::mem::take(&mut self.interrupted) || self.state() != DragState::Idle {
            return Outcome::None;
        }
        let origin = self.origin.as_position();
        if self.tracker.position() == origin || !self.tracker.settle_to(origin) {
            return Outcome::None;
        }
        log::debug!("resuming settle to {origin:?} after tap");
        Outcome::RequestFrame
    }

    /// Advances the settle animation by one frame.
    ///
    /// Returns `true` if another frame is required.
    pub fn on_frame(&mut self, frame: Duration) -> bool {
        if self.state() != DragState::Settling {
            return false;
        }
        let (tracker, mut policy) = self.policy();
        let running = tracker.continue_settling(frame, &mut policy);
        if !running {
            if let Some(listener) = self.listener.as_mut() {
                listener.on_settled();
            }
        }
        running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    #[derive(Debug, Default)]
    struct Recorder {
        scales: Vec<f32>,
        releases: usize,
        settled: usize,
        handles_release: bool,
    }

    impl DragListener for Recorder {
        fn on_position_changed(&mut self, _content: Position, scale: f32) {
            self.scales.push(scale);
        }

        fn on_released(&mut self) -> bool {
            self.releases += 1;
            self.handles_release
        }

        fn on_settled(&mut self) {
            self.settled += 1;
        }
    }

    fn controller(handles_release: bool) -> DragController<Recorder> {
        let mut controller = DragController::new(DismissThreshold::new(0.7));
        controller.set_listener(Recorder {
            handles_release,
            ..Recorder::default()
        });
        controller.on_layout(DragOrigin::new(0, 0), 1000);
        controller
    }

    fn listener(controller: &DragController<Recorder>) -> &Recorder {
        controller.listener().expect("listener registered")
    }

    fn drag_by(controller: &mut DragController<Recorder>, dy: f32) {
        controller.process(&PointerEvent::down(100.0, 200.0, 0));
        assert!(controller.begin_drag());
        controller.process(&PointerEvent::moved(100.0, 200.0 + dy, 100));
    }

    fn settle(controller: &mut DragController<Recorder>) -> usize {
        let mut ticks = 0;
        while controller.on_frame(Duration::from_millis(16)) {
            ticks += 1;
            assert!(ticks < 200, "settle never finished");
        }
        ticks
    }

    #[test]
    fn starts_idle_without_session() {
        let controller = controller(false);
        assert_eq!(controller.state(), DragState::Idle);
        assert!(controller.session().is_none());
    }

    #[test]
    fn begin_drag_without_down_is_rejected() {
        let mut controller = controller(false);
        assert!(!controller.begin_drag());
        assert_eq!(controller.state(), DragState::Idle);
        assert!(controller.session().is_none());
    }

    #[test]
    fn move_without_down_is_ignored() {
        let mut controller = controller(false);
        let outcome = controller.process(&PointerEvent::moved(0.0, 400.0, 0));
        assert_eq!(outcome, Outcome::None);
        assert!(listener(&controller).scales.is_empty());
    }

    #[test]
    fn up_and_cancel_while_idle_are_no_ops() {
        let mut controller = controller(false);
        assert_eq!(
            controller.process(&PointerEvent::up(0.0, 0.0, 0)),
            Outcome::None
        );
        assert_eq!(controller.process(&PointerEvent::cancel(0)), Outcome::None);
        assert_eq!(controller.state(), DragState::Idle);
        assert_eq!(controller.position(), Point::new(0, 0));
        assert_eq!(listener(&controller).releases, 0);
    }

    #[test]
    fn moves_update_session_and_report_scale() {
        let mut controller = controller(false);
        drag_by(&mut controller, 400.0);

        let session = controller.session().expect("active session");
        assert_eq!(session.current_top, 400);
        assert_eq!(session.total_height, 1000);
        assert_abs_diff_eq!(session.scale, 0.6, epsilon = F32_EPSILON);
        assert_eq!(listener(&controller).scales.len(), 1);
        assert_abs_diff_eq!(listener(&controller).scales[0], 0.6, epsilon = F32_EPSILON);
    }

    #[test]
    fn horizontal_motion_follows_pointer_and_settles_back() {
        let mut controller = controller(false);
        controller.process(&PointerEvent::down(100.0, 200.0, 0));
        controller.begin_drag();
        controller.process(&PointerEvent::moved(260.0, 300.0, 50));
        assert_eq!(controller.position(), Point::new(160, 100));

        controller.process(&PointerEvent::up(260.0, 300.0, 100));
        settle(&mut controller);
        assert_eq!(controller.position(), Point::new(0, 0));
    }

    #[test]
    fn second_pointer_cannot_end_the_session() {
        let mut controller = controller(true);
        drag_by(&mut controller, 300.0);

        let second = PointerId(1);
        let down = PointerEvent::down(10.0, 10.0, 120).with_pointer(second);
        let up = PointerEvent::up(10.0, 10.0, 140).with_pointer(second);
        assert_eq!(controller.process(&down), Outcome::None);
        assert_eq!(controller.process(&up), Outcome::None);
        assert_eq!(
            controller.process(&PointerEvent::cancel(150).with_pointer(second)),
            Outcome::None
        );
        assert_eq!(controller.state(), DragState::Dragging);
        assert!(controller.session().is_some());

        controller.process(&PointerEvent::moved(100.0, 720.0, 160));
        let outcome = controller.process(&PointerEvent::up(100.0, 720.0, 180));
        assert_eq!(outcome, Outcome::Dismissed);
        assert_eq!(listener(&controller).releases, 1);
        let last_scale = *listener(&controller).scales.last().expect("moved");
        assert_abs_diff_eq!(last_scale, 0.48, epsilon = F32_EPSILON);
    }

    #[test]
    fn tap_during_settle_returns_content_to_origin() {
        let mut controller = controller(false);
        drag_by(&mut controller, 300.0);
        controller.process(&PointerEvent::up(100.0, 500.0, 400));
        assert!(controller.on_frame(Duration::from_millis(16)));

        controller.process(&PointerEvent::down(100.0, 200.0, 500));
        let outcome = controller.process(&PointerEvent::up(100.0, 200.0, 520));
        assert_eq!(outcome, Outcome::RequestFrame);
        assert_eq!(controller.state(), DragState::Settling);
        settle(&mut controller);
        assert_eq!(controller.position(), Point::new(0, 0));
    }

    #[test]
    fn tap_while_idle_needs_no_frames() {
        let mut controller = controller(false);
        controller.process(&PointerEvent::down(100.0, 200.0, 0));
        let outcome = controller.process(&PointerEvent::up(100.0, 200.0, 20));
        assert_eq!(outcome, Outcome::None);
        assert_eq!(controller.disarm(), Outcome::None);
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn extreme_drag_does_not_overflow() {
        let mut controller = controller(false);
        drag_by(&mut controller, -3.0e9);
        let outcome = controller.process(&PointerEvent::up(100.0, -3.0e9, 200));
        assert_eq!(outcome, Outcome::RequestFrame);
        settle(&mut controller);
        assert_eq!(controller.position(), Point::new(0, 0));
    }

    #[test]
    fn release_below_threshold_handled_by_listener_skips_settle() {
        let mut controller = controller(true);
        drag_by(&mut controller, 400.0);

        let outcome = controller.process(&PointerEvent::up(100.0, 600.0, 400));
        assert_eq!(outcome, Outcome::Dismissed);
        assert_eq!(controller.state(), DragState::Idle);
        assert!(controller.session().is_none());
        assert_eq!(listener(&controller).releases, 1);
        assert_eq!(controller.position(), Point::new(0, 400));
    }

    #[test]
    fn declined_release_snaps_back_to_origin() {
        let mut controller = controller(false);
        drag_by(&mut controller, 400.0);

        let outcome = controller.process(&PointerEvent::up(100.0, 600.0, 400));
        assert_eq!(outcome, Outcome::RequestFrame);
        assert_eq!(controller.state(), DragState::Settling);
        assert_eq!(listener(&controller).releases, 1);

        settle(&mut controller);
        assert_eq!(controller.state(), DragState::Idle);
        assert_eq!(controller.position(), Point::new(0, 0));
        assert_eq!(listener(&controller).settled, 1);
        let last_scale = *listener(&controller).scales.last().expect("settle steps");
        assert_eq!(last_scale, 1.0);
    }

    #[test]
    fn release_above_threshold_never_asks_listener() {
        let mut controller = controller(true);
        drag_by(&mut controller, 100.0);

        let outcome = controller.process(&PointerEvent::up(100.0, 300.0, 400));
        assert_eq!(outcome, Outcome::RequestFrame);
        assert_eq!(listener(&controller).releases, 0);
    }

    #[test]
    fn release_without_listener_snaps_back() {
        let mut controller: DragController<Recorder> =
            DragController::new(DismissThreshold::default());
        controller.on_layout(DragOrigin::new(12, 34), 800);
        controller.process(&PointerEvent::down(0.0, 0.0, 0));
        controller.begin_drag();
        controller.process(&PointerEvent::moved(0.0, 700.0, 50));
        controller.process(&PointerEvent::up(0.0, 700.0, 300));

        while controller.on_frame(Duration::from_millis(16)) {}
        assert_eq!(controller.position(), Point::new(12, 34));
    }

    #[test]
    fn cancel_during_drag_snaps_back_without_release_callback() {
        let mut controller = controller(true);
        drag_by(&mut controller, 500.0);

        let outcome = controller.process(&PointerEvent::cancel(200));
        assert_eq!(outcome, Outcome::RequestFrame);
        assert_eq!(listener(&controller).releases, 0);
        settle(&mut controller);
        assert_eq!(controller.position(), Point::new(0, 0));
    }

    #[test]
    fn down_while_settling_rearms_without_completion() {
        let mut controller = controller(false);
        drag_by(&mut controller, 300.0);
        controller.process(&PointerEvent::up(100.0, 500.0, 400));
        assert!(controller.on_frame(Duration::from_millis(16)));

        controller.process(&PointerEvent::down(100.0, 200.0, 500));
        assert_eq!(controller.state(), DragState::Idle);
        assert!(controller.is_armed());
        assert!(!controller.on_frame(Duration::from_millis(16)));
        assert_eq!(listener(&controller).settled, 0);

        assert!(controller.begin_drag());
        assert_eq!(controller.state(), DragState::Dragging);
    }

    #[test]
    fn unmeasured_container_skips_callbacks() {
        let mut controller: DragController<Recorder> =
            DragController::new(DismissThreshold::default());
        controller.set_listener(Recorder::default());
        controller.process(&PointerEvent::down(0.0, 0.0, 0));
        controller.begin_drag();
        controller.process(&PointerEvent::moved(0.0, 250.0, 50));

        assert!(listener(&controller).scales.is_empty());
        assert_eq!(controller.position(), Point::new(0, 250));
    }

    #[test]
    fn large_drag_reports_negative_scale() {
        let mut controller = controller(false);
        drag_by(&mut controller, 1500.0);
        assert_abs_diff_eq!(listener(&controller).scales[0], -0.5, epsilon = F32_EPSILON);
    }

    #[test]
    fn layout_while_idle_resets_content() {
        let mut controller = controller(true);
        drag_by(&mut controller, 400.0);
        controller.process(&PointerEvent::up(100.0, 600.0, 400));
        assert_eq!(controller.position(), Point::new(0, 400));

        controller.on_layout(DragOrigin::new(0, 20), 900);
        assert_eq!(controller.position(), Point::new(0, 20));
        assert_eq!(controller.total_height(), 900);
    }

    #[test]
    fn threshold_is_configurable() {
        let mut controller = controller(true);
        controller.set_threshold(DismissThreshold::new(0.5));
        drag_by(&mut controller, 400.0);
        let outcome = controller.process(&PointerEvent::up(100.0, 600.0, 400));
        assert_eq!(outcome, Outcome::RequestFrame);
        assert_eq!(listener(&controller).releases, 0);
    }
}
