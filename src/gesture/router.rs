// SPDX-License-Identifier: MPL-2.0
//! Gesture router: decides once per pointer sequence whether it is a
//! pull-down drag, then forwards the rest of the sequence to the controller.
//!
//! Only downward motion counts. A sequence becomes a drag when the first
//! pointer has moved more than half the touch slop below its down position;
//! upward or sideways motion never commits, which biases the container
//! toward pull-down-to-dismiss and leaves other gestures to the content.

use crate::domain::gesture::TouchSlop;
use crate::gesture::controller::{DragController, DragListener, DragState, Outcome};
use crate::gesture::event::{EventError, PointerAction, PointerEvent, PointerId};
use iced_core::Point;
use std::time::Duration;

/// How the router disposed of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// Not (yet) a drag; the event belongs to the content.
    Passed,
    /// The event belongs to the content and ended a tap that stopped a
    /// settle; the controller is settling back and needs frames.
    PassedSettling,
    /// This event committed the sequence to a drag.
    Intercepted,
    /// The event was forwarded to the controller as part of a drag.
    Forwarded(Outcome),
}

#[derive(Debug, Clone, Copy)]
struct Tracked {
    pointer: PointerId,
    down: Point,
    last_time: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct GestureRouter {
    slop: TouchSlop,
    tracked: Option<Tracked>,
    intercepting: bool,
}

impl GestureRouter {
    #[must_use]
    pub fn new(slop: TouchSlop) -> Self {
        Self {
            slop,
            tracked: None,
            intercepting: false,
        }
    }

    #[must_use]
    pub fn is_intercepting(&self) -> bool {
        self.intercepting
    }

    pub fn reset(&mut self) {
        self.tracked = None;
        self.intercepting = false;
    }

    /// Routes one pointer event.
    ///
    /// Events of a committed drag (and any event while the controller is
    /// dragging) go straight to the controller; everything else passes
    /// through the interception decision. The router stays committed until
    /// the controller stops dragging, so other pointers cannot end a drag.
    pub fn route<L: DragListener>(
        &mut self,
        event: &PointerEvent,
        controller: &mut DragController<L>,
    ) -> Routing {
        if self.intercepting || controller.state() == DragState::Dragging {
            let outcome = controller.process(event);
            if controller.state() != DragState::Dragging {
                self.reset();
            }
            return Routing::Forwarded(outcome);
        }
        self.intercept(event, controller)
    }

    /// Interception decision for a sequence that is not yet a drag.
    ///
    /// Down events of the tracked pointer are handed to the controller so
    /// that it is armed when the drag begins; events of other pointers are
    /// left to the content. Interpretation failures are swallowed: the
    /// sequence is abandoned and reported as "not a drag".
    pub fn intercept<L: DragListener>(
        &mut self,
        event: &PointerEvent,
        controller: &mut DragController<L>,
    ) -> Routing {
        if self.is_foreign(event) {
            return Routing::Passed;
        }
        match event.action {
            PointerAction::Up | PointerAction::Cancel => return self.abandon(controller),
            PointerAction::Down => {
                controller.process(event);
            }
            PointerAction::Move => {}
        }

        match self.classify(event) {
            Ok(false) => Routing::Passed,
            Ok(true) => {
                if !controller.begin_drag() {
                    self.reset();
                    return Routing::Passed;
                }
                log::debug!("pull-down drag detected at {:?}", event.position);
                self.intercepting = true;
                // The committing move already carries displacement.
                controller.process(event);
                Routing::Intercepted
            }
            Err(err) => {
                log::debug!("ignoring pointer sequence: {err}");
                self.abandon(controller)
            }
        }
    }

    fn is_foreign(&self, event: &PointerEvent) -> bool {
        self.tracked.is_some_and(|tracked| tracked.pointer != event.pointer)
    }

    fn abandon<L: DragListener>(&mut self, controller: &mut DragController<L>) -> Routing {
        self.reset();
        match controller.disarm() {
            Outcome::RequestFrame => Routing::PassedSettling,
            Outcome::None | Outcome::Dismissed => Routing::Passed,
        }
    }

    fn classify(&mut self, event: &PointerEvent) -> Result<bool, EventError> {
        event.validate()?;
        match event.action {
            PointerAction::Down => {
                self.tracked = Some(Tracked {
                    pointer: event.pointer,
                    down: event.position,
                    last_time: event.time,
                });
                Ok(false)
            }
            PointerAction::Move => {
                let tracked = self.tracked.as_mut().ok_or(EventError::MissingDown)?;
                if event.time < tracked.last_time {
                    return Err(EventError::TimeWentBackwards);
                }
                tracked.last_time = event.time;
                let downward = event.position.y - tracked.down.y;
                Ok(downward > self.slop.drag_trigger())
            }
            PointerAction::Up | PointerAction::Cancel => Ok(false),
        }
    }
}
