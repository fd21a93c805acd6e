// SPDX-License-Identifier: MPL-2.0
//! Generic drag-tracking primitive.
//!
//! [`DragTracker`] follows one pointer, moves a piece of content by the
//! pointer's displacement and animates it to a target when released. All
//! policy lives in a [`DragCallback`] supplied on every call, so the tracker
//! itself knows nothing about dismissal, scales or listeners.
//!
//! Lifecycle:
//!
//! ```text
//! arm (down) ──► begin_drag ──► Dragging ──► release ──► Settling ──► Idle
//!      │                                        │
//!      └── up/cancel: disarm                    └── Hold: Idle
//! ```

use crate::domain::gesture::SettleDuration;
use crate::gesture::event::{PointerAction, PointerEvent, PointerId};
use crate::gesture::velocity::VelocityTracker;
use iced_core::{Point, Vector};
use std::time::Duration;

/// Content position in container pixels.
pub type Position = Point<i32>;

/// How a drag ended, reported to [`DragCallback::on_released`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Pointer velocity in pixels per second.
    pub velocity: Vector,
    /// The sequence was cancelled rather than lifted.
    pub cancelled: bool,
}

/// What the tracker should do with released content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseDecision {
    /// Animate the content to the given position.
    Settle(Position),
    /// Leave the content where it is; someone else takes over.
    Hold,
}

/// Capability set customizing a [`DragTracker`].
pub trait DragCallback {
    /// Whether the pointer may start dragging the content.
    fn try_capture(&mut self, _pointer: PointerId) -> bool {
        true
    }

    /// Content moved, by a drag step or a settle step.
    fn on_position_changed(&mut self, position: Position, delta: Vector<i32>);

    /// The captured pointer went up or was cancelled.
    fn on_released(&mut self, release: Release) -> ReleaseDecision;

    /// Constrains the proposed left edge.
    fn clamp_horizontal(&self, left: i32, _dx: i32) -> i32 {
        left
    }

    /// Constrains the proposed top edge.
    fn clamp_vertical(&self, top: i32, _dy: i32) -> i32 {
        top
    }
}

/// Phase of the tracked content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

/// Outcome of feeding one event or tick to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing further to do.
    Done,
    /// The host must deliver another frame tick.
    NeedsFrame,
    /// The callback held the content after release.
    Held,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    pointer: PointerId,
    initial: Point,
}

#[derive(Debug, Clone, Copy)]
struct Settle {
    from: Position,
    to: Position,
    duration: Duration,
    elapsed: Duration,
}

impl Settle {
    fn position_at(&self, elapsed: Duration) -> Position {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let lerp = |from: i32, to: i32| {
            let span = (i64::from(to) - i64::from(from)) as f32;
            let value = i64::from(from) + (span * t).round() as i64;
            value.clamp(i64::from(from.min(to)), i64::from(from.max(to))) as i32
        };
        Point::new(lerp(self.from.x, self.to.x), lerp(self.from.y, self.to.y))
    }
}

#[derive(Debug, Clone)]
pub struct DragTracker {
    phase: Phase,
    position: Position,
    armed: Option<Armed>,
    capture_start: Position,
    velocity: VelocityTracker,
    max_velocity: f32,
    settle: Option<Settle>,
    settle_durations: SettleDuration,
    settle_range: i32,
}

impl DragTracker {
    #[must_use]
    pub fn new(settle_durations: SettleDuration, max_velocity: f32) -> Self {
        Self {
            phase: Phase::Idle,
            position: Point::new(0, 0),
            armed: None,
            capture_start: Point::new(0, 0),
            velocity: VelocityTracker::default(),
            max_velocity,
            settle: None,
            settle_durations,
            settle_range: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Moves the content without notifying anyone (layout passes).
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Range used to scale zero-velocity settle durations.
    pub fn set_settle_range(&mut self, range: i32) {
        self.settle_range = range;
    }

    /// Arms the tracker with a down event.
    ///
    /// A down during settling stops the animation where it is; no completion
    /// is reported for the interrupted settle.
    pub fn arm(&mut self, event: &PointerEvent) {
        if self.phase == Phase::Settling {
            log::debug!("settle interrupted at {:?}", self.position);
            self.settle = None;
            self.phase = Phase::Idle;
        }
        self.velocity.clear();
        self.velocity.add(event.time, event.position);
        self.armed = Some(Armed {
            pointer: event.pointer,
            initial: event.position,
        });
    }

    /// Forgets an armed pointer that never became a drag.
    pub fn disarm(&mut self) {
        if self.phase != Phase::Dragging {
            self.armed = None;
            self.velocity.clear();
        }
    }

    /// Captures the content for the armed pointer.
    ///
    /// Returns `false` (and changes nothing) if no down event armed the
    /// tracker or the callback refuses the capture.
    pub fn begin_drag(&mut self, callback: &mut impl DragCallback) -> bool {
        if self.phase == Phase::Dragging {
            return true;
        }
        let Some(armed) = self.armed else {
            return false;
        };
        if !callback.try_capture(armed.pointer) {
            return false;
        }
        self.capture_start = self.position;
        self.phase = Phase::Dragging;
        true
    }

    /// Feeds a pointer event to an armed or dragging tracker.
    pub fn process(&mut self, event: &PointerEvent, callback: &mut impl DragCallback) -> Step {
        let Some(armed) = self.armed else {
            return Step::Done;
        };
        if event.pointer != armed.pointer {
            return Step::Done;
        }

        match event.action {
            PointerAction::Down => Step::Done,
            PointerAction::Move => {
                self.velocity.add(event.time, event.position);
                if self.phase == Phase::Dragging {
                    self.drag_to(event.position, armed.initial, callback);
                }
                Step::Done
            }
            PointerAction::Up | PointerAction::Cancel => {
                let cancelled = event.action == PointerAction::Cancel;
                if !cancelled {
                    self.velocity.add(event.time, event.position);
                }
                if self.phase != Phase::Dragging {
                    self.disarm();
                    return Step::Done;
                }
                let velocity = if cancelled {
                    Vector::new(0.0, 0.0)
                } else {
                    self.velocity.velocity(self.max_velocity)
                };
                self.armed = None;
                self.velocity.clear();
                self.release(Release { velocity, cancelled }, callback)
            }
        }
    }

    fn drag_to(&mut self, pointer: Point, initial: Point, callback: &mut impl DragCallback) {
        let offset = pointer - initial;
        let proposed_left = self.capture_start.x.saturating_add(offset.x.round() as i32);
        let proposed_top = self.capture_start.y.saturating_add(offset.y.round() as i32);
        let left = callback.clamp_horizontal(
            proposed_left,
            proposed_left.saturating_sub(self.position.x),
        );
        let top =
            callback.clamp_vertical(proposed_top, proposed_top.saturating_sub(self.position.y));
        self.move_to(Point::new(left, top), callback);
    }

    fn move_to(&mut self, target: Position, callback: &mut impl DragCallback) {
        if target == self.position {
            return;
        }
        let delta = Vector::new(
            target.x.saturating_sub(self.position.x),
            target.y.saturating_sub(self.position.y),
        );
        self.position = target;
        log::trace!("content moved to {target:?}");
        callback.on_position_changed(target, delta);
    }

    fn release(&mut self, release: Release, callback: &mut impl DragCallback) -> Step {
        match callback.on_released(release) {
            ReleaseDecision::Hold => {
                self.phase = Phase::Idle;
                Step::Held
            }
            ReleaseDecision::Settle(target) => {
                self.settle_at(target, release.velocity);
                Step::NeedsFrame
            }
        }
    }

    fn settle_at(&mut self, target: Position, velocity: Vector) {
        let horizontal = self.settle_durations.for_axis(
            target.x.saturating_sub(self.position.x),
            velocity.x,
            self.settle_range,
        );
        let vertical = self.settle_durations.for_axis(
            target.y.saturating_sub(self.position.y),
            velocity.y,
            self.settle_range,
        );
        let duration = horizontal.max(vertical);
        log::debug!("settling from {:?} to {target:?} over {duration:?}", self.position);
        self.settle = Some(Settle {
            from: self.position,
            to: target,
            duration,
            elapsed: Duration::ZERO,
        });
        self.phase = Phase::Settling;
    }

    /// Starts settling idle content towards `target`.
    ///
    /// Returns `false` while a drag is in progress.
    pub fn settle_to(&mut self, target: Position) -> bool {
        if self.phase == Phase::Dragging {
            return false;
        }
        self.settle_at(target, Vector::new(0.0, 0.0));
        true
    }

    /// Advances the settle animation by one frame.
    ///
    /// Returns `true` while another tick is required. The tick after the
    /// content reaches its target ends the animation and returns `false`.
    pub fn continue_settling(&mut self, frame: Duration, callback: &mut impl DragCallback) -> bool {
        let Some(mut settle) = self.settle else {
            return false;
        };
        if self.position == settle.to {
            self.settle = None;
            self.phase = Phase::Idle;
            log::debug!("settle finished at {:?}", self.position);
            return false;
        }
        settle.elapsed += frame;
        self.settle = Some(settle);
        self.move_to(settle.position_at(settle.elapsed), callback);
        true
    }
}
