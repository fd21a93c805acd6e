// SPDX-License-Identifier: MPL-2.0
//! Raw pointer events fed into the gesture pipeline.
//!
//! Hosts either build [`PointerEvent`]s directly or convert them from
//! `iced_core` touch events. Every event carries the time it occurred,
//! measured from an arbitrary host epoch.

use iced_core::touch;
use iced_core::Point;
use std::fmt;
use std::time::Duration;

/// Identifier of the pointer (finger) that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u64);

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer event in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pointer: PointerId,
    pub position: Point,
    pub time: Duration,
}

impl PointerEvent {
    #[must_use]
    pub fn new(action: PointerAction, x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            action,
            pointer: PointerId::default(),
            position: Point::new(x, y),
            time: Duration::from_millis(time_ms),
        }
    }

    #[must_use]
    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Down, x, y, time_ms)
    }

    #[must_use]
    pub fn moved(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Move, x, y, time_ms)
    }

    #[must_use]
    pub fn up(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Up, x, y, time_ms)
    }

    #[must_use]
    pub fn cancel(time_ms: u64) -> Self {
        Self::new(PointerAction::Cancel, 0.0, 0.0, time_ms)
    }

    /// Returns a copy of the event attributed to another pointer.
    #[must_use]
    pub fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = pointer;
        self
    }

    /// Converts an `iced_core` touch event observed at `time`.
    #[must_use]
    pub fn from_touch(event: touch::Event, time: Duration) -> Self {
        let (action, finger, position) = match event {
            touch::Event::FingerPressed { id, position } => (PointerAction::Down, id, position),
            touch::Event::FingerMoved { id, position } => (PointerAction::Move, id, position),
            touch::Event::FingerLifted { id, position } => (PointerAction::Up, id, position),
            touch::Event::FingerLost { id, position } => (PointerAction::Cancel, id, position),
        };
        Self {
            action,
            pointer: PointerId(finger.0),
            position,
            time,
        }
    }

    /// Checks that the event can be interpreted at all.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::NonFinitePosition`] for NaN or infinite coordinates
    /// (cancel events carry no meaningful position and are exempt).
    pub fn validate(&self) -> Result<(), EventError> {
        if self.action != PointerAction::Cancel
            && !(self.position.x.is_finite() && self.position.y.is_finite())
        {
            return Err(EventError::NonFinitePosition);
        }
        Ok(())
    }
}

/// Failure to interpret a pointer event sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
    /// Coordinates were NaN or infinite.
    NonFinitePosition,
    /// A move arrived without a preceding down for the same pointer.
    MissingDown,
    /// The event is timestamped before the previous one.
    TimeWentBackwards,
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::NonFinitePosition => write!(f, "pointer position is not finite"),
            EventError::MissingDown => write!(f, "pointer moved without a preceding down"),
            EventError::TimeWentBackwards => write!(f, "pointer event time went backwards"),
        }
    }
}

impl std::error::Error for EventError {}
