// SPDX-License-Identifier: MPL-2.0
//! Gesture newtypes.
//!
//! Type-safe wrappers for the tunables of the drag-to-dismiss gesture,
//! guaranteed to stay within valid ranges.

use crate::config::defaults;
use std::time::Duration;

// =============================================================================
// DismissThreshold
// =============================================================================

/// Scale value below which a release is read as "dismiss intent".
///
/// Always within `MIN_DISMISS_THRESHOLD..=MAX_DISMISS_THRESHOLD`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DismissThreshold(f32);

impl DismissThreshold {
    /// Creates a new threshold, clamping the value to the valid range.
    ///
    /// Non-finite input falls back to the default.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        Self(value.clamp(
            defaults::MIN_DISMISS_THRESHOLD,
            defaults::MAX_DISMISS_THRESHOLD,
        ))
    }

    /// Returns the raw threshold value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether a release at `scale` crosses the threshold.
    ///
    /// The comparison is strict: a scale equal to the threshold does not dismiss.
    #[must_use]
    pub fn is_crossed_by(self, scale: f32) -> bool {
        scale < self.0
    }
}

impl Default for DismissThreshold {
    fn default() -> Self {
        Self(defaults::DEFAULT_DISMISS_THRESHOLD)
    }
}

// =============================================================================
// TouchSlop
// =============================================================================

/// Platform touch slop in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSlop(f32);

impl TouchSlop {
    /// Creates a new touch slop, clamping to the valid range.
    #[must_use]
    pub fn new(pixels: f32) -> Self {
        if !pixels.is_finite() {
            return Self::default();
        }
        Self(pixels.clamp(defaults::MIN_TOUCH_SLOP, defaults::MAX_TOUCH_SLOP))
    }

    /// Returns the raw slop in pixels.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Downward displacement a move must exceed to begin a drag.
    #[must_use]
    pub fn drag_trigger(self) -> f32 {
        self.0 / 2.0
    }
}

impl Default for TouchSlop {
    fn default() -> Self {
        Self(defaults::DEFAULT_TOUCH_SLOP)
    }
}

// =============================================================================
// SettleDuration
// =============================================================================

/// Base and maximum duration of the snap-back animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDuration {
    base: Duration,
    max: Duration,
}

impl SettleDuration {
    /// Creates settle bounds; `max` is raised to `base` if smaller.
    #[must_use]
    pub fn new(base_ms: u64, max_ms: u64) -> Self {
        let base_ms = base_ms.max(1);
        Self {
            base: Duration::from_millis(base_ms),
            max: Duration::from_millis(max_ms.max(base_ms)),
        }
    }

    /// Duration used for a zero-velocity settle over a full range.
    #[must_use]
    pub fn base(self) -> Duration {
        self.base
    }

    /// Upper bound for any settle.
    #[must_use]
    pub fn max(self) -> Duration {
        self.max
    }

    /// Computes the settle duration for one axis.
    ///
    /// With a release velocity the duration follows how long the fling would
    /// take to cover the distance; without one it grows with the fraction of
    /// `range` still to travel.
    #[must_use]
    pub fn for_axis(self, distance: i32, velocity: f32, range: i32) -> Duration {
        if distance == 0 {
            return Duration::ZERO;
        }
        let millis = if velocity.abs() > f32::EPSILON {
            4.0 * (1000.0 * (distance as f32 / velocity).abs()).round()
        } else {
            let range = range.max(1) as f32;
            let fraction = distance.unsigned_abs() as f32 / range;
            (fraction + 1.0) * self.base.as_millis() as f32
        };
        Duration::from_millis(millis as u64).min(self.max)
    }
}

impl Default for SettleDuration {
    fn default() -> Self {
        Self::new(
            defaults::BASE_SETTLE_DURATION_MS,
            defaults::MAX_SETTLE_DURATION_MS,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
