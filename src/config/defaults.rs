// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Dismiss**: Scale threshold separating "dismiss" from "snap back"
//! - **Touch**: Slop used to classify a pointer sequence as a drag
//! - **Settle**: Snap-back animation timing

// ==========================================================================
// Dismiss Defaults
// ==========================================================================

/// Default scale below which a release dismisses the viewer.
pub const DEFAULT_DISMISS_THRESHOLD: f32 = 0.7;

/// Minimum allowed dismiss threshold.
pub const MIN_DISMISS_THRESHOLD: f32 = 0.05;

/// Maximum allowed dismiss threshold.
pub const MAX_DISMISS_THRESHOLD: f32 = 1.0;

// ==========================================================================
// Touch Defaults
// ==========================================================================

/// Standard touch slop in logical pixels (Android's `TOUCH_SLOP` is 8dp).
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Minimum allowed touch slop.
pub const MIN_TOUCH_SLOP: f32 = 1.0;

/// Maximum allowed touch slop.
pub const MAX_TOUCH_SLOP: f32 = 64.0;

/// Maximum release velocity in logical pixels per second.
pub const MAX_RELEASE_VELOCITY: f32 = 8_000.0;

// ==========================================================================
// Settle Defaults
// ==========================================================================

/// Settle duration for a zero-velocity release, per full container height.
pub const BASE_SETTLE_DURATION_MS: u64 = 256;

/// Upper bound on any settle animation.
pub const MAX_SETTLE_DURATION_MS: u64 = 600;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_DISMISS_THRESHOLD > 0.0);
    assert!(MIN_DISMISS_THRESHOLD < DEFAULT_DISMISS_THRESHOLD);
    assert!(MAX_DISMISS_THRESHOLD >= DEFAULT_DISMISS_THRESHOLD);

    assert!(MIN_TOUCH_SLOP > 0.0);
    assert!(DEFAULT_TOUCH_SLOP >= MIN_TOUCH_SLOP);
    assert!(DEFAULT_TOUCH_SLOP <= MAX_TOUCH_SLOP);
    assert!(MAX_RELEASE_VELOCITY > 0.0);

    assert!(BASE_SETTLE_DURATION_MS > 0);
    assert!(MAX_SETTLE_DURATION_MS >= BASE_SETTLE_DURATION_MS);
};
