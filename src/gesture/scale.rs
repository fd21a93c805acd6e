// SPDX-License-Identifier: MPL-2.0
//! Scale model: maps vertical displacement to a dimming factor.
//!
//! ```text
//! scale = min(1 - (top - origin_y) / total_height, 1)
//! ```
//!
//! There is no lower bound: dragging further than the container
//! height yields negative values, and callers receive them unchanged.

use std::fmt;

/// The container has not been measured yet (height is zero or negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unmeasured;

impl fmt::Display for Unmeasured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container has not been measured")
    }
}

impl std::error::Error for Unmeasured {}

/// Computes the scale for content at `top` given its layout origin.
///
/// # Errors
///
/// Returns [`Unmeasured`] when `total_height <= 0`; no scale exists yet and
/// the caller must skip any dependent callback.
pub fn scale(top: i32, origin_y: i32, total_height: i32) -> Result<f32, Unmeasured> {
    if total_height <= 0 {
        return Err(Unmeasured);
    }
    let displacement = (i64::from(top) - i64::from(origin_y)) as f32;
    let raw = 1.0 - displacement / total_height as f32;
    Ok(raw.min(1.0))
}
