// SPDX-License-Identifier: MPL-2.0
//! Gesture domain types.

mod newtypes;

pub use newtypes::{DismissThreshold, SettleDuration, TouchSlop};
