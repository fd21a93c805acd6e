// SPDX-License-Identifier: MPL-2.0
//! `drag_dismiss` implements pull-down-to-dismiss for full-screen image viewers.
//!
//! A vertical drag moves the displayed content and dims the container in
//! proportion to the distance; releasing below a configurable scale
//! threshold dismisses the viewer, anything else snaps the content back.
//! Shared-element transition keys let the list screen hand the right view
//! to the exit transition even after the user paged elsewhere.

pub mod browse;
pub mod config;
pub mod domain;
pub mod error;
pub mod gesture;
pub mod transition;

#[cfg(test)]
mod test_utils;
