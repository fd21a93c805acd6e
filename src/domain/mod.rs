// SPDX-License-Identifier: MPL-2.0
//! Domain types shared across the crate.
//!
//! Pure value types with validation; no knowledge of hosts, listeners or
//! configuration files.

pub mod gesture;
