// SPDX-License-Identifier: MPL-2.0
//! Shared-element continuity between the list and the viewer.

pub mod key;
pub mod registry;

pub use key::{decode, encode, TransitionBinding, TransitionKey, TransitionKeyError};
pub use registry::{
    map_enter_elements, resolve_counterpart, CounterpartProvider, TransitionElementRegistry,
};
