// SPDX-License-Identifier: MPL-2.0
//! Drag-to-dismiss gesture handling.
//!
//! ## Architecture
//!
//! ```text
//! pointer events ──► router ──► controller ──► DragListener
//!                                  │
//!                                  ├── scale    - displacement → dimming factor
//!                                  ├── tracker  - generic drag + settle primitive
//!                                  └── velocity - release velocity
//! layout - router + controller behind one message handler
//! ```

pub mod controller;
pub mod event;
pub mod layout;
pub mod router;
pub mod scale;
pub mod tracker;
pub mod velocity;

pub use controller::{DragController, DragListener, DragOrigin, DragSession, DragState, Outcome};
pub use event::{EventError, PointerAction, PointerEvent, PointerId};
pub use layout::{DragLayout, Effect, Message};
pub use router::{GestureRouter, Routing};
pub use scale::{scale, Unmeasured};
pub use tracker::{DragCallback, DragTracker, Phase, Position, Release, ReleaseDecision};
