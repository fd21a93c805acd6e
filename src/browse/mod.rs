// SPDX-License-Identifier: MPL-2.0
//! Browsing a list of images in the viewer.

pub mod coordinator;
pub mod indicator;
pub mod session;

pub use coordinator::{BrowseHost, ContainerEffect, EffectQueue, PageBrowseCoordinator};
pub use indicator::PageIndicator;
pub use session::{launch, launch_single, BrowseSession, Launch, LaunchOptions};
