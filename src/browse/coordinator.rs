// SPDX-License-Identifier: MPL-2.0
//! Viewer-side glue between paging, the drag container and transitions.
//!
//! The coordinator tracks which page is visible, keeps the page indicator
//! current, provides the key for the enter transition, and turns drag
//! feedback into effects on the container view through a [`BrowseHost`].

use crate::browse::indicator::PageIndicator;
use crate::browse::session::BrowseSession;
use crate::config::GestureSettings;
use crate::gesture::layout::{self, DragLayout};
use crate::gesture::{DragListener, Position};
use crate::transition::{map_enter_elements, TransitionBinding, TransitionKey};
use std::collections::HashMap;

/// Host-side surface the coordinator drives.
pub trait BrowseHost {
    /// Applies the drag scale to the container (typically as opacity).
    fn set_container_alpha(&mut self, alpha: f32);
    /// Hides the container before leaving.
    fn hide_container(&mut self);
    /// Leaves the viewer, running the exit transition if any.
    fn navigate_back(&mut self);
    /// Shows the page indicator.
    fn show_indicator(&mut self, indicator: PageIndicator);
}

/// Effect of the drag container on the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContainerEffect {
    Alpha(f32),
    Hide,
    NavigateBack,
}

/// Drag listener queuing container effects in callback order.
#[derive(Debug, Default)]
pub struct EffectQueue(Vec<ContainerEffect>);

impl EffectQueue {
    fn drain(&mut self) -> std::vec::Drain<'_, ContainerEffect> {
        self.0.drain(..)
    }
}

impl DragListener for EffectQueue {
    fn on_position_changed(&mut self, _content: Position, scale: f32) {
        self.0.push(ContainerEffect::Alpha(scale));
    }

    fn on_released(&mut self) -> bool {
        self.0.push(ContainerEffect::Hide);
        self.0.push(ContainerEffect::NavigateBack);
        true
    }
}

#[derive(Debug)]
pub struct PageBrowseCoordinator<H> {
    session: BrowseSession,
    current: usize,
    host: H,
    layout: DragLayout<EffectQueue>,
    awaiting_first_draw: bool,
}

impl<H: BrowseHost> PageBrowseCoordinator<H> {
    /// Starts browsing `session`, showing the indicator if there is content.
    pub fn new(session: BrowseSession, host: H, settings: GestureSettings) -> Self {
        let mut coordinator = Self {
            current: session.start_position(),
            session,
            host,
            layout: DragLayout::with_listener(settings, EffectQueue::default()),
            awaiting_first_draw: true,
        };
        coordinator.refresh_indicator();
        coordinator
    }

    #[must_use]
    pub fn session(&self) -> &BrowseSession {
        &self.session
    }

    #[must_use]
    pub fn current_position(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn layout(&self) -> &DragLayout<EffectQueue> {
        &self.layout
    }

    /// The pager settled on a new page.
    pub fn on_page_selected(&mut self, position: usize) {
        if position >= self.session.len() {
            log::warn!(
                "ignoring selection of page {position} of {}",
                self.session.len()
            );
            return;
        }
        self.current = position;
        self.refresh_indicator();
    }

    fn refresh_indicator(&mut self) {
        if let Some(indicator) = PageIndicator::for_position(self.current, self.session.len()) {
            self.host.show_indicator(indicator);
        }
    }

    #[must_use]
    pub fn current_binding(&self) -> Option<TransitionBinding> {
        self.session
            .identifier(self.current)
            .map(|identifier| TransitionBinding::new(self.current, identifier))
    }

    #[must_use]
    pub fn current_key(&self) -> Option<TransitionKey> {
        self.session.key_at(self.current)
    }

    /// Enter-transition mapping: binds the visible page's key to `view`.
    ///
    /// Does nothing when the session does not use shared elements.
    pub fn map_enter_elements<V>(&self, shared: &mut HashMap<String, V>, view: V) {
        if !self.session.uses_shared_element() {
            return;
        }
        if let Some(key) = self.current_key() {
            map_enter_elements(shared, &key, view);
        }
    }

    /// Returns `true` on the first call only; the host then starts the
    /// postponed enter transition.
    pub fn on_first_pre_draw(&mut self) -> bool {
        std::mem::replace(&mut self.awaiting_first_draw, false)
    }

    /// Feeds a drag container message and applies resulting container
    /// effects to the host in the order they occurred.
    pub fn handle(&mut self, msg: layout::Message) -> layout::Effect {
        let effect = self.layout.handle(msg);
        if let Some(queue) = self.layout.controller_mut().listener_mut() {
            for container_effect in queue.drain() {
                match container_effect {
                    ContainerEffect::Alpha(alpha) => self.host.set_container_alpha(alpha),
                    ContainerEffect::Hide => self.host.hide_container(),
                    ContainerEffect::NavigateBack => self.host.navigate_back(),
                }
            }
        }
        effect
    }
}
