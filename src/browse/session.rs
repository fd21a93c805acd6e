// SPDX-License-Identifier: MPL-2.0
//! Launching a browse session.
//!
//! A single [`LaunchOptions`] value replaces the family of launch overloads:
//! every optional piece (target view, start position, shared-element flag,
//! counterpart resolver) is a named field with a sensible default.

use crate::transition::{encode, CounterpartProvider, TransitionElementRegistry, TransitionKey};
use std::fmt;

/// What the viewer receives: the content to page through and where to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseSession {
    identifiers: Vec<String>,
    start_position: usize,
    shared_element: bool,
}

impl BrowseSession {
    /// Creates a session, clamping `start_position` into the list.
    #[must_use]
    pub fn new(identifiers: Vec<String>, start_position: usize, shared_element: bool) -> Self {
        let last = identifiers.len().saturating_sub(1);
        if start_position > last && !identifiers.is_empty() {
            log::warn!("start position {start_position} past end, using {last}");
        }
        Self {
            start_position: start_position.min(last),
            identifiers,
            shared_element,
        }
    }

    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    #[must_use]
    pub fn start_position(&self) -> usize {
        self.start_position
    }

    #[must_use]
    pub fn uses_shared_element(&self) -> bool {
        self.shared_element
    }

    #[must_use]
    pub fn identifier(&self, position: usize) -> Option<&str> {
        self.identifiers.get(position).map(String::as_str)
    }

    /// Transition key of the element at `position`.
    #[must_use]
    pub fn key_at(&self, position: usize) -> Option<TransitionKey> {
        self.identifier(position)
            .map(|identifier| encode(position, identifier))
    }
}

/// Optional launch parameters.
pub struct LaunchOptions<V> {
    /// View on the list screen the transition starts from.
    pub transition_view: Option<V>,
    pub start_position: usize,
    pub use_shared_element: bool,
    /// Supplies a replacement view for the exit transition.
    pub counterpart: Option<Box<dyn CounterpartProvider<V>>>,
}

impl<V> Default for LaunchOptions<V> {
    fn default() -> Self {
        Self {
            transition_view: None,
            start_position: 0,
            use_shared_element: false,
            counterpart: None,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for LaunchOptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchOptions")
            .field("transition_view", &self.transition_view)
            .field("start_position", &self.start_position)
            .field("use_shared_element", &self.use_shared_element)
            .field("has_counterpart", &self.counterpart.is_some())
            .finish()
    }
}

/// Everything the list screen needs to open the viewer.
#[derive(Debug)]
pub struct Launch<V> {
    pub session: BrowseSession,
    /// Key to start the enter transition with, when shared elements are used.
    pub entry_key: Option<TransitionKey>,
    /// Exit-side resolution for the list screen, when shared elements are used.
    pub exit_registry: Option<TransitionElementRegistry<V>>,
}

/// Prepares a browse session over `identifiers`.
///
/// Shared-element continuity needs both the flag and a transition view and a
/// non-empty list; otherwise the session launches without it.
#[must_use]
pub fn launch<V: Clone>(identifiers: Vec<String>, options: LaunchOptions<V>) -> Launch<V> {
    let LaunchOptions {
        transition_view,
        start_position,
        use_shared_element,
        counterpart,
    } = options;

    let wants_shared = use_shared_element && !identifiers.is_empty();
    let view = transition_view.filter(|_| wants_shared);
    if wants_shared && view.is_none() {
        log::warn!("shared element requested without a transition view; disabled");
    }

    let session = BrowseSession::new(identifiers, start_position, view.is_some());
    let Some(view) = view else {
        return Launch {
            session,
            entry_key: None,
            exit_registry: None,
        };
    };

    let entry_key = session.key_at(session.start_position());
    let exit_registry = Some(match counterpart {
        Some(provider) => TransitionElementRegistry::with_provider(view, provider),
        None => TransitionElementRegistry::new(view),
    });
    Launch {
        session,
        entry_key,
        exit_registry,
    }
}

/// Prepares a session showing a single item.
#[must_use]
pub fn launch_single<V: Clone>(
    identifier: impl Into<String>,
    options: LaunchOptions<V>,
) -> Launch<V> {
    launch(
        vec![identifier.into()],
        LaunchOptions {
            start_position: 0,
            ..options
        },
    )
}
