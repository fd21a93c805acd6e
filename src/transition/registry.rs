// SPDX-License-Identifier: MPL-2.0
//! Shared-element resolution for enter and exit transitions.
//!
//! The registry keeps no table: keys are decoded on demand and the view for
//! an exit transition is asked from a [`CounterpartProvider`], because the
//! element that started the transition may have scrolled away or been
//! recycled while the viewer was open.

use crate::error::Result;
use crate::transition::key::{decode, encode, TransitionBinding, TransitionKey};
use std::collections::HashMap;
use std::fmt;

/// Supplies the on-screen view currently showing `content_identifier` at
/// `position`, if there is one.
pub trait CounterpartProvider<V> {
    fn resolve(&mut self, position: usize, content_identifier: &str) -> Option<V>;
}

impl<V, F> CounterpartProvider<V> for F
where
    F: FnMut(usize, &str) -> Option<V>,
{
    fn resolve(&mut self, position: usize, content_identifier: &str) -> Option<V> {
        self(position, content_identifier)
    }
}

/// Picks the view for `binding`, falling back when the provider is absent
/// or has nothing on screen.
pub fn resolve_counterpart<V, P>(
    binding: &TransitionBinding,
    fallback: V,
    provider: Option<&mut P>,
) -> V
where
    P: CounterpartProvider<V> + ?Sized,
{
    provider
        .and_then(|provider| provider.resolve(binding.position, &binding.content_identifier))
        .unwrap_or(fallback)
}

/// Exit-side registry of the list screen.
pub struct TransitionElementRegistry<V> {
    fallback: V,
    provider: Option<Box<dyn CounterpartProvider<V>>>,
}

impl<V: fmt::Debug> fmt::Debug for TransitionElementRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionElementRegistry")
            .field("fallback", &self.fallback)
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}

impl<V: Clone> TransitionElementRegistry<V> {
    /// Creates a registry that always falls back to `fallback`.
    #[must_use]
    pub fn new(fallback: V) -> Self {
        Self {
            fallback,
            provider: None,
        }
    }

    /// Creates a registry asking `provider` for counterparts first.
    #[must_use]
    pub fn with_provider(fallback: V, provider: Box<dyn CounterpartProvider<V>>) -> Self {
        Self {
            fallback,
            provider: Some(provider),
        }
    }

    #[must_use]
    pub fn fallback(&self) -> &V {
        &self.fallback
    }

    #[must_use]
    pub fn encode(position: usize, content_identifier: &str) -> TransitionKey {
        encode(position, content_identifier)
    }

    /// # Errors
    ///
    /// Returns [`crate::error::Error::Transition`] for malformed keys.
    pub fn decode(key: &str) -> Result<TransitionBinding> {
        Ok(decode(key)?)
    }

    /// Resolves the counterpart view for `binding`.
    pub fn resolve(&mut self, binding: &TransitionBinding) -> V {
        resolve_counterpart(binding, self.fallback.clone(), self.provider.as_deref_mut())
    }

    /// Exit-transition mapping step.
    ///
    /// The host passes the transition names and the name → view map it
    /// assembled. Resolution only happens on exit, recognized by names being
    /// present while the map is still empty; in every other case the map is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Transition`] if the first name is not a
    /// valid key; the map is not modified in that case.
    pub fn map_shared_elements(
        &mut self,
        names: &[String],
        shared: &mut HashMap<String, V>,
    ) -> Result<()> {
        let Some(name) = names.first() else {
            return Ok(());
        };
        if !shared.is_empty() {
            return Ok(());
        }
        let binding = match decode(name) {
            Ok(binding) => binding,
            Err(err) => {
                log::warn!("cannot map shared element {name:?}: {err}");
                return Err(err.into());
            }
        };
        let view = self.resolve(&binding);
        shared.clear();
        shared.insert(name.clone(), view);
        Ok(())
    }
}

/// Enter-transition mapping step of the viewer: the current page's key is
/// bound to the current page's view, replacing whatever the host proposed.
pub fn map_enter_elements<V>(shared: &mut HashMap<String, V>, key: &TransitionKey, view: V) {
    shared.clear();
    shared.insert(key.as_str().to_string(), view);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::transition::key::TransitionKeyError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct View(u32);

    fn names(keys: &[TransitionKey]) -> Vec<String> {
        keys.iter().map(|key| key.as_str().to_string()).collect()
    }

    #[test]
    fn provider_result_wins_over_fallback() {
        let binding = TransitionBinding::new(5, "b.jpg");
        let mut provider = |position: usize, id: &str| {
            assert_eq!((position, id), (5, "b.jpg"));
            Some(View(50))
        };
        assert_eq!(
            resolve_counterpart(&binding, View(1), Some(&mut provider)),
            View(50)
        );
    }

    #[test]
    fn provider_without_view_falls_back() {
        let binding = TransitionBinding::new(5, "b.jpg");
        let mut provider = |_: usize, _: &str| -> Option<View> { None };
        assert_eq!(
            resolve_counterpart(&binding, View(1), Some(&mut provider)),
            View(1)
        );
    }

    #[test]
    fn missing_provider_falls_back() {
        let binding = TransitionBinding::new(0, "a");
        let provider: Option<&mut fn(usize, &str) -> Option<View>> = None;
        assert_eq!(resolve_counterpart(&binding, View(7), provider), View(7));
    }

    #[test]
    fn exit_mapping_replaces_with_counterpart() {
        let mut registry = TransitionElementRegistry::with_provider(
            View(1),
            Box::new(|position: usize, _: &str| Some(View(100 + position as u32))),
        );
        let names = names(&[encode(3, "c.png")]);
        let mut shared = HashMap::new();

        registry
            .map_shared_elements(&names, &mut shared)
            .expect("valid key");
        assert_eq!(shared.len(), 1);
        assert_eq!(shared.get("c.png#3"), Some(&View(103)));
    }

    #[test]
    fn exit_mapping_without_provider_uses_original_view() {
        let mut registry = TransitionElementRegistry::new(View(1));
        let names = names(&[encode(3, "c.png")]);
        let mut shared = HashMap::new();
        registry
            .map_shared_elements(&names, &mut shared)
            .expect("valid key");
        assert_eq!(shared.get("c.png#3"), Some(&View(1)));
    }

    #[test]
    fn no_names_is_a_no_op() {
        let mut registry = TransitionElementRegistry::new(View(1));
        let mut shared = HashMap::new();
        registry.map_shared_elements(&[], &mut shared).expect("no-op");
        assert!(shared.is_empty());
    }

    #[test]
    fn entry_with_existing_views_is_a_no_op() {
        let mut registry = TransitionElementRegistry::with_provider(
            View(1),
            Box::new(|_: usize, _: &str| -> Option<View> { panic!("must not resolve on entry") }),
        );
        let names = names(&[encode(0, "a")]);
        let mut shared = HashMap::from([("a#0".to_string(), View(9))]);
        registry
            .map_shared_elements(&names, &mut shared)
            .expect("no-op");
        assert_eq!(shared, HashMap::from([("a#0".to_string(), View(9))]));
    }

    #[test]
    fn malformed_name_propagates_and_leaves_map() {
        let mut registry = TransitionElementRegistry::new(View(1));
        let mut shared = HashMap::new();
        let err = registry
            .map_shared_elements(&["garbage".to_string()], &mut shared)
            .expect_err("malformed key");
        assert_eq!(err, Error::Transition(TransitionKeyError::MissingSeparator));
        assert!(shared.is_empty());
    }

    #[test]
    fn enter_mapping_binds_current_page() {
        let mut shared = HashMap::from([("stale#1".to_string(), View(2))]);
        map_enter_elements(&mut shared, &encode(4, "d"), View(40));
        assert_eq!(shared, HashMap::from([("d#4".to_string(), View(40))]));
    }

    #[test]
    fn registry_decode_wraps_errors() {
        assert!(TransitionElementRegistry::<View>::decode("x#2").is_ok());
        assert!(matches!(
            TransitionElementRegistry::<View>::decode("x"),
            Err(Error::Transition(_))
        ));
    }
}
