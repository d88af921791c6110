//! Action registry
//!
//! Lookup table from transition name to handler, built once when a store is
//! mounted and never modified afterwards.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::declaration::{ReducerEntry, ReducerFn, SideEffectEntry, SideEffectFn};

pub struct ActionRegistry<S> {
    reducers: HashMap<&'static str, Rc<ReducerFn<S>>>,
    side_effects: HashMap<&'static str, Rc<SideEffectFn<S>>>,
}

impl<S> ActionRegistry<S> {
    /// Build the registry from declared entries
    ///
    /// Registering a name twice is allowed: the later entry replaces the
    /// earlier one.
    pub fn build(reducers: &[ReducerEntry<S>], side_effects: &[SideEffectEntry<S>]) -> Self {
        let mut registry = Self {
            reducers: HashMap::with_capacity(reducers.len()),
            side_effects: HashMap::with_capacity(side_effects.len()),
        };

        for entry in reducers {
            if registry
                .reducers
                .insert(entry.name(), Rc::clone(&entry.handler))
                .is_some()
            {
                log::debug!("Registry: reducer '{}' replaced", entry.name());
            }
        }

        for entry in side_effects {
            if registry
                .side_effects
                .insert(entry.name(), Rc::clone(&entry.handler))
                .is_some()
            {
                log::debug!("Registry: side effect '{}' replaced", entry.name());
            }
        }

        log::debug!(
            "Registry: {} reducers, {} side effects",
            registry.reducers.len(),
            registry.side_effects.len()
        );
        registry
    }

    pub(crate) fn reducer(&self, name: &str) -> Option<&ReducerFn<S>> {
        self.reducers.get(name).map(|handler| handler.as_ref())
    }

    pub(crate) fn side_effect(&self, name: &str) -> Option<&SideEffectFn<S>> {
        self.side_effects.get(name).map(|handler| handler.as_ref())
    }

    pub fn contains_reducer(&self, name: &str) -> bool {
        self.reducers.contains_key(name)
    }

    pub fn contains_side_effect(&self, name: &str) -> bool {
        self.side_effects.contains_key(name)
    }

    /// Registered reducer names, sorted
    pub fn reducer_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.reducers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Registered side-effect names, sorted
    pub fn side_effect_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.side_effects.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl<S> fmt::Debug for ActionRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("reducers", &self.reducer_names())
            .field("side_effects", &self.side_effect_names())
            .finish()
    }
}
