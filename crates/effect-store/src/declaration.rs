//! Transition declarations
//!
//! [`StoreFactory`] binds a state type and its initial value, and declares the
//! named transitions a store will understand. Each declaration returns a
//! typed [`ActionTemplate`] for building actions at call sites, plus the
//! registry entry that is handed to `mount_store`.

use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use crate::action::{decode_payload, ActionTemplate, Payload};
use crate::error::DispatchError;

/// Outcome of a primary handler: the side-effect payload it requested, if any
pub(crate) type ReducerOutcome = Result<Option<Payload>, DispatchError>;

/// Erased primary handler: (prior state, working copy, payload)
pub(crate) type ReducerFn<S> = dyn Fn(&S, &mut S, Option<Payload>) -> ReducerOutcome;

/// Erased side-effect handler: (working copy, payload)
pub(crate) type SideEffectFn<S> = dyn Fn(&mut S, Option<Payload>) -> Result<(), DispatchError>;

/// What a primary handler sees while it runs.
///
/// `prior()` is the committed state as it was when the dispatch started.
/// `state()` is the working copy that becomes the next state. `side_effect()`
/// schedules the paired side effect, which runs once this handler returns and
/// observes its mutations.
///
/// Bare transitions use `E = Infallible`, so they cannot request a side effect.
pub struct Transition<'a, S, E = Infallible> {
    name: &'static str,
    prior: &'a S,
    state: &'a mut S,
    requested: Option<E>,
}

impl<'a, S, E> Transition<'a, S, E> {
    fn new(name: &'static str, prior: &'a S, state: &'a mut S) -> Self {
        Self {
            name,
            prior,
            state,
            requested: None,
        }
    }

    /// Name of the transition being run
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Committed state from before this dispatch (read only)
    pub fn prior(&self) -> &S {
        self.prior
    }

    /// Working copy that becomes the next state
    pub fn state(&mut self) -> &mut S {
        self.state
    }

    /// Request the paired side effect with `payload`
    ///
    /// Only one side effect runs per dispatch; a second request replaces the
    /// payload of the first.
    pub fn side_effect(&mut self, payload: E) {
        if self.requested.is_some() {
            log::warn!(
                "Transition '{}': side effect requested twice, keeping the last payload",
                self.name
            );
        }
        self.requested = Some(payload);
    }
}

/// Registry entry for a primary transition.
pub struct ReducerEntry<S> {
    name: &'static str,
    pub(crate) handler: Rc<ReducerFn<S>>,
    side_effect: Option<SideEffectEntry<S>>,
}

impl<S> ReducerEntry<S> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The side effect paired with this transition, if any
    pub fn side_effect(&self) -> Option<SideEffectEntry<S>> {
        self.side_effect.clone()
    }
}

impl<S> Clone for ReducerEntry<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            handler: Rc::clone(&self.handler),
            side_effect: self.side_effect.clone(),
        }
    }
}

impl<S> fmt::Debug for ReducerEntry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerEntry")
            .field("name", &self.name)
            .field("side_effect", &self.side_effect.is_some())
            .finish()
    }
}

/// Registry entry for a side effect.
pub struct SideEffectEntry<S> {
    name: &'static str,
    pub(crate) handler: Rc<SideEffectFn<S>>,
}

impl<S> SideEffectEntry<S> {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<S> Clone for SideEffectEntry<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            handler: Rc::clone(&self.handler),
        }
    }
}

impl<S> fmt::Debug for SideEffectEntry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideEffectEntry")
            .field("name", &self.name)
            .finish()
    }
}

/// Result of declaring a transition.
///
/// `side_effect` is the template for the paired side-effect action; bare
/// transitions have none.
#[derive(Debug)]
pub struct Declared<S, P, E = Infallible> {
    pub action: ActionTemplate<P>,
    pub reducer: ReducerEntry<S>,
    pub side_effect: Option<ActionTemplate<E>>,
}

/// Declares transitions for a state type and mounts stores for it.
pub struct StoreFactory<S> {
    pub(crate) initial_state: S,
}

/// Start declaring a store around `initial_state`
pub fn init_state<S: Clone + 'static>(initial_state: S) -> StoreFactory<S> {
    StoreFactory { initial_state }
}

impl<S: Clone + 'static> StoreFactory<S> {
    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    /// Declare a transition without a side effect
    pub fn create_reducer<P, F>(&self, name: &'static str, reducer: F) -> Declared<S, P>
    where
        P: Clone + 'static,
        F: Fn(&mut Transition<'_, S>, P) + 'static,
    {
        Declared {
            action: ActionTemplate::new(name),
            reducer: ReducerEntry {
                name,
                handler: erase_reducer::<S, P, Infallible, F>(name, reducer),
                side_effect: None,
            },
            side_effect: None,
        }
    }

    /// Declare a transition paired with a side effect
    ///
    /// The reducer may call [`Transition::side_effect`] with an `E`; the side
    /// effect then receives the working copy with the reducer's mutations
    /// applied, together with that payload.
    pub fn create_reducer_with_side_effect<P, E, G, F>(
        &self,
        name: &'static str,
        side_effect: G,
        reducer: F,
    ) -> Declared<S, P, E>
    where
        P: Clone + 'static,
        E: Clone + 'static,
        G: Fn(&mut S, E) + 'static,
        F: Fn(&mut Transition<'_, S, E>, P) + 'static,
    {
        let effect_entry = SideEffectEntry {
            name,
            handler: Rc::new(
                move |state: &mut S, payload: Option<Payload>| -> Result<(), DispatchError> {
                    let payload = decode_payload::<E>(name, payload)?;
                    side_effect(state, payload);
                    Ok(())
                },
            ),
        };

        Declared {
            action: ActionTemplate::new(name),
            reducer: ReducerEntry {
                name,
                handler: erase_reducer::<S, P, E, F>(name, reducer),
                side_effect: Some(effect_entry),
            },
            side_effect: Some(ActionTemplate::side_effect(name)),
        }
    }
}

fn erase_reducer<S, P, E, F>(name: &'static str, reducer: F) -> Rc<ReducerFn<S>>
where
    S: 'static,
    P: Clone + 'static,
    E: 'static,
    F: Fn(&mut Transition<'_, S, E>, P) + 'static,
{
    Rc::new(
        move |prior: &S, working: &mut S, payload: Option<Payload>| -> ReducerOutcome {
            let payload = decode_payload::<P>(name, payload)?;
            let mut transition = Transition::new(name, prior, working);
            reducer(&mut transition, payload);
            Ok(transition
                .requested
                .map(|requested| Rc::new(requested) as Payload))
        },
    )
}
