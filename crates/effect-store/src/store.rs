use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::action::Action;
use crate::declaration::{ReducerEntry, SideEffectEntry, StoreFactory};
use crate::engine::DispatchEngine;
use crate::error::DispatchError;
use crate::middleware::Middleware;
use crate::registry::ActionRegistry;

/// Engine plus middleware; borrowed mutably for the duration of one dispatch
struct Pipeline<S> {
    engine: DispatchEngine<S>,
    middleware: Vec<Box<dyn Middleware<S>>>,
}

/// Shared context behind every handle to one mounted store
struct StoreContext<S> {
    state: RefCell<Rc<S>>,
    revision: Cell<u64>,
    reducer_names: Vec<&'static str>,
    pipeline: RefCell<Pipeline<S>>,
}

/// Store - holds the committed state and the dispatch entry point
///
/// Cloning the provider shares the same store. Reads made while a dispatch is
/// running see the last committed state.
pub struct StoreProvider<S> {
    context: Rc<StoreContext<S>>,
}

impl<S> Clone for StoreProvider<S> {
    fn clone(&self) -> Self {
        Self {
            context: Rc::clone(&self.context),
        }
    }
}

impl<S: Clone + 'static> StoreProvider<S> {
    pub fn new(initial_state: S, registry: ActionRegistry<S>) -> Self {
        Self {
            context: Rc::new(StoreContext {
                state: RefCell::new(Rc::new(initial_state)),
                revision: Cell::new(0),
                reducer_names: registry.reducer_names(),
                pipeline: RefCell::new(Pipeline {
                    engine: DispatchEngine::new(registry),
                    middleware: Vec::new(),
                }),
            }),
        }
    }

    /// Get the current committed state
    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.context.state.borrow())
    }

    /// Number of commits since the store was mounted
    pub fn revision(&self) -> u64 {
        self.context.revision.get()
    }

    /// Apply `projection` to the current state
    pub fn select<T>(&self, projection: impl FnOnce(&S) -> T) -> T {
        let state = self.state();
        projection(&state)
    }

    /// Add middleware to the store
    ///
    /// Middleware runs in the order it was added. Fails when called from
    /// inside a dispatch.
    pub fn add_middleware<M: Middleware<S> + 'static>(
        &self,
        middleware: M,
    ) -> Result<(), DispatchError> {
        let mut pipeline = self
            .context
            .pipeline
            .try_borrow_mut()
            .map_err(|_| DispatchError::Reentrant)?;
        pipeline.middleware.push(Box::new(middleware));
        Ok(())
    }

    /// Process an action through the middleware chain and the engine
    ///
    /// On success the next state is committed and the revision advances by
    /// one. On error nothing is committed.
    pub fn try_dispatch(&self, action: Action) -> Result<(), DispatchError> {
        let mut pipeline = self
            .context
            .pipeline
            .try_borrow_mut()
            .map_err(|_| DispatchError::Reentrant)?;
        let Pipeline { engine, middleware } = &mut *pipeline;

        let current = self.state();
        for middleware in middleware.iter_mut() {
            if !middleware.handle(&action, &current) {
                log::debug!("Action '{}' consumed by middleware", action.name());
                return Ok(());
            }
        }

        let next = engine.reduce(&current, &action)?;
        *self.context.state.borrow_mut() = Rc::new(next);
        self.context.revision.set(self.context.revision.get() + 1);
        Ok(())
    }

    /// Fire-and-forget dispatch; failures are logged
    pub fn dispatch(&self, action: Action) {
        let name = action.name();
        if let Err(e) = self.try_dispatch(action) {
            log::error!("Store: failed to dispatch '{}': {}", name, e);
        }
    }

    /// Handle for issuing actions
    pub fn dispatcher(&self) -> ActionDispatcher<S> {
        ActionDispatcher {
            provider: self.clone(),
        }
    }

    /// Handle for reading projections of state
    pub fn selector(&self) -> StateSelector<S> {
        StateSelector {
            provider: self.clone(),
        }
    }

    /// Names the store can dispatch as primary actions
    pub fn reducer_names(&self) -> &[&'static str] {
        &self.context.reducer_names
    }
}

impl<S: fmt::Debug> fmt::Debug for StoreProvider<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreProvider")
            .field("state", &self.context.state.borrow())
            .field("revision", &self.context.revision.get())
            .finish()
    }
}

/// Dispatch-issuing accessor
pub struct ActionDispatcher<S> {
    provider: StoreProvider<S>,
}

impl<S: Clone + 'static> ActionDispatcher<S> {
    pub fn dispatch(&self, action: Action) {
        self.provider.dispatch(action);
    }
}

impl<S> Clone for ActionDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

/// State-query accessor
pub struct StateSelector<S> {
    provider: StoreProvider<S>,
}

impl<S: Clone + 'static> StateSelector<S> {
    pub fn select<T>(&self, projection: impl FnOnce(&S) -> T) -> T {
        self.provider.select(projection)
    }
}

impl<S> Clone for StateSelector<S> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

/// A mounted store together with its accessors
pub struct MountedStore<S> {
    pub provider: StoreProvider<S>,
}

impl<S: Clone + 'static> MountedStore<S> {
    pub fn use_store_actions(&self) -> ActionDispatcher<S> {
        self.provider.dispatcher()
    }

    pub fn use_store_selects<T>(&self, projection: impl FnOnce(&S) -> T) -> T {
        self.provider.select(projection)
    }
}

impl<S: Clone + 'static> StoreFactory<S> {
    /// Mount a new store from declared transitions
    ///
    /// `actions` lists the names of the action templates consumers will
    /// dispatch; names with no registered reducer are reported. Side effects
    /// are only registered when passed in `side_effects`.
    pub fn mount_store(
        &self,
        reducers: &[ReducerEntry<S>],
        actions: &[&'static str],
        side_effects: &[SideEffectEntry<S>],
    ) -> MountedStore<S> {
        let registry = ActionRegistry::build(reducers, side_effects);
        for name in actions {
            if !registry.contains_reducer(name) {
                log::warn!("Store: action '{}' has no registered reducer", name);
            }
        }

        MountedStore {
            provider: StoreProvider::new(self.initial_state.clone(), registry),
        }
    }
}
