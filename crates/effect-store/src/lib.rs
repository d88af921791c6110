//! # effect-store
//!
//! Typed action-dispatch state containers with paired side effects.
//!
//! A store is declared around an initial state. Each named transition has a
//! primary reducer and, optionally, a side effect. The reducer mutates a
//! private working copy of the state and may request its side effect; the
//! side effect then runs on the same working copy, after the reducer's
//! mutations. The store commits the working copy once per dispatch.
//!
//! ## Usage
//!
//! ```rust
//! use effect_store::init_state;
//!
//! #[derive(Debug, Clone, Default)]
//! struct Counter {
//!     count: i64,
//!     log: Vec<i64>,
//! }
//!
//! let factory = init_state(Counter::default());
//!
//! let increment = factory.create_reducer_with_side_effect(
//!     "increment",
//!     |state: &mut Counter, n: i64| state.log.push(n),
//!     |t, n: i64| {
//!         t.state().count += n;
//!         t.side_effect(n);
//!     },
//! );
//! let reset = factory.create_reducer("reset", |t, ()| t.state().count = 0);
//!
//! let side_effects: Vec<_> = increment.reducer.side_effect().into_iter().collect();
//! let store = factory.mount_store(
//!     &[increment.reducer, reset.reducer],
//!     &[increment.action.name(), reset.action.name()],
//!     &side_effects,
//! );
//!
//! let dispatch = store.use_store_actions();
//! dispatch.dispatch(increment.action.with(5));
//! assert_eq!(store.use_store_selects(|s| (s.count, s.log.clone())), (5, vec![5]));
//!
//! dispatch.dispatch(reset.action.action());
//! assert_eq!(store.use_store_selects(|s| (s.count, s.log.clone())), (0, vec![5]));
//! ```

pub mod action;
pub mod declaration;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod registry;
pub mod snapshot;
pub mod store;

pub use action::{Action, ActionTemplate, Payload};
pub use declaration::{
    init_state, Declared, ReducerEntry, SideEffectEntry, StoreFactory, Transition,
};
pub use engine::{DispatchEngine, Phase};
pub use error::DispatchError;
pub use middleware::{LoggingMiddleware, Middleware};
pub use registry::ActionRegistry;
pub use snapshot::Snapshot;
pub use store::{ActionDispatcher, MountedStore, StateSelector, StoreProvider};
