//! Counter store used by the demo

use effect_store::{
    init_state, ActionTemplate, Declared, DispatchError, LoggingMiddleware, MountedStore,
    StoreFactory,
};
use serde::Serialize;

use crate::config::DemoConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CounterState {
    pub count: i64,
    pub history: Vec<Change>,
}

/// One applied change, recorded by the side effect after the count moved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    pub delta: i64,
    pub total: i64,
}

pub struct Counter {
    store: MountedStore<CounterState>,
    increment: ActionTemplate<i64>,
    decrement: ActionTemplate<i64>,
    reset: ActionTemplate<()>,
}

impl Counter {
    pub fn mount(config: &DemoConfig) -> Result<Self, DispatchError> {
        let factory = init_state(CounterState {
            count: config.initial_count,
            history: Vec::new(),
        });

        let limit = config.history_limit;
        let record = move |state: &mut CounterState, delta: i64| {
            state.history.push(Change {
                delta,
                total: state.count,
            });
            if state.history.len() > limit {
                let excess = state.history.len() - limit;
                state.history.drain(..excess);
            }
        };

        let increment = factory.create_reducer_with_side_effect(
            "increment",
            record,
            |t, n: i64| {
                let applied = shift(&mut t.state().count, n, i64::saturating_add);
                t.side_effect(applied);
            },
        );
        let decrement = factory.create_reducer_with_side_effect(
            "decrement",
            record,
            |t, n: i64| {
                let applied = shift(&mut t.state().count, n, i64::saturating_sub);
                t.side_effect(applied);
            },
        );
        let reset = factory.create_reducer("reset", |t, ()| t.state().count = 0);

        let counter = Self {
            store: mount(&factory, &increment, &decrement, &reset),
            increment: increment.action,
            decrement: decrement.action,
            reset: reset.action,
        };
        counter.store.provider.add_middleware(LoggingMiddleware::new())?;
        Ok(counter)
    }

    pub fn increment(&self, n: i64) -> Result<(), DispatchError> {
        self.store.provider.try_dispatch(self.increment.with(n))
    }

    pub fn decrement(&self, n: i64) -> Result<(), DispatchError> {
        self.store.provider.try_dispatch(self.decrement.with(n))
    }

    pub fn reset(&self) -> Result<(), DispatchError> {
        self.store.provider.try_dispatch(self.reset.action())
    }

    pub fn state(&self) -> CounterState {
        self.store.use_store_selects(CounterState::clone)
    }
}

/// Move `count` by `amount`, clamped at the i64 bounds; returns the change applied
fn shift(count: &mut i64, amount: i64, op: fn(i64, i64) -> i64) -> i64 {
    let before = *count;
    *count = op(before, amount);
    count.saturating_sub(before)
}

fn mount(
    factory: &StoreFactory<CounterState>,
    increment: &Declared<CounterState, i64, i64>,
    decrement: &Declared<CounterState, i64, i64>,
    reset: &Declared<CounterState, ()>,
) -> MountedStore<CounterState> {
    let reducers = [
        increment.reducer.clone(),
        decrement.reducer.clone(),
        reset.reducer.clone(),
    ];
    let side_effects: Vec<_> = reducers
        .iter()
        .filter_map(|reducer| reducer.side_effect())
        .collect();

    factory.mount_store(
        &reducers,
        &[
            increment.action.name(),
            decrement.action.name(),
            reset.action.name(),
        ],
        &side_effects,
    )
}
