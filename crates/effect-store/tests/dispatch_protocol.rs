use std::cell::RefCell;
use std::rc::Rc;

use effect_store::{init_state, Action, DispatchError, MountedStore, StoreFactory};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq, Default)]
struct AppState {
    count: i64,
    log: Vec<i64>,
    title: String,
}

/// Records which handlers ran, in order
type Calls = Rc<RefCell<Vec<String>>>;

struct Fixture {
    store: MountedStore<AppState>,
    calls: Calls,
}

fn record(calls: &Calls, entry: impl Into<String>) {
    calls.borrow_mut().push(entry.into());
}

fn counter_store(factory: &StoreFactory<AppState>) -> Fixture {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));

    let (primary, effect) = (Rc::clone(&calls), Rc::clone(&calls));
    let increment = factory.create_reducer_with_side_effect(
        "increment",
        move |state: &mut AppState, n: i64| {
            // sees the reducer's mutation already applied
            record(&effect, format!("logged count={}", state.count));
            state.log.push(n);
        },
        move |t, n: i64| {
            record(&primary, "increment");
            t.state().count += n;
            t.side_effect(n);
        },
    );

    let quiet = Rc::clone(&calls);
    let add_silently = factory.create_reducer_with_side_effect(
        "add_silently",
        |state: &mut AppState, n: i64| state.log.push(n),
        move |t, n: i64| {
            record(&quiet, "add_silently");
            t.state().count += n;
        },
    );

    let resets = Rc::clone(&calls);
    let reset = factory.create_reducer("reset", move |t, ()| {
        record(&resets, "reset");
        t.state().count = 0;
    });

    let rename = factory.create_reducer("rename", |t, title: String| t.state().title = title);

    let side_effects: Vec<_> = [&increment.reducer, &add_silently.reducer]
        .into_iter()
        .filter_map(|reducer| reducer.side_effect())
        .collect();

    let store = factory.mount_store(
        &[
            increment.reducer,
            add_silently.reducer,
            reset.reducer,
            rename.reducer,
        ],
        &[
            increment.action.name(),
            add_silently.action.name(),
            reset.action.name(),
            rename.action.name(),
        ],
        &side_effects,
    );

    Fixture { store, calls }
}

#[test]
fn test_increment_runs_reducer_then_side_effect() {
    let factory = init_state(AppState::default());
    let Fixture { store, calls } = counter_store(&factory);

    store
        .provider
        .try_dispatch(Action::with_payload("increment", 5_i64))
        .unwrap();

    assert_eq!(
        *store.provider.state(),
        AppState {
            count: 5,
            log: vec![5],
            title: String::new(),
        }
    );
    assert_eq!(
        *calls.borrow(),
        vec!["increment".to_string(), "logged count=5".to_string()]
    );
}

#[test]
fn test_reset_leaves_log_untouched() {
    let factory = init_state(AppState::default());
    let Fixture { store, .. } = counter_store(&factory);

    store
        .provider
        .try_dispatch(Action::with_payload("increment", 5_i64))
        .unwrap();
    store.provider.try_dispatch(Action::new("reset")).unwrap();

    assert_eq!(store.use_store_selects(|s| s.count), 0);
    assert_eq!(store.use_store_selects(|s| s.log.clone()), vec![5]);
}

#[test]
fn test_declared_side_effect_does_not_run_unless_requested() {
    let factory = init_state(AppState::default());
    let Fixture { store, calls } = counter_store(&factory);

    store
        .provider
        .try_dispatch(Action::with_payload("add_silently", 3_i64))
        .unwrap();

    assert_eq!(store.use_store_selects(|s| s.count), 3);
    assert!(store.use_store_selects(|s| s.log.is_empty()));
    assert_eq!(*calls.borrow(), vec!["add_silently".to_string()]);
}

#[test]
fn test_one_commit_per_dispatch() {
    let factory = init_state(AppState::default());
    let Fixture { store, .. } = counter_store(&factory);

    let initial = store.provider.state();
    store
        .provider
        .try_dispatch(Action::with_payload("increment", 1_i64))
        .unwrap();
    let after_paired = store.provider.state();
    store.provider.try_dispatch(Action::new("reset")).unwrap();

    assert_eq!(store.provider.revision(), 2);
    assert!(!Rc::ptr_eq(&initial, &after_paired));
    assert!(!Rc::ptr_eq(&after_paired, &store.provider.state()));
}

#[test]
fn test_unrelated_transition_keeps_other_projections() {
    let factory = init_state(AppState::default());
    let Fixture { store, .. } = counter_store(&factory);
    store
        .provider
        .try_dispatch(Action::with_payload("increment", 2_i64))
        .unwrap();

    let before = store.use_store_selects(|s| (s.count, s.log.clone()));
    store
        .provider
        .try_dispatch(Action::with_payload("rename", "inbox".to_string()))
        .unwrap();
    let after = store.use_store_selects(|s| (s.count, s.log.clone()));

    assert_eq!(before, after);
    assert_eq!(store.use_store_selects(|s| s.title.clone()), "inbox");
}

#[test]
fn test_unregistered_action_fails_without_commit() {
    let factory = init_state(AppState::default());
    let Fixture { store, calls } = counter_store(&factory);
    store
        .provider
        .try_dispatch(Action::with_payload("increment", 5_i64))
        .unwrap();
    let before = store.provider.state();

    let result = store.provider.try_dispatch(Action::new("decrement"));

    assert_eq!(result, Err(DispatchError::UnregisteredReducer("decrement")));
    assert!(Rc::ptr_eq(&before, &store.provider.state()));
    assert_eq!(store.provider.revision(), 1);
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn test_wrong_payload_fails_without_commit() {
    let factory = init_state(AppState::default());
    let Fixture { store, calls } = counter_store(&factory);

    let result = store
        .provider
        .try_dispatch(Action::with_payload("increment", "five"));

    assert!(matches!(
        result,
        Err(DispatchError::PayloadMismatch {
            name: "increment",
            ..
        })
    ));
    assert_eq!(store.provider.revision(), 0);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_duplicate_name_uses_last_declaration() {
    let factory = init_state(AppState::default());
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));

    let first_calls = Rc::clone(&calls);
    let first = factory.create_reducer("x", move |t, ()| {
        record(&first_calls, "first");
        t.state().count += 1;
    });
    let second_calls = Rc::clone(&calls);
    let second = factory.create_reducer("x", move |t, ()| {
        record(&second_calls, "second");
        t.state().count += 10;
    });

    let store = factory.mount_store(&[first.reducer, second.reducer], &["x"], &[]);
    store
        .provider
        .try_dispatch(second.action.action())
        .unwrap();

    assert_eq!(*calls.borrow(), vec!["second".to_string()]);
    assert_eq!(store.use_store_selects(|s| s.count), 10);
    assert_eq!(store.provider.revision(), 1);
}

#[test]
fn test_panicking_side_effect_keeps_previous_commit() {
    let factory = init_state(AppState::default());
    let explode = factory.create_reducer_with_side_effect(
        "explode",
        |_state: &mut AppState, ()| panic!("side effect failed"),
        |t, ()| {
            t.state().count = 99;
            t.side_effect(());
        },
    );
    let side_effects: Vec<_> = explode.reducer.side_effect().into_iter().collect();
    let store = factory.mount_store(&[explode.reducer], &["explode"], &side_effects);

    let provider = store.provider.clone();
    let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        provider.try_dispatch(Action::new("explode"))
    }));

    assert!(unwound.is_err());
    assert_eq!(store.use_store_selects(|s| s.count), 0);
    assert_eq!(store.provider.revision(), 0);

    // the store is usable again after unwinding
    let result = store.provider.try_dispatch(Action::new("missing"));
    assert_eq!(result, Err(DispatchError::UnregisteredReducer("missing")));
}

#[test]
fn test_side_effect_template_dispatches_side_effect_only() {
    let factory = init_state(AppState::default());
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));

    let (primary, effect) = (Rc::clone(&calls), Rc::clone(&calls));
    let tag = factory.create_reducer_with_side_effect(
        "tag",
        move |state: &mut AppState, label: String| {
            record(&effect, "tagged");
            state.title = label;
        },
        move |t, ()| {
            record(&primary, "tag");
            t.state().count += 1;
        },
    );
    let side_effects: Vec<_> = tag.reducer.side_effect().into_iter().collect();
    let store = factory.mount_store(&[tag.reducer], &[tag.action.name()], &side_effects);

    let effect_action = tag
        .side_effect
        .expect("paired transition has a side-effect template")
        .with("urgent".to_string());
    store.provider.try_dispatch(effect_action).unwrap();

    assert_eq!(*calls.borrow(), vec!["tagged".to_string()]);
    assert_eq!(
        *store.provider.state(),
        AppState {
            count: 0,
            log: vec![],
            title: "urgent".to_string(),
        }
    );
    assert_eq!(store.provider.revision(), 1);
}
