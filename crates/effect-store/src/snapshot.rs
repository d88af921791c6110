//! State snapshots
//!
//! Every dispatch works on a private copy of the committed state. The copy
//! must not share any mutable structure with the original, otherwise a
//! handler mutating the working copy would also change the state other
//! holders still see.
//!
//! Owned data (`String`, `Vec`, `HashMap`, nested structs of those) clones
//! deeply. State containing `Rc<RefCell<_>>` or similar shared handles does
//! not, and is not supported as store state.

/// Produce an isolated copy of a state value.
pub trait Snapshot {
    fn snapshot(&self) -> Self;
}

impl<T: Clone> Snapshot for T {
    fn snapshot(&self) -> Self {
        self.clone()
    }
}

/// Take the working copy for one dispatch
pub(crate) fn working_copy<S: Snapshot>(state: &S) -> S {
    log::trace!("Snapshot: copying {}", std::any::type_name::<S>());
    state.snapshot()
}
