use thiserror::Error;

/// Errors that can occur while dispatching an action.
///
/// A failed dispatch never commits: the store keeps the state it had before
/// the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No reducer was registered under this name.
    #[error("No reducer registered for action '{0}'")]
    UnregisteredReducer(&'static str),

    /// A side effect was requested (or dispatched) but none is registered.
    #[error("No side effect registered for action '{0}'")]
    UnregisteredSideEffect(&'static str),

    /// The payload carried by the action does not decode to the handler's type.
    #[error("Payload for '{name}' does not match expected type {expected}")]
    PayloadMismatch {
        name: &'static str,
        expected: &'static str,
    },

    /// The store was dispatched to while it was already processing an action.
    #[error("Store is already dispatching an action")]
    Reentrant,
}
