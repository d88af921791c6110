//! Middleware chain
//!
//! Every action passes through the store's middleware, in the order it was
//! added, before it reaches the dispatch engine.
//!
//! ```text
//! Action → Middleware Chain → Dispatch Engine → State
//! ```

use crate::action::Action;

/// Middleware trait - intercepts actions before they reach the engine
pub trait Middleware<S> {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Committed state before this action (read-only)
    ///
    /// Returns `true` to continue the chain, `false` to consume the action.
    /// A consumed action does not change state.
    fn handle(&mut self, action: &Action, state: &S) -> bool;
}

/// LoggingMiddleware - logs all actions passing through
#[derive(Debug, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Middleware<S> for LoggingMiddleware {
    fn handle(&mut self, action: &Action, _state: &S) -> bool {
        log::debug!("Action: {:?}", action);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_middleware_passes_through() {
        let mut middleware = LoggingMiddleware::new();

        let should_continue = middleware.handle(&Action::new("reset"), &0_u32);

        assert!(should_continue);
    }
}
