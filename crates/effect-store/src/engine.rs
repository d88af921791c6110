//! Dispatch engine
//!
//! Runs one action against a committed state and returns the next state:
//!
//! ```text
//! Idle -> RunningPrimary -> [RunningSideEffect] -> Idle
//! ```
//!
//! The primary handler mutates a fresh working copy. If it requests its side
//! effect, the engine re-enters itself with `Action::Effect` before returning,
//! and the side effect mutates the same working copy. The caller commits the
//! result once, so consumers see a single state change per dispatch.

use std::fmt;

use crate::action::Action;
use crate::error::DispatchError;
use crate::registry::ActionRegistry;
use crate::snapshot::{working_copy, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    RunningPrimary,
    RunningSideEffect,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::RunningPrimary => write!(f, "running primary"),
            Phase::RunningSideEffect => write!(f, "running side effect"),
        }
    }
}

pub struct DispatchEngine<S> {
    registry: ActionRegistry<S>,
    phase: Phase,
}

impl<S: Snapshot> DispatchEngine<S> {
    pub fn new(registry: ActionRegistry<S>) -> Self {
        Self {
            registry,
            phase: Phase::Idle,
        }
    }

    pub fn registry(&self) -> &ActionRegistry<S> {
        &self.registry
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run `action` against `state` and return the next state
    ///
    /// `state` itself is never modified. On error the partially mutated
    /// working copy is dropped.
    pub fn reduce(&mut self, state: &S, action: &Action) -> Result<S, DispatchError> {
        if self.phase != Phase::Idle {
            // a previous dispatch unwound out of a handler
            log::warn!("Dispatch: engine found {}, resetting", self.phase);
            self.phase = Phase::Idle;
        }

        let mut working = working_copy(state);
        let result = self.apply(state, &mut working, action);
        enter(&mut self.phase, Phase::Idle, action.name());

        match result {
            Ok(()) => Ok(working),
            Err(e) => {
                log::error!("Dispatch: {:?} failed: {}", action, e);
                Err(e)
            }
        }
    }

    fn apply(
        &mut self,
        prior: &S,
        working: &mut S,
        action: &Action,
    ) -> Result<(), DispatchError> {
        match action {
            Action::Primary { name, payload } => {
                let reducer = self
                    .registry
                    .reducer(name)
                    .ok_or(DispatchError::UnregisteredReducer(*name))?;

                enter(&mut self.phase, Phase::RunningPrimary, name);
                let requested = reducer(prior, &mut *working, payload.clone())?;

                if let Some(payload) = requested {
                    let effect = Action::Effect {
                        name: *name,
                        payload: Some(payload),
                    };
                    self.apply(prior, working, &effect)?;
                }
                Ok(())
            }
            Action::Effect { name, payload } => {
                let side_effect = self
                    .registry
                    .side_effect(name)
                    .ok_or(DispatchError::UnregisteredSideEffect(*name))?;

                enter(&mut self.phase, Phase::RunningSideEffect, name);
                side_effect(working, payload.clone())
            }
        }
    }
}

fn enter(current: &mut Phase, next: Phase, name: &str) {
    log::trace!("Dispatch: '{}' {} -> {}", name, current, next);
    *current = next;
}

impl<S> fmt::Debug for DispatchEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchEngine")
            .field("registry", &self.registry)
            .field("phase", &self.phase)
            .finish()
    }
}
