//! Actions and typed action templates
//!
//! An [`Action`] is a tagged value: the transition name plus an optional payload.
//! Primary actions and the side-effect actions derived from them share the
//! same names but are distinct variants, so a side effect can never be
//! mistaken for a user-declared transition.

use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::DispatchError;

/// Type-erased payload carried by an action.
pub type Payload = Rc<dyn Any>;

/// An action dispatched to a store.
#[derive(Clone)]
pub enum Action {
    /// Invokes the primary reducer registered under `name`.
    Primary {
        name: &'static str,
        payload: Option<Payload>,
    },
    /// Invokes the side effect registered under `name`.
    Effect {
        name: &'static str,
        payload: Option<Payload>,
    },
}

impl Action {
    /// Create a primary action without payload
    pub fn new(name: &'static str) -> Self {
        Action::Primary {
            name,
            payload: None,
        }
    }

    /// Create a primary action carrying `payload`
    pub fn with_payload<P: 'static>(name: &'static str, payload: P) -> Self {
        Action::Primary {
            name,
            payload: Some(Rc::new(payload)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Primary { name, .. } | Action::Effect { name, .. } => name,
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Action::Primary { payload, .. } | Action::Effect { payload, .. } => payload.as_ref(),
        }
    }

    pub fn is_side_effect(&self) -> bool {
        matches!(self, Action::Effect { .. })
    }

    /// Read the payload as `P`, if it has that type
    pub fn payload_as<P: 'static>(&self) -> Option<&P> {
        self.payload().and_then(|p| p.downcast_ref::<P>())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, name, payload) = match self {
            Action::Primary { name, payload } => ("Primary", name, payload),
            Action::Effect { name, payload } => ("Effect", name, payload),
        };
        f.debug_struct(kind)
            .field("name", name)
            .field("payload", &payload.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Decode an erased payload into the handler's payload type.
///
/// A missing payload decodes as `()` so transitions without payload can be
/// declared with `P = ()`.
pub(crate) fn decode_payload<P: Clone + 'static>(
    name: &'static str,
    payload: Option<Payload>,
) -> Result<P, DispatchError> {
    let payload = payload.unwrap_or_else(|| Rc::new(()) as Payload);
    payload
        .downcast::<P>()
        .map(|rc| Rc::try_unwrap(rc).unwrap_or_else(|shared| (*shared).clone()))
        .map_err(|_| DispatchError::PayloadMismatch {
            name,
            expected: type_name::<P>(),
        })
}

/// Typed constructor for the actions of one declared transition.
///
/// Returned by the factory functions so call sites build actions with the
/// right payload type instead of spelling names and payloads by hand.
pub struct ActionTemplate<P> {
    name: &'static str,
    side_effect: bool,
    _payload: PhantomData<fn(P)>,
}

impl<P> ActionTemplate<P> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            side_effect: false,
            _payload: PhantomData,
        }
    }

    /// Template for the side-effect action paired with `name`
    pub(crate) fn side_effect(name: &'static str) -> Self {
        Self {
            name,
            side_effect: true,
            _payload: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_side_effect(&self) -> bool {
        self.side_effect
    }

    fn build(&self, payload: Option<Payload>) -> Action {
        if self.side_effect {
            Action::Effect {
                name: self.name,
                payload,
            }
        } else {
            Action::Primary {
                name: self.name,
                payload,
            }
        }
    }
}

impl<P: 'static> ActionTemplate<P> {
    /// Build the action carrying `payload`
    pub fn with(&self, payload: P) -> Action {
        self.build(Some(Rc::new(payload)))
    }
}

impl ActionTemplate<()> {
    /// Build the action for a transition that takes no payload
    pub fn action(&self) -> Action {
        self.build(None)
    }
}

impl<P> Clone for ActionTemplate<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for ActionTemplate<P> {}

impl<P> fmt::Debug for ActionTemplate<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTemplate")
            .field("name", &self.name)
            .field("side_effect", &self.side_effect)
            .field("payload", &type_name::<P>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_builds_primary_action() {
        let template: ActionTemplate<i64> = ActionTemplate::new("increment");
        let action = template.with(5);

        assert_eq!(action.name(), "increment");
        assert!(!action.is_side_effect());
        assert_eq!(action.payload_as::<i64>(), Some(&5));
    }

    #[test]
    fn test_unit_template_has_no_payload() {
        let template: ActionTemplate<()> = ActionTemplate::new("reset");
        let action = template.action();

        assert_eq!(action.name(), "reset");
        assert!(action.payload().is_none());
    }

    #[test]
    fn test_side_effect_template_builds_effect_action() {
        let template: ActionTemplate<i64> = ActionTemplate::side_effect("increment");
        let action = template.with(7);

        assert!(template.is_side_effect());
        assert!(action.is_side_effect());
        assert_eq!(action.name(), "increment");
        assert_eq!(action.payload_as::<i64>(), Some(&7));
    }

    #[test]
    fn test_missing_payload_decodes_as_unit() {
        assert_eq!(decode_payload::<()>("reset", None), Ok(()));
    }

    #[test]
    fn test_missing_payload_is_mismatch_for_typed_handler() {
        let result = decode_payload::<i64>("increment", None);
        assert_eq!(
            result,
            Err(DispatchError::PayloadMismatch {
                name: "increment",
                expected: "i64",
            })
        );
    }

    #[test]
    fn test_shared_payload_is_cloned_out() {
        let action = Action::with_payload("push", vec![1, 2, 3]);
        let payload = action.payload().cloned();

        // the action still holds a reference, so decoding must clone
        let decoded = decode_payload::<Vec<i32>>("push", payload).unwrap();
        assert_eq!(decoded, vec![1, 2, 3]);
        assert_eq!(action.payload_as::<Vec<i32>>(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_debug_hides_payload_contents() {
        let action = Action::with_payload("increment", 5_i64);
        assert_eq!(
            format!("{:?}", action),
            r#"Primary { name: "increment", payload: Some("..") }"#
        );
    }
}
