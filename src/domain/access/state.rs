//! Authorization state exposed by the session guard.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Identity, StateMachine};

/// The single externally observable signal of a session guard.
///
/// Created `Indeterminate` on activation. Once a decision has been made the
/// guard only moves between `Authorized` and `Unauthorized`; it never goes
/// back to `Indeterminate`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "identity", rename_all = "snake_case")]
pub enum AuthorizationState {
    #[default]
    Indeterminate,
    Authorized(Identity),
    Unauthorized,
}

impl AuthorizationState {
    /// Returns the coarse phase without the identity payload.
    pub fn phase(&self) -> AuthorizationPhase {
        match self {
            AuthorizationState::Indeterminate => AuthorizationPhase::Indeterminate,
            AuthorizationState::Authorized(_) => AuthorizationPhase::Authorized,
            AuthorizationState::Unauthorized => AuthorizationPhase::Unauthorized,
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthorizationState::Authorized(_))
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, AuthorizationState::Indeterminate)
    }

    /// Identity of the authorized principal, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthorizationState::Authorized(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Phase of an `AuthorizationState`, used to validate transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationPhase {
    Indeterminate,
    Authorized,
    Unauthorized,
}

impl StateMachine for AuthorizationPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        !matches!(target, AuthorizationPhase::Indeterminate)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        vec![AuthorizationPhase::Authorized, AuthorizationPhase::Unauthorized]
    }
}
