//! Pure transition function of the session guard.
//!
//! `AccessMachine` folds bootstrap results and change events into an
//! `AuthorizationState` and reports the side effects the runtime must carry
//! out. It performs no I/O, so every ordering of inputs can be replayed
//! deterministically in tests.
//!
//! # Rules
//!
//! | Input | Predicate | Next state | Effects |
//! |-------|-----------|------------|---------|
//! | bootstrap, no session | - | `Unauthorized` | - |
//! | bootstrap, session | pass | `Authorized` | - |
//! | bootstrap, session | fail | `Unauthorized` | denial, sign-out |
//! | bootstrap, error | - | `Unauthorized` | error |
//! | `SignedIn` | pass | `Authorized` | welcome |
//! | `SignedIn` | fail | `Unauthorized` | denial, sign-out |
//! | `SignedOut` | - | `Unauthorized` | - |
//!
//! Once any change event has been applied, a bootstrap result is stale and
//! is dropped without effect.

use crate::domain::foundation::{Identity, StateMachine};

use super::errors::AuthError;
use super::notification::messages;
use super::predicate::PrivilegePredicate;
use super::session::{ChangeEvent, ChangeKind, Session};
use super::state::AuthorizationState;

/// An input funnelled into the guard's single writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardInput {
    /// Result of the one-shot current-session lookup.
    Bootstrap(Result<Option<Session>, AuthError>),
    /// A session-change event pushed by the provider.
    Change(ChangeEvent),
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardEffect {
    NotifySuccess(&'static str),
    NotifyError(&'static str),
    /// Corrective sign-out of a session that failed the predicate.
    SignOut,
}

/// How an input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Applied,
    /// Bootstrap arrived after an event (or a previous bootstrap) decided.
    StaleBootstrap,
    /// `SignedIn` without an identity; nothing to decide on.
    AnonymousSignIn,
    /// `SignedOut` echoing a sign-out the guard issued itself.
    CorrectiveSignOutEcho,
}

/// Result of applying one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub disposition: Disposition,
    /// True when the published state changed value.
    pub changed: bool,
    pub effects: Vec<GuardEffect>,
}

impl Outcome {
    fn skipped(disposition: Disposition) -> Self {
        Self {
            disposition,
            changed: false,
            effects: Vec::new(),
        }
    }
}

/// Serialized state of one guard activation.
#[derive(Debug, Clone, Default)]
pub struct AccessMachine {
    state: AuthorizationState,
    bootstrap_settled: bool,
    events_seen: bool,
    pending_sign_outs: usize,
}

impl AccessMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthorizationState {
        &self.state
    }

    /// Whether a change event has already decided the state.
    pub fn events_seen(&self) -> bool {
        self.events_seen
    }

    /// Corrective sign-outs issued but not yet echoed back as `SignedOut`.
    pub fn pending_sign_outs(&self) -> usize {
        self.pending_sign_outs
    }

    /// Records that a corrective sign-out failed, so no `SignedOut` will
    /// echo it.
    pub fn sign_out_failed(&mut self) {
        self.pending_sign_outs = self.pending_sign_outs.saturating_sub(1);
    }

    /// Applies one input. The predicate is evaluated inside this call, so
    /// the state never holds an identity it rejects.
    pub fn apply(&mut self, input: GuardInput, predicate: &dyn PrivilegePredicate) -> Outcome {
        match input {
            GuardInput::Bootstrap(result) => self.apply_bootstrap(result, predicate),
            GuardInput::Change(event) => self.apply_change(event, predicate),
        }
    }

    fn apply_bootstrap(
        &mut self,
        result: Result<Option<Session>, AuthError>,
        predicate: &dyn PrivilegePredicate,
    ) -> Outcome {
        if self.events_seen || self.bootstrap_settled {
            return Outcome::skipped(Disposition::StaleBootstrap);
        }
        self.bootstrap_settled = true;

        match result {
            Err(_) => self.settle(
                AuthorizationState::Unauthorized,
                vec![GuardEffect::NotifyError(messages::AUTHENTICATION_ERROR)],
            ),
            Ok(None) => self.settle(AuthorizationState::Unauthorized, Vec::new()),
            Ok(Some(session)) => {
                let identity = session.into_identity();
                if predicate.is_authorized(&identity) {
                    self.settle(AuthorizationState::Authorized(identity), Vec::new())
                } else {
                    self.deny()
                }
            }
        }
    }

    fn apply_change(&mut self, event: ChangeEvent, predicate: &dyn PrivilegePredicate) -> Outcome {
        match (event.kind, event.identity) {
            (ChangeKind::SignedIn, None) => Outcome::skipped(Disposition::AnonymousSignIn),
            (ChangeKind::SignedIn, Some(identity)) => {
                self.events_seen = true;
                self.sign_in(identity, predicate)
            }
            (ChangeKind::SignedOut, _) => {
                self.events_seen = true;
                let echo = self.pending_sign_outs > 0;
                if echo {
                    self.pending_sign_outs -= 1;
                }
                let mut outcome = self.settle(AuthorizationState::Unauthorized, Vec::new());
                if echo {
                    outcome.disposition = Disposition::CorrectiveSignOutEcho;
                }
                outcome
            }
        }
    }

    fn sign_in(&mut self, identity: Identity, predicate: &dyn PrivilegePredicate) -> Outcome {
        if predicate.is_authorized(&identity) {
            self.settle(
                AuthorizationState::Authorized(identity),
                vec![GuardEffect::NotifySuccess(messages::WELCOME)],
            )
        } else {
            self.deny()
        }
    }

    fn deny(&mut self) -> Outcome {
        self.pending_sign_outs += 1;
        self.settle(
            AuthorizationState::Unauthorized,
            vec![
                GuardEffect::NotifyError(messages::ACCESS_DENIED),
                GuardEffect::SignOut,
            ],
        )
    }

    fn settle(&mut self, next: AuthorizationState, effects: Vec<GuardEffect>) -> Outcome {
        debug_assert!(self.state.phase().can_transition_to(&next.phase()));
        let changed = self.state != next;
        self.state = next;
        Outcome {
            disposition: Disposition::Applied,
            changed,
            effects,
        }
    }
}
