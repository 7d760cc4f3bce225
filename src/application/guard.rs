//! Session authorization guard.
//!
//! Decides whether the privileged console may be shown by reconciling a
//! one-shot bootstrap lookup, the provider's change-event stream and the
//! privilege predicate.
//!
//! # Runtime Layout
//!
//! ```text
//!  activate()
//!     │
//!     ├── provider.subscribe() ─────────────┐
//!     │                                     ▼
//!     ├── bootstrap task ── oneshot ──▶ guard actor ──▶ AccessMachine
//!     │   (current_session)                 │              (under mutex)
//!     │                                     ▼
//!     └── watch::Receiver ◀──────── published AuthorizationState
//! ```
//!
//! Every input goes through the actor and is applied under the core mutex,
//! which also holds the `active` flag. `deactivate` clears the flag under
//! the same lock, so once it returns no transition can be published. The
//! actor (and with it the subscription) is then aborted. A bootstrap lookup
//! still in flight runs to completion and its result is dropped.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::access::{
    AccessMachine, AuthError, AuthorizationState, Disposition, GuardEffect, GuardInput,
    PrivilegePredicate, Session,
};
use crate::ports::{Notifier, SessionProvider, SessionSubscription};

use super::view::GuardedView;

/// Unique identifier of one guard activation, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuardId(Uuid);

impl GuardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GuardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GuardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Runtime settings of a guard.
#[derive(Debug, Clone, Default)]
pub struct GuardSettings {
    /// Upper bound on the bootstrap lookup. `None` waits indefinitely.
    pub bootstrap_timeout: Option<Duration>,
}

impl GuardSettings {
    pub fn with_bootstrap_timeout(mut self, timeout: Duration) -> Self {
        self.bootstrap_timeout = Some(timeout);
        self
    }
}

struct GuardCore {
    machine: AccessMachine,
    active: bool,
}

struct GuardShared {
    core: Mutex<GuardCore>,
    publisher: watch::Sender<AuthorizationState>,
}

/// Guard over the privileged console for one view lifetime.
///
/// Dropping the guard deactivates it.
pub struct SessionGuard {
    id: GuardId,
    shared: Arc<GuardShared>,
    state: watch::Receiver<AuthorizationState>,
    shutdown: watch::Sender<bool>,
    actor: Option<JoinHandle<()>>,
}

impl SessionGuard {
    /// Opens the change subscription, starts the bootstrap lookup and
    /// returns a guard in the `Indeterminate` state.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn activate(
        provider: Arc<dyn SessionProvider>,
        predicate: Arc<dyn PrivilegePredicate>,
        notifier: Arc<dyn Notifier>,
        settings: GuardSettings,
    ) -> Self {
        let id = GuardId::new();
        let (publisher, state) = watch::channel(AuthorizationState::Indeterminate);
        let shared = Arc::new(GuardShared {
            core: Mutex::new(GuardCore {
                machine: AccessMachine::new(),
                active: true,
            }),
            publisher,
        });
        let (shutdown, shutdown_rx) = watch::channel(false);

        // Subscribe before the lookup starts so no event falls in between.
        let subscription = provider.subscribe();
        let bootstrap = spawn_bootstrap(id, provider.clone(), settings.bootstrap_timeout);

        let actor = GuardActor {
            id,
            shared: shared.clone(),
            provider,
            predicate,
            notifier,
        };
        let handle = tokio::spawn(actor.run(subscription, bootstrap, shutdown_rx));

        tracing::info!(guard_id = %id, "session guard activated");

        Self {
            id,
            shared,
            state,
            shutdown,
            actor: Some(handle),
        }
    }

    pub fn id(&self) -> GuardId {
        self.id
    }

    /// Latest published authorization state.
    pub fn state(&self) -> AuthorizationState {
        self.state.borrow().clone()
    }

    /// A receiver notified on every published state change.
    pub fn subscribe(&self) -> watch::Receiver<AuthorizationState> {
        self.state.clone()
    }

    /// A view consumer reading this guard's state.
    pub fn view(&self, login_path: impl Into<String>) -> GuardedView {
        GuardedView::new(self.subscribe(), login_path)
    }

    pub fn is_active(&self) -> bool {
        self.shared
            .core
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active
    }

    /// Waits until the state has left `Indeterminate` and returns it.
    ///
    /// With no bootstrap timeout configured this waits for as long as the
    /// provider's lookup hangs. A deactivated guard returns its last state
    /// immediately.
    pub async fn decided(&self) -> AuthorizationState {
        if !self.is_active() {
            return self.state();
        }
        let mut state = self.state.clone();
        let decided = state
            .wait_for(|s| !s.is_indeterminate())
            .await
            .map(|decided| decided.clone());
        decided.unwrap_or_else(|_| self.state())
    }

    /// Stops the guard. No state change is published after this returns.
    ///
    /// Idempotent.
    pub fn deactivate(&mut self) {
        {
            let mut core = self
                .shared
                .core
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if !core.active {
                return;
            }
            core.active = false;
        }

        let _ = self.shutdown.send(true);
        if let Some(actor) = self.actor.take() {
            actor.abort();
        }

        tracing::info!(guard_id = %self.id, "session guard deactivated");
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}

fn spawn_bootstrap(
    id: GuardId,
    provider: Arc<dyn SessionProvider>,
    timeout: Option<Duration>,
) -> oneshot::Receiver<Result<Option<Session>, AuthError>> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, provider.current_session())
                .await
                .unwrap_or_else(|_| {
                    Err(AuthError::provider_unavailable(format!(
                        "session lookup timed out after {:?}",
                        limit
                    )))
                }),
            None => provider.current_session().await,
        };

        if tx.send(result).is_err() {
            tracing::debug!(guard_id = %id, "bootstrap finished after deactivation, discarded");
        }
    });

    rx
}

struct GuardActor {
    id: GuardId,
    shared: Arc<GuardShared>,
    provider: Arc<dyn SessionProvider>,
    predicate: Arc<dyn PrivilegePredicate>,
    notifier: Arc<dyn Notifier>,
}

impl GuardActor {
    async fn run(
        self,
        mut subscription: SessionSubscription,
        mut bootstrap: oneshot::Receiver<Result<Option<Session>, AuthError>>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut bootstrap_pending = true;
        let mut stream_open = true;

        loop {
            tokio::select! {
                biased;

                _ = shutdown.changed() => break,

                // Queued events go first; a bootstrap that lands alongside them is stale.
                event = subscription.recv(), if stream_open => {
                    match event {
                        Some(event) => self.handle(GuardInput::Change(event)),
                        None => {
                            stream_open = false;
                            tracing::warn!(guard_id = %self.id, "session change stream closed by provider");
                        }
                    }
                }

                result = &mut bootstrap, if bootstrap_pending => {
                    bootstrap_pending = false;
                    match result {
                        Ok(result) => self.handle(GuardInput::Bootstrap(result)),
                        Err(_) => tracing::warn!(guard_id = %self.id, "bootstrap task ended without a result"),
                    }
                }
            }
        }

        subscription.unsubscribe();
    }

    fn handle(&self, input: GuardInput) {
        if let GuardInput::Bootstrap(Err(error)) = &input {
            tracing::error!(guard_id = %self.id, error = %error, "session bootstrap failed");
        }

        let (outcome, state) = {
            let mut core = self
                .shared
                .core
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if !core.active {
                tracing::debug!(guard_id = %self.id, "input after deactivation discarded");
                return;
            }

            let outcome = core.machine.apply(input, self.predicate.as_ref());
            let state = core.machine.state().clone();
            if outcome.changed {
                self.shared.publisher.send_replace(state.clone());
            }
            (outcome, state)
        };

        match outcome.disposition {
            Disposition::Applied => tracing::debug!(
                guard_id = %self.id,
                phase = ?state.phase(),
                changed = outcome.changed,
                "authorization transition applied"
            ),
            Disposition::StaleBootstrap => {
                tracing::debug!(guard_id = %self.id, "stale bootstrap result ignored")
            }
            Disposition::AnonymousSignIn => {
                tracing::debug!(guard_id = %self.id, "sign-in event without identity ignored")
            }
            Disposition::CorrectiveSignOutEcho => {
                tracing::debug!(guard_id = %self.id, "corrective sign-out acknowledged")
            }
        }

        for effect in outcome.effects {
            self.perform(effect);
        }
    }

    fn perform(&self, effect: GuardEffect) {
        match effect {
            GuardEffect::NotifySuccess(message) => self.notifier.notify_success(message),
            GuardEffect::NotifyError(message) => self.notifier.notify_error(message),
            GuardEffect::SignOut => {
                tracing::info!(guard_id = %self.id, "issuing corrective sign-out");
                let provider = self.provider.clone();
                let shared = self.shared.clone();
                let id = self.id;
                tokio::spawn(async move {
                    if let Err(error) = provider.sign_out().await {
                        tracing::warn!(guard_id = %id, error = %error, "corrective sign-out failed");
                        shared
                            .core
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .machine
                            .sign_out_failed();
                    }
                });
            }
        }
    }
}
