//! In-memory session provider.
//!
//! Implements the `SessionProvider` port without an external auth service.
//! Used by tests and local wiring to script sessions, accounts, failures and
//! change events.
//!
//! # Example
//!
//! ```ignore
//! use console_guard::adapters::auth::InMemorySessionProvider;
//!
//! let provider = InMemorySessionProvider::new()
//!     .with_account("admin@example.com", "secret")
//!     .with_session("admin@example.com");
//!
//! let session = provider.current_session().await?;
//! assert!(session.is_some());
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::sync::watch;

use crate::domain::access::{AuthError, ChangeEvent, Credentials, Session};
use crate::domain::foundation::Identity;
use crate::ports::{subscription_channel, ChangeEventSender, SessionProvider, SessionSubscription};

use super::provider_events::ProviderAuthEvent;

/// Scriptable in-memory provider.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This adapter is meant
/// for tests and local wiring, not for production traffic.
pub struct InMemorySessionProvider {
    /// The currently signed-in session
    session: RwLock<Option<Session>>,
    /// Map of identity to secret
    accounts: RwLock<HashMap<String, String>>,
    /// Optional error returned by `current_session` and `sign_in`
    force_error: RwLock<Option<AuthError>>,
    /// Optional error returned by `sign_out`
    sign_out_error: RwLock<Option<AuthError>>,
    /// Live change-event subscribers
    subscribers: Mutex<Vec<ChangeEventSender>>,
    /// Bootstrap lookups wait until this is true
    bootstrap_gate: watch::Sender<bool>,
    bootstrap_calls: AtomicUsize,
    completed_bootstraps: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl InMemorySessionProvider {
    /// Creates a provider with no session and no accounts.
    pub fn new() -> Self {
        let (bootstrap_gate, _) = watch::channel(true);
        Self {
            session: RwLock::new(None),
            accounts: RwLock::new(HashMap::new()),
            force_error: RwLock::new(None),
            sign_out_error: RwLock::new(None),
            subscribers: Mutex::new(Vec::new()),
            bootstrap_gate,
            bootstrap_calls: AtomicUsize::new(0),
            completed_bootstraps: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    /// Starts with a live session for the identity.
    ///
    /// # Panics
    ///
    /// Panics if the identity is blank.
    pub fn with_session(self, identity: &str) -> Self {
        let identity = Identity::new(identity).expect("with_session: blank identity");
        *self.session.write().unwrap() = Some(Session::new(identity));
        self
    }

    /// Registers an account that `sign_in` accepts.
    pub fn with_account(self, identity: impl Into<String>, secret: impl Into<String>) -> Self {
        self.accounts
            .write()
            .unwrap()
            .insert(identity.into(), secret.into());
        self
    }

    /// Forces `current_session` and `sign_in` to return the error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Forces `sign_out` to return the error.
    pub fn with_sign_out_error(self, error: AuthError) -> Self {
        *self.sign_out_error.write().unwrap() = Some(error);
        self
    }

    /// Makes `current_session` wait until `release_bootstrap` is called.
    pub fn with_held_bootstrap(self) -> Self {
        self.bootstrap_gate.send_replace(false);
        self
    }

    /// Lets held and future `current_session` calls complete.
    pub fn release_bootstrap(&self) {
        self.bootstrap_gate.send_replace(true);
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Replaces the current session without emitting an event.
    pub fn set_session(&self, session: Option<Session>) {
        *self.session.write().unwrap() = session;
    }

    /// Pushes an event to every live subscriber.
    ///
    /// Closed subscriptions are pruned. Returns how many subscribers
    /// received the event.
    pub fn emit(&self, event: ChangeEvent) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .expect("InMemorySessionProvider: subscribers lock poisoned");
        subscribers.retain(|sender| !sender.is_closed());
        subscribers
            .iter()
            .filter(|sender| sender.send(event.clone()))
            .count()
    }

    /// Decodes a raw provider frame and emits the resulting event, if any.
    pub fn emit_raw(&self, payload: &str) -> Result<usize, AuthError> {
        let frame = ProviderAuthEvent::from_json(payload)?;
        Ok(frame
            .into_change_event()
            .map(|event| self.emit(event))
            .unwrap_or(0))
    }

    /// Returns the number of open subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .expect("InMemorySessionProvider: subscribers lock poisoned")
            .iter()
            .filter(|sender| !sender.is_closed())
            .count()
    }

    pub fn bootstrap_calls(&self) -> usize {
        self.bootstrap_calls.load(Ordering::SeqCst)
    }

    /// Bootstrap lookups that have returned to their caller.
    pub fn completed_bootstraps(&self) -> usize {
        self.completed_bootstraps.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.session
            .read()
            .unwrap()
            .as_ref()
            .map(|session| session.identity().clone())
    }
}

impl Default for InMemorySessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionProvider for InMemorySessionProvider {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        self.bootstrap_calls.fetch_add(1, Ordering::SeqCst);

        let mut gate = self.bootstrap_gate.subscribe();
        let _ = gate.wait_for(|open| *open).await;

        let result = match self.force_error.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(self.session.read().unwrap().clone()),
        };

        self.completed_bootstraps.fetch_add(1, Ordering::SeqCst);
        result
    }

    fn subscribe(&self) -> SessionSubscription {
        let (sender, subscription) = subscription_channel();
        self.subscribers
            .lock()
            .expect("InMemorySessionProvider: subscribers lock poisoned")
            .push(sender);
        subscription
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        let matches = self
            .accounts
            .read()
            .unwrap()
            .get(credentials.identity.as_str())
            .map(|secret| secret == credentials.secret.expose_secret())
            .unwrap_or(false);
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session::new(credentials.identity.clone());
        self.set_session(Some(session.clone()));
        self.emit(ChangeEvent::signed_in(credentials.identity.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.sign_out_error.read().unwrap().clone() {
            return Err(error);
        }

        self.set_session(None);
        self.emit(ChangeEvent::signed_out());
        Ok(())
    }
}
