//! Guarded view consumer.
//!
//! Maps the guard's published state onto what a protected page shows:
//! a placeholder while the guard is undecided, the protected content while
//! authorized, and a redirect otherwise. Every render reads the latest
//! published state, so content is never produced for an identity the guard
//! has already revoked.

use tokio::sync::watch;

use crate::domain::access::AuthorizationState;
use crate::domain::foundation::Identity;

/// What a guarded page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render<T> {
    /// Loading placeholder.
    Loading,
    /// Protected content.
    Content(T),
    /// Redirect to the given path.
    Redirect(String),
}

impl<T> Render<T> {
    pub fn is_content(&self) -> bool {
        matches!(self, Render::Content(_))
    }
}

/// Read-only consumer of a guard's authorization signal.
#[derive(Debug, Clone)]
pub struct GuardedView {
    state: watch::Receiver<AuthorizationState>,
    login_path: String,
}

impl GuardedView {
    pub fn new(state: watch::Receiver<AuthorizationState>, login_path: impl Into<String>) -> Self {
        Self {
            state,
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Decision for the current state, carrying the authorized identity.
    pub fn decision(&self) -> Render<Identity> {
        self.render(Identity::clone)
    }

    /// Renders protected content only if the latest state authorizes it.
    ///
    /// The state borrow is released before `content` runs.
    pub fn render<T, F>(&self, content: F) -> Render<T>
    where
        F: FnOnce(&Identity) -> T,
    {
        let current = self.state.borrow().clone();
        match current {
            AuthorizationState::Indeterminate => Render::Loading,
            AuthorizationState::Authorized(identity) => Render::Content(content(&identity)),
            AuthorizationState::Unauthorized => Render::Redirect(self.login_path.clone()),
        }
    }

    /// Waits for the next state change and returns the new decision.
    ///
    /// Returns `None` once the guard has been torn down.
    pub async fn changed(&mut self) -> Option<Render<Identity>> {
        self.state.changed().await.ok()?;
        Some(self.decision())
    }
}
