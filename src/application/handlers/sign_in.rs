//! AdminSignInHandler - Login surface of the console.
//!
//! Validates the form, refuses non-administrators before contacting the
//! provider, signs in, and re-checks the identity the provider returns. The
//! guard does not rely on this handler's result; it waits for the provider's
//! `SignedIn` event.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::access::{messages, AuthError, Credentials, PrivilegePredicate};
use crate::domain::foundation::Identity;
use crate::ports::{Notifier, SessionProvider};

/// Command carrying the raw login form.
#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub identity: String,
    pub secret: SecretString,
}

impl SignInCommand {
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: SecretString::new(secret.into()),
        }
    }
}

/// Handler for administrator sign-in.
pub struct AdminSignInHandler {
    provider: Arc<dyn SessionProvider>,
    predicate: Arc<dyn PrivilegePredicate>,
    notifier: Arc<dyn Notifier>,
}

impl AdminSignInHandler {
    pub fn new(
        provider: Arc<dyn SessionProvider>,
        predicate: Arc<dyn PrivilegePredicate>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            provider,
            predicate,
            notifier,
        }
    }

    /// Signs an administrator in.
    ///
    /// When the provider hands back an identity that is not an administrator
    /// the handler signs out and notifies the denial itself, since the login
    /// page runs without a guard. A guard active at the same time reacts to
    /// the provider's `SignedIn` event as well, so the operator then sees the
    /// denial twice and the provider receives two sign-outs.
    pub async fn handle(&self, cmd: SignInCommand) -> Result<Identity, AuthError> {
        // 1. Both fields are required
        let identity = match Identity::new(cmd.identity) {
            Ok(identity) if !cmd.secret.expose_secret().is_empty() => identity,
            _ => {
                self.notifier.notify_error(messages::MISSING_FIELDS);
                return Err(AuthError::MissingCredentials);
            }
        };

        // 2. Refuse non-administrators without a provider round trip
        if !self.predicate.is_authorized(&identity) {
            self.notifier.notify_error(messages::ACCESS_DENIED);
            return Err(AuthError::AccessDenied);
        }

        // 3. Sign in
        let credentials = Credentials::new(identity, cmd.secret);
        let session = match self.provider.sign_in(&credentials).await {
            Ok(session) => session,
            Err(error) => {
                tracing::error!(identity = %credentials.identity, error = %error, "login failed");
                self.notifier.notify_error(&error.to_string());
                return Err(error);
            }
        };

        // 4. The provider may normalize the identity; check what it returned
        let signed_in = session.into_identity();
        if !self.predicate.is_authorized(&signed_in) {
            if let Err(error) = self.provider.sign_out().await {
                tracing::warn!(error = %error, "sign-out after rejected login failed");
            }
            self.notifier.notify_error(messages::ACCESS_DENIED);
            return Err(AuthError::AccessDenied);
        }

        tracing::info!(identity = %signed_in, "administrator signed in");
        self.notifier.notify_success(messages::LOGIN_SUCCESSFUL);
        Ok(signed_in)
    }

    /// The login page's "already signed in" check.
    ///
    /// Returns the identity when a privileged session already exists, so the
    /// caller can skip the form. Lookup failures count as no session.
    pub async fn existing_session(&self) -> Option<Identity> {
        match self.provider.current_session().await {
            Ok(Some(session)) if self.predicate.is_authorized(session.identity()) => {
                Some(session.into_identity())
            }
            Ok(_) => None,
            Err(error) => {
                tracing::debug!(error = %error, "existing session lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySessionProvider, RecordingNotifier};
    use crate::application::{GuardSettings, SessionGuard};
    use crate::domain::access::{
        AdminAllowlist, AuthorizationState, ChangeEvent, IdentityNormalization, NotificationLevel,
        Session,
    };
    use async_trait::async_trait;
    use crate::ports::SessionSubscription;

    fn admins() -> Arc<dyn PrivilegePredicate> {
        Arc::new(AdminAllowlist::new(
            ["admin@example.com"],
            IdentityNormalization::CaseInsensitive,
        ))
    }

    fn handler(
        provider: Arc<dyn SessionProvider>,
    ) -> (AdminSignInHandler, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (
            AdminSignInHandler::new(provider, admins(), notifier.clone()),
            notifier,
        )
    }

    #[tokio::test]
    async fn admin_with_valid_credentials_signs_in() {
        let provider = Arc::new(InMemorySessionProvider::new().with_account("admin@example.com", "pw"));
        let (handler, notifier) = handler(provider.clone());

        let result = handler.handle(SignInCommand::new("admin@example.com", "pw")).await;

        assert_eq!(result.unwrap().as_str(), "admin@example.com");
        assert_eq!(notifier.messages(), vec![messages::LOGIN_SUCCESSFUL]);
        assert!(provider.current_identity().is_some());
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_before_provider() {
        let provider = Arc::new(InMemorySessionProvider::new().with_account("admin@example.com", "pw"));
        let (handler, notifier) = handler(provider.clone());

        let no_identity = handler.handle(SignInCommand::new("", "pw")).await;
        let no_secret = handler.handle(SignInCommand::new("admin@example.com", "")).await;

        assert_eq!(no_identity, Err(AuthError::MissingCredentials));
        assert_eq!(no_secret, Err(AuthError::MissingCredentials));
        assert_eq!(
            notifier.messages(),
            vec![messages::MISSING_FIELDS, messages::MISSING_FIELDS]
        );
        assert!(provider.current_identity().is_none());
    }

    #[tokio::test]
    async fn non_admin_is_refused_without_sign_in() {
        let provider = Arc::new(InMemorySessionProvider::new().with_account("user@example.com", "pw"));
        let (handler, notifier) = handler(provider.clone());

        let result = handler.handle(SignInCommand::new("user@example.com", "pw")).await;

        assert_eq!(result, Err(AuthError::AccessDenied));
        assert_eq!(notifier.messages(), vec![messages::ACCESS_DENIED]);
        assert!(provider.current_identity().is_none());
    }

    #[tokio::test]
    async fn provider_rejection_is_surfaced() {
        let provider = Arc::new(InMemorySessionProvider::new().with_account("admin@example.com", "pw"));
        let (handler, notifier) = handler(provider);

        let result = handler.handle(SignInCommand::new("admin@example.com", "wrong")).await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert_eq!(notifier.messages(), vec!["Invalid login credentials"]);
    }

    /// Provider that signs everyone in under a fixed identity.
    struct AliasingProvider {
        inner: InMemorySessionProvider,
    }

    #[async_trait]
    impl SessionProvider for AliasingProvider {
        async fn current_session(&self) -> Result<Option<Session>, AuthError> {
            self.inner.current_session().await
        }

        fn subscribe(&self) -> SessionSubscription {
            self.inner.subscribe()
        }

        async fn sign_in(&self, _credentials: &Credentials) -> Result<Session, AuthError> {
            let alias = Identity::new("someone-else@example.com").unwrap();
            self.inner.set_session(Some(Session::new(alias.clone())));
            self.inner.emit(ChangeEvent::signed_in(alias.clone()));
            Ok(Session::new(alias))
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            self.inner.sign_out().await
        }
    }

    #[tokio::test]
    async fn returned_non_admin_identity_is_signed_out() {
        let provider = Arc::new(AliasingProvider {
            inner: InMemorySessionProvider::new(),
        });
        let (handler, notifier) = handler(provider.clone());

        let result = handler.handle(SignInCommand::new("admin@example.com", "pw")).await;

        assert_eq!(result, Err(AuthError::AccessDenied));
        assert_eq!(provider.inner.sign_out_calls(), 1);
        assert_eq!(notifier.messages(), vec![messages::ACCESS_DENIED]);
    }

    #[tokio::test]
    async fn returned_non_admin_is_denied_by_handler_and_active_guard() {
        let provider = Arc::new(AliasingProvider {
            inner: InMemorySessionProvider::new(),
        });
        let notifier = Arc::new(RecordingNotifier::new());
        let guard = SessionGuard::activate(
            provider.clone(),
            admins(),
            notifier.clone(),
            GuardSettings::default(),
        );
        guard.decided().await;
        let handler = AdminSignInHandler::new(provider.clone(), admins(), notifier.clone());

        let result = handler.handle(SignInCommand::new("admin@example.com", "pw")).await;
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        assert_eq!(result, Err(AuthError::AccessDenied));
        assert_eq!(guard.state(), AuthorizationState::Unauthorized);
        assert!(provider.inner.current_identity().is_none());
        assert_eq!(provider.inner.sign_out_calls(), 2);
        assert_eq!(notifier.count_of(NotificationLevel::Error), 2);
    }

    #[tokio::test]
    async fn existing_session_only_reports_admins() {
        let admin = Arc::new(InMemorySessionProvider::new().with_session("Admin@Example.com"));
        let user = Arc::new(InMemorySessionProvider::new().with_session("user@example.com"));
        let down = Arc::new(
            InMemorySessionProvider::new().with_error(AuthError::provider_unavailable("down")),
        );

        assert!(handler(admin).0.existing_session().await.is_some());
        assert!(handler(user).0.existing_session().await.is_none());
        assert!(handler(down).0.existing_session().await.is_none());
    }
}
