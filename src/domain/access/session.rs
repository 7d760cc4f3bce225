//! Session, change event and credential types.
//!
//! A `Session` is owned by the provider; the console only ever reads the
//! identity out of it. `ChangeEvent`s are consumed as they arrive and never
//! stored.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Identity;

/// Provider-managed proof of authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    identity: Identity,
}

impl Session {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    /// The authenticated principal.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn into_identity(self) -> Identity {
        self.identity
    }
}

/// Kind of session transition reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    SignedIn,
    SignedOut,
}

/// Asynchronous notification of a session transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub identity: Option<Identity>,
}

impl ChangeEvent {
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            kind: ChangeKind::SignedIn,
            identity: Some(identity),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            kind: ChangeKind::SignedOut,
            identity: None,
        }
    }
}

/// Identity/secret pair handed to the provider on sign-in.
///
/// The secret is redacted from `Debug` output.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub identity: Identity,
    pub secret: SecretString,
}

impl Credentials {
    pub fn new(identity: Identity, secret: SecretString) -> Self {
        Self { identity, secret }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn admin() -> Identity {
        Identity::new("admin@example.com").unwrap()
    }

    #[test]
    fn session_yields_its_identity() {
        let session = Session::new(admin());
        assert_eq!(session.identity(), &admin());
        assert_eq!(session.into_identity(), admin());
    }

    #[test]
    fn signed_in_event_carries_identity() {
        let event = ChangeEvent::signed_in(admin());
        assert_eq!(event.kind, ChangeKind::SignedIn);
        assert_eq!(event.identity, Some(admin()));
    }

    #[test]
    fn signed_out_event_has_no_identity() {
        let event = ChangeEvent::signed_out();
        assert_eq!(event.kind, ChangeKind::SignedOut);
        assert!(event.identity.is_none());
    }

    #[test]
    fn credentials_debug_redacts_secret() {
        let credentials = Credentials::new(admin(), SecretString::new("hunter2".to_string()));
        let rendered = format!("{:?}", credentials);

        assert!(!rendered.contains("hunter2"));
        assert_eq!(credentials.secret.expose_secret(), "hunter2");
    }
}
