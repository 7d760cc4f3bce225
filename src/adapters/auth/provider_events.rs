//! Decoding of the provider's native auth-state payloads.
//!
//! The hosted auth service reports state changes as JSON frames shaped like
//!
//! ```text
//! { "event": "SIGNED_IN", "session": { "user": { "id": "...", "email": "admin@example.com" } } }
//! ```
//!
//! Only two of its event kinds matter to the console. `SIGNED_IN` with a
//! user becomes `ChangeEvent::SignedIn`, and `SIGNED_OUT` becomes
//! `ChangeEvent::SignedOut`. Token refreshes, profile updates, password
//! recovery and the initial-session replay are dropped; the initial session
//! is picked up by the bootstrap lookup instead.

use serde::Deserialize;

use crate::domain::access::{AuthError, ChangeEvent, Session};
use crate::domain::foundation::Identity;

/// Event kinds emitted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderEventKind {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderSession {
    #[serde(default)]
    pub user: Option<ProviderUser>,
}

impl ProviderSession {
    /// Converts into a domain session if the payload names a user email.
    pub fn into_session(self) -> Option<Session> {
        let email = self.user?.email?;
        Identity::new(email).ok().map(Session::new)
    }
}

/// One auth-state frame as sent by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderAuthEvent {
    pub event: ProviderEventKind,
    #[serde(default)]
    pub session: Option<ProviderSession>,
}

impl ProviderAuthEvent {
    /// Parses a raw JSON frame.
    pub fn from_json(payload: &str) -> Result<Self, AuthError> {
        serde_json::from_str(payload)
            .map_err(|e| AuthError::provider_unavailable(format!("malformed auth event: {}", e)))
    }

    /// Maps the frame onto the console's change vocabulary.
    ///
    /// Returns `None` for frames the guard does not act on.
    pub fn into_change_event(self) -> Option<ChangeEvent> {
        match self.event {
            ProviderEventKind::SignedIn => self
                .session
                .and_then(ProviderSession::into_session)
                .map(|session| ChangeEvent::signed_in(session.into_identity())),
            ProviderEventKind::SignedOut => Some(ChangeEvent::signed_out()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::ChangeKind;

    #[test]
    fn signed_in_with_user_maps_to_signed_in() {
        let frame = ProviderAuthEvent::from_json(
            r#"{"event":"SIGNED_IN","session":{"user":{"id":"u-1","email":"admin@example.com"}}}"#,
        )
        .unwrap();

        let event = frame.into_change_event().unwrap();

        assert_eq!(event.kind, ChangeKind::SignedIn);
        assert_eq!(event.identity.unwrap().as_str(), "admin@example.com");
    }

    #[test]
    fn signed_in_without_user_is_dropped() {
        let frame = ProviderAuthEvent::from_json(r#"{"event":"SIGNED_IN","session":{}}"#).unwrap();
        assert!(frame.into_change_event().is_none());

        let frame = ProviderAuthEvent::from_json(r#"{"event":"SIGNED_IN","session":null}"#).unwrap();
        assert!(frame.into_change_event().is_none());
    }

    #[test]
    fn signed_out_maps_regardless_of_session() {
        let frame = ProviderAuthEvent::from_json(r#"{"event":"SIGNED_OUT","session":null}"#).unwrap();
        assert_eq!(frame.into_change_event(), Some(ChangeEvent::signed_out()));
    }

    #[test]
    fn housekeeping_events_are_dropped() {
        for kind in ["TOKEN_REFRESHED", "USER_UPDATED", "INITIAL_SESSION", "PASSWORD_RECOVERY"] {
            let payload = format!(
                r#"{{"event":"{}","session":{{"user":{{"email":"admin@example.com"}}}}}}"#,
                kind
            );
            let frame = ProviderAuthEvent::from_json(&payload).unwrap();
            assert!(frame.into_change_event().is_none(), "{} should be dropped", kind);
        }
    }

    #[test]
    fn unknown_event_kinds_parse_as_unknown() {
        let frame = ProviderAuthEvent::from_json(r#"{"event":"MFA_CHALLENGE_VERIFIED"}"#).unwrap();
        assert_eq!(frame.event, ProviderEventKind::Unknown);
        assert!(frame.into_change_event().is_none());
    }

    #[test]
    fn malformed_frame_is_provider_error() {
        let result = ProviderAuthEvent::from_json("not json");
        assert!(matches!(result, Err(AuthError::ProviderUnavailable(_))));
    }

    #[test]
    fn session_with_blank_email_yields_no_session() {
        let session = ProviderSession {
            user: Some(ProviderUser {
                id: Some("u-1".to_string()),
                email: Some(" ".to_string()),
            }),
        };
        assert!(session.into_session().is_none());
    }
}
