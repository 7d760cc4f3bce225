//! Authentication and authorization errors.
//!
//! These errors are **domain-centric** - they describe what went wrong
//! from the console's perspective, not the auth provider's. The guard only
//! distinguishes `ProviderUnavailable` and `AccessDenied`; the credential
//! variants belong to the login surface.

use thiserror::Error;

/// Errors raised by the session provider or by privilege enforcement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The provider could not be reached or failed the call.
    #[error("Auth provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The session is valid but the identity lacks administrator privileges.
    #[error("Access denied. Admin privileges required.")]
    AccessDenied,

    /// The provider rejected the identity/secret pair.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Identity or secret was left blank.
    #[error("Please fill in all fields")]
    MissingCredentials,
}

impl AuthError {
    /// Creates a provider unavailable error with a message.
    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        Self::ProviderUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ProviderUnavailable(_))
    }

    /// Returns true if the failure came from the privilege predicate.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, AuthError::AccessDenied)
    }
}
