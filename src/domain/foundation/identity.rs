//! Identity value object naming an authenticated principal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Opaque, provider-issued identifier of an authenticated principal.
///
/// Usually an email-like handle. The guard never interprets its contents
/// beyond handing it to a privilege predicate, so it is stored exactly as
/// the provider issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Creates a new Identity, returning error if empty or blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("identity"));
        }
        Ok(Self(value))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identity {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_accepts_email_handle() {
        let id = Identity::new("admin@example.com").unwrap();
        assert_eq!(id.as_str(), "admin@example.com");
    }

    #[test]
    fn identity_rejects_empty_string() {
        let result = Identity::new("");
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "identity"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn identity_rejects_whitespace_only() {
        assert!(Identity::new("   ").is_err());
    }

    #[test]
    fn identity_preserves_case() {
        let id = Identity::new("Admin@Example.COM").unwrap();
        assert_eq!(format!("{}", id), "Admin@Example.COM");
    }

    #[test]
    fn identity_parses_from_str() {
        let id: Identity = "ops@example.com".parse().unwrap();
        assert_eq!(id.as_str(), "ops@example.com");
    }

    #[test]
    fn identity_deserializes_through_validation() {
        let ok: Identity = serde_json::from_str("\"a@example.com\"").unwrap();
        assert_eq!(ok.as_str(), "a@example.com");

        let bad: Result<Identity, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }
}
