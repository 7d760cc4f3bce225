//! Privilege predicate deciding administrator vs. not.
//!
//! The predicate is pure, total and synchronous. The guard evaluates it in
//! the same step that produces the next state, so an identity that fails it
//! is never published as authorized.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::foundation::Identity;

/// Pure decision function distinguishing privileged identities.
pub trait PrivilegePredicate: Send + Sync {
    /// Returns true if the identity may see the privileged console.
    fn is_authorized(&self, identity: &Identity) -> bool;
}

impl<F> PrivilegePredicate for F
where
    F: Fn(&Identity) -> bool + Send + Sync,
{
    fn is_authorized(&self, identity: &Identity) -> bool {
        self(identity)
    }
}

/// How identities are compared against the allowlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityNormalization {
    /// Byte-for-byte comparison.
    Exact,
    /// Email-style comparison ignoring case.
    #[default]
    CaseInsensitive,
}

impl IdentityNormalization {
    pub fn normalize<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            IdentityNormalization::Exact => Cow::Borrowed(value),
            IdentityNormalization::CaseInsensitive => Cow::Owned(value.to_lowercase()),
        }
    }
}

/// Predicate granting access to a fixed set of administrator identities.
#[derive(Debug, Clone, Default)]
pub struct AdminAllowlist {
    members: HashSet<String>,
    normalization: IdentityNormalization,
}

impl AdminAllowlist {
    pub fn new<I, S>(identities: I, normalization: IdentityNormalization) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let members = identities
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .map(|s| normalization.normalize(&s).into_owned())
            .collect();

        Self {
            members,
            normalization,
        }
    }

    /// Builds an allowlist from a comma-separated list, skipping blanks.
    pub fn from_csv(list: &str, normalization: IdentityNormalization) -> Self {
        Self::new(list.split(','), normalization)
    }

    pub fn normalization(&self) -> IdentityNormalization {
        self.normalization
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl PrivilegePredicate for AdminAllowlist {
    fn is_authorized(&self, identity: &Identity) -> bool {
        self.members
            .contains(self.normalization.normalize(identity.as_str()).as_ref())
    }
}

/// Rejects every identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl PrivilegePredicate for DenyAll {
    fn is_authorized(&self, _identity: &Identity) -> bool {
        false
    }
}

/// Accepts every identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PrivilegePredicate for AllowAll {
    fn is_authorized(&self, _identity: &Identity) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> Identity {
        Identity::new(value).unwrap()
    }

    #[test]
    fn allowlist_accepts_listed_identity() {
        let predicate = AdminAllowlist::new(["admin@example.com"], IdentityNormalization::Exact);
        assert!(predicate.is_authorized(&id("admin@example.com")));
    }

    #[test]
    fn allowlist_rejects_unlisted_identity() {
        let predicate = AdminAllowlist::new(["admin@example.com"], IdentityNormalization::Exact);
        assert!(!predicate.is_authorized(&id("user@example.com")));
    }

    #[test]
    fn case_insensitive_allowlist_ignores_case_on_both_sides() {
        let predicate =
            AdminAllowlist::new(["Admin@Example.com"], IdentityNormalization::CaseInsensitive);
        assert!(predicate.is_authorized(&id("ADMIN@example.COM")));
    }

    #[test]
    fn exact_allowlist_is_case_sensitive() {
        let predicate = AdminAllowlist::new(["admin@example.com"], IdentityNormalization::Exact);
        assert!(!predicate.is_authorized(&id("Admin@example.com")));
    }

    #[test]
    fn from_csv_trims_and_skips_blanks() {
        let predicate = AdminAllowlist::from_csv(
            " a@example.com, ,b@example.com,",
            IdentityNormalization::default(),
        );
        assert_eq!(predicate.len(), 2);
        assert!(predicate.is_authorized(&id("b@example.com")));
    }

    #[test]
    fn empty_allowlist_denies_everyone() {
        let predicate = AdminAllowlist::from_csv("", IdentityNormalization::Exact);
        assert!(predicate.is_empty());
        assert!(!predicate.is_authorized(&id("admin@example.com")));
    }

    #[test]
    fn closures_are_predicates() {
        let predicate = |identity: &Identity| identity.as_str().ends_with("@ops.example.com");
        assert!(predicate.is_authorized(&id("root@ops.example.com")));
        assert!(!predicate.is_authorized(&id("root@example.com")));
    }

    #[test]
    fn fixed_predicates_are_constant() {
        assert!(!DenyAll.is_authorized(&id("admin@example.com")));
        assert!(AllowAll.is_authorized(&id("anyone@example.com")));
    }
}
