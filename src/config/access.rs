//! Administrator access configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::access::{AdminAllowlist, IdentityNormalization};

/// Who counts as an administrator
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Comma-separated administrator identities
    #[serde(default)]
    pub admin_identities: String,

    /// How identities are compared against the list
    #[serde(default)]
    pub normalization: IdentityNormalization,
}

impl AccessConfig {
    /// Builds the privilege predicate from this configuration
    pub fn allowlist(&self) -> AdminAllowlist {
        AdminAllowlist::from_csv(&self.admin_identities, self.normalization)
    }

    /// Validate access configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.admin_identities.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ACCESS__ADMIN_IDENTITIES"));
        }
        if self.allowlist().is_empty() {
            return Err(ValidationError::EmptyAllowlist);
        }
        Ok(())
    }
}
