//! Session guard configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::GuardSettings;

/// Guard and routing settings
#[derive(Debug, Clone, Deserialize)]
pub struct GuardConfig {
    /// Upper bound on the bootstrap session lookup, unset to wait indefinitely
    #[serde(default)]
    pub bootstrap_timeout_secs: Option<u64>,

    /// Where unauthorized visitors are sent
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Where a signed-in administrator lands
    #[serde(default = "default_home_path")]
    pub home_path: String,
}

impl GuardConfig {
    /// Get the bootstrap timeout as Duration
    pub fn bootstrap_timeout(&self) -> Option<Duration> {
        self.bootstrap_timeout_secs.map(Duration::from_secs)
    }

    /// Runtime settings for a `SessionGuard`
    pub fn settings(&self) -> GuardSettings {
        GuardSettings {
            bootstrap_timeout: self.bootstrap_timeout(),
        }
    }

    /// Validate guard configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bootstrap_timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        if !self.login_path.starts_with('/') {
            return Err(ValidationError::InvalidPath("GUARD__LOGIN_PATH"));
        }
        if !self.home_path.starts_with('/') {
            return Err(ValidationError::InvalidPath("GUARD__HOME_PATH"));
        }
        Ok(())
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            bootstrap_timeout_secs: None,
            login_path: default_login_path(),
            home_path: default_home_path(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_home_path() -> String {
    "/admin".to_string()
}
