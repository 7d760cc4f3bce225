//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `CONSOLE_GUARD` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use console_guard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Login page at {}", config.guard.login_path);
//! ```

mod access;
mod error;
mod guard;
mod runtime;

pub use access::AccessConfig;
pub use error::{ConfigError, ValidationError};
pub use guard::GuardConfig;
pub use runtime::{Environment, RuntimeConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Environment and log filter
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Administrator allowlist
    #[serde(default)]
    pub access: AccessConfig,

    /// Guard timing and route paths
    #[serde(default)]
    pub guard: GuardConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `CONSOLE_GUARD__*` variables:
    ///
    /// - `CONSOLE_GUARD__ACCESS__ADMIN_IDENTITIES=a@x.com,b@x.com`
    /// - `CONSOLE_GUARD__GUARD__BOOTSTRAP_TIMEOUT_SECS=10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONSOLE_GUARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.access.validate()?;
        self.guard.validate()?;
        Ok(())
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}
