//! User-facing notifications emitted by the guard and the login surface.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// Messages shown to the console operator.
pub mod messages {
    pub const WELCOME: &str = "Welcome to Admin Dashboard!";
    pub const ACCESS_DENIED: &str = "Access denied. Admin privileges required.";
    pub const AUTHENTICATION_ERROR: &str = "Authentication error";
    pub const LOGIN_SUCCESSFUL: &str = "Login successful!";
    pub const MISSING_FIELDS: &str = "Please fill in all fields";
    pub const LOGIN_FAILED: &str = "Login failed";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast-style notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub issued_at: Timestamp,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            issued_at: Timestamp::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            issued_at: Timestamp::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}
