//! Notifier that writes to the structured log.

use crate::domain::access::{Notification, NotificationLevel};
use crate::ports::Notifier;

/// Emits every notification as a tracing event.
///
/// Success toasts are logged at `info`, error toasts at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!(
                target: "console_guard::notify",
                message = %notification.message,
                "notification"
            ),
            NotificationLevel::Error => tracing::warn!(
                target: "console_guard::notify",
                message = %notification.message,
                "notification"
            ),
        }
    }
}
