//! Notifier port for operator-facing toasts.
//!
//! Notifications are fire-and-forget: `notify` must return promptly and
//! must never fail the caller. The guard calls it while serializing
//! transitions, so a slow implementation should hand off to its own task.

use crate::domain::access::Notification;

/// Receives success and error notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn notify_success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    fn notify_error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}
