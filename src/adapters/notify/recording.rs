//! In-memory notifier for testing.

use std::sync::Mutex;

use crate::domain::access::{Notification, NotificationLevel};
use crate::ports::Notifier;

/// Captures notifications for later assertions.
///
/// # Panics
///
/// Methods may panic if the internal lock is poisoned.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured notifications in emission order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("RecordingNotifier: lock poisoned")
            .clone()
    }

    /// Returns the captured messages in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.notifications
            .lock()
            .expect("RecordingNotifier: lock poisoned")
            .len()
    }

    pub fn count_of(&self, level: NotificationLevel) -> usize {
        self.notifications()
            .iter()
            .filter(|n| n.level == level)
            .count()
    }

    /// Clears captured notifications (for test isolation).
    pub fn clear(&self) {
        self.notifications
            .lock()
            .expect("RecordingNotifier: lock poisoned")
            .clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("RecordingNotifier: lock poisoned")
            .push(notification);
    }
}
