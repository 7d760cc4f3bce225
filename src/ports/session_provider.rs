//! Session provider port for the external authentication service.
//!
//! The provider owns sessions. The console asks it for the current session,
//! forwards credentials to it, asks it to end a session, and listens to the
//! session-change events it pushes.
//!
//! # Change Stream
//!
//! `subscribe()` hands out a `SessionSubscription`, the receive end of a
//! channel. The provider keeps the matching `ChangeEventSender` and pushes
//! every `SignedIn`/`SignedOut` transition into it. Dropping the
//! subscription (or calling `unsubscribe`) closes the channel; sending into
//! a closed channel is not an error for the provider, the event is dropped.
//!
//! # Example
//!
//! ```ignore
//! let mut subscription = provider.subscribe();
//! let session = provider.current_session().await?;
//! while let Some(event) = subscription.recv().await {
//!     // fold event into state
//! }
//! ```

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::access::{AuthError, ChangeEvent, Credentials, Session};

/// Authentication provider contract.
///
/// # Contract
///
/// Implementations must:
/// - Return `Ok(None)` from `current_session` when nobody is signed in
/// - Return `AuthError::ProviderUnavailable` for transient errors
/// - Emit a `SignedIn` event after a successful `sign_in`
/// - Emit a `SignedOut` event after a successful `sign_out`
/// - Tolerate closed subscriptions when emitting events
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// One-shot lookup of the current session.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Opens a change-event subscription valid until dropped.
    fn subscribe(&self) -> SessionSubscription;

    /// Signs in with credentials.
    ///
    /// The returned session is informational; consumers tracking access
    /// state should wait for the matching `SignedIn` event.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Creates a connected sender/subscription pair.
pub fn subscription_channel() -> (ChangeEventSender, SessionSubscription) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ChangeEventSender { sender }, SessionSubscription { receiver })
}

/// Provider-side end of a change-event subscription.
#[derive(Debug, Clone)]
pub struct ChangeEventSender {
    sender: mpsc::UnboundedSender<ChangeEvent>,
}

impl ChangeEventSender {
    /// Pushes an event. Returns false if the subscriber has gone away.
    pub fn send(&self, event: ChangeEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Consumer-side end of a change-event subscription.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: mpsc::UnboundedReceiver<ChangeEvent>,
}

impl SessionSubscription {
    /// Waits for the next event. Returns `None` once the provider side is
    /// gone or the subscription has been closed and drained.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        self.receiver.recv().await
    }

    /// Closes the subscription; events sent afterwards are dropped.
    pub fn unsubscribe(mut self) {
        self.receiver.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Identity;

    #[tokio::test]
    async fn subscription_receives_sent_events_in_order() {
        let (sender, mut subscription) = subscription_channel();
        let admin = Identity::new("admin@example.com").unwrap();

        assert!(sender.send(ChangeEvent::signed_in(admin.clone())));
        assert!(sender.send(ChangeEvent::signed_out()));

        assert_eq!(subscription.recv().await, Some(ChangeEvent::signed_in(admin)));
        assert_eq!(subscription.recv().await, Some(ChangeEvent::signed_out()));
    }

    #[test]
    fn sending_after_unsubscribe_is_tolerated() {
        let (sender, subscription) = subscription_channel();

        subscription.unsubscribe();

        assert!(sender.is_closed());
        assert!(!sender.send(ChangeEvent::signed_out()));
    }

    #[test]
    fn dropping_subscription_closes_sender() {
        let (sender, subscription) = subscription_channel();
        drop(subscription);
        assert!(sender.is_closed());
    }

    #[tokio::test]
    async fn subscription_ends_when_provider_side_drops() {
        let (sender, mut subscription) = subscription_channel();
        drop(sender);
        assert_eq!(subscription.recv().await, None);
    }

    #[test]
    fn session_provider_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn SessionProvider) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn SessionProvider>>();
    }
}
