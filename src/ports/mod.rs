//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionProvider` - The authentication service (session lookup,
//!   sign-in, sign-out, change-event subscription)
//! - `Notifier` - Operator-facing success/error notifications

mod notifier;
mod session_provider;

pub use notifier::Notifier;
pub use session_provider::{
    subscription_channel, ChangeEventSender, SessionProvider, SessionSubscription,
};
