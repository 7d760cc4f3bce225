//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session provider implementations and provider payload decoding
//! - `notify` - Notifier implementations (structured log, in-memory capture)

pub mod auth;
pub mod notify;

pub use auth::InMemorySessionProvider;
pub use notify::{RecordingNotifier, TracingNotifier};
