//! Authentication adapters.
//!
//! Implementations and helpers for the `SessionProvider` port:
//!
//! - `in_memory` - Scriptable provider that doesn't require an external service
//! - `provider_events` - Decoding of the provider's native auth-state payloads

mod in_memory;
mod provider_events;

pub use in_memory::InMemorySessionProvider;
pub use provider_events::{ProviderAuthEvent, ProviderEventKind, ProviderSession, ProviderUser};
