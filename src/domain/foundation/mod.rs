//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, the state machine trait and error types
//! that form the vocabulary of the console guard domain.

mod errors;
mod identity;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use identity::Identity;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
