//! Access module - Privileged-session authorization.
//!
//! Holds everything the session guard decides with: the privilege
//! predicate, the session and change-event vocabulary, the observable
//! `AuthorizationState`, and the pure `AccessMachine` that folds inputs
//! into that state.

mod errors;
mod machine;
mod notification;
mod predicate;
mod session;
mod state;

pub use errors::AuthError;
pub use machine::{AccessMachine, Disposition, GuardEffect, GuardInput, Outcome};
pub use notification::{messages, Notification, NotificationLevel};
pub use predicate::{AdminAllowlist, AllowAll, DenyAll, IdentityNormalization, PrivilegePredicate};
pub use session::{ChangeEvent, ChangeKind, Credentials, Session};
pub use state::{AuthorizationPhase, AuthorizationState};
