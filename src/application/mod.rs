//! Application layer - Guard runtime, handlers and view wiring.
//!
//! This layer orchestrates domain operations and coordinates between ports:
//! the `SessionGuard` runs the access state machine against a provider, the
//! `GuardedView` and `ConsoleRouter` consume its signal, and the handlers
//! serve the login surface.

pub mod guard;
pub mod handlers;
pub mod routes;
pub mod view;

pub use guard::{GuardId, GuardSettings, SessionGuard};
pub use handlers::{AdminSignInHandler, SignInCommand};
pub use routes::{is_active, ConsoleRouter, NavItem, Page, ProtectedPage, RouteMatch, NAVIGATION};
pub use view::{GuardedView, Render};
