//! Application handlers.
//!
//! Command handlers for the console's login surface.

pub mod sign_in;

pub use sign_in::{AdminSignInHandler, SignInCommand};
