//! Console Guard - Session authorization for the privileged admin console
//!
//! A `SessionGuard` watches an external authentication provider and decides,
//! for every protected page, whether the current visitor is an administrator.
//! Pages consume the decision through a `GuardedView`.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
