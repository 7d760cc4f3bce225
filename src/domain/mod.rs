//! Domain layer containing the authorization rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identity, timestamps, errors)
//! - `access` - Privilege predicate, session vocabulary and the guard's
//!   pure state machine
pub mod access;
pub mod foundation;
