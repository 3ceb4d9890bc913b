//! Application layer
//!
//! Use cases that turn transport-neutral commands into calls on the domain
//! `AuthService` and shape the results for callers.

pub mod auth;
