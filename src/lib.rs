//! Authentication service: credential validation, password hashing, signed
//! access/refresh tokens and user account storage.
//!
//! Layers:
//! - `domain` holds value objects, the `User` entity, ports and `AuthService`
//! - `application` wraps the service in command/response use cases
//! - `infrastructure` provides configuration, Argon2 hashing and repositories
//! - `adapters` exposes the use cases over HTTP

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
