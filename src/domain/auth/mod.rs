pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod tokens;
pub mod value_objects;

// Re-export commonly used types
pub use entities::User;
pub use errors::{AuthError, ErrorKind, HashError, RepositoryError, ValidationError};
pub use ports::{PasswordHasher, UserRepository};
pub use services::{AuthService, AuthServiceConfig, AuthSession, TokenPair, TokenVerification};
pub use tokens::{IssuedToken, TokenClaims, TokenError, TokenManager};
pub use value_objects::{Email, Password, UserId, ValueObjectError};
