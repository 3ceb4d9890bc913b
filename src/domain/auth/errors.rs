use thiserror::Error;

use super::tokens::TokenError;
use super::value_objects::ValueObjectError;

/// Error kinds exposed at the service boundary.
///
/// Each maps one-to-one onto a standard RPC status code; the transport layer
/// decides how to render them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  InvalidArgument,
  Unauthenticated,
  AlreadyExists,
  NotFound,
  Internal,
}

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid credentials provided")]
  InvalidCredentials,

  #[error("Invalid or expired token")]
  InvalidToken,

  #[error("Email already exists")]
  EmailAlreadyExists,

  #[error("User not found")]
  UserNotFound,

  #[error("Failed to issue token: {0}")]
  TokenIssue(#[source] TokenError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

impl AuthError {
  /// Classifies the error for the transport boundary
  pub fn kind(&self) -> ErrorKind {
    match self {
      AuthError::InvalidCredentials | AuthError::InvalidToken => ErrorKind::Unauthenticated,
      AuthError::EmailAlreadyExists => ErrorKind::AlreadyExists,
      AuthError::UserNotFound => ErrorKind::NotFound,
      AuthError::TokenIssue(_) => ErrorKind::Internal,
      AuthError::Validation(_) => ErrorKind::InvalidArgument,
      AuthError::ValueObject(err) => match err {
        ValueObjectError::PasswordMismatch => ErrorKind::Unauthenticated,
        ValueObjectError::HashFailure(_) => ErrorKind::Internal,
        _ => ErrorKind::InvalidArgument,
      },
      AuthError::Repository(err) => match err {
        RepositoryError::DuplicateKey(_) => ErrorKind::AlreadyExists,
        RepositoryError::NotFound => ErrorKind::NotFound,
        _ => ErrorKind::Internal,
      },
    }
  }
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Query timed out after {0:?}")]
  Timeout(std::time::Duration),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),

  #[error("Stored data is corrupt: {0}")]
  CorruptData(String),
}

/// Password hashing primitive errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("Invalid hash parameters: {0}")]
  InvalidParams(String),
}

/// Input validation errors not covered by value objects
#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("Missing required field: {field}")]
  MissingField { field: String },
}

// Automatic conversions from external error types

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}
