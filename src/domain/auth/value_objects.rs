use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::ports::PasswordHasher;

lazy_static! {
  static ref EMAIL_PATTERN: Regex =
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email pattern is valid");
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmailFormat(String),

  #[error("Password is too short (minimum {min} bytes)")]
  PasswordTooShort { min: usize },

  #[error("Password is too long (maximum {max} bytes)")]
  PasswordTooLong { max: usize },

  #[error("Password hashing failed: {0}")]
  HashFailure(String),

  #[error("Password does not match")]
  PasswordMismatch,

  #[error("Invalid user id: {0}")]
  InvalidUserId(String),
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email, trimming and lower-casing the input before validation
  pub fn new(email: impl AsRef<str>) -> Result<Self, ValueObjectError> {
    let normalized = email.as_ref().trim().to_lowercase();

    if normalized.is_empty() || !EMAIL_PATTERN.is_match(&normalized) {
      return Err(ValueObjectError::InvalidEmailFormat(normalized));
    }

    Ok(Self(normalized))
  }

  /// Returns the normalized email
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (hash only, plaintext is never retained)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct Password {
  hash: String,
}

impl Password {
  pub const MIN_LENGTH: usize = 8;
  pub const MAX_LENGTH: usize = 72;

  /// Validates the plaintext length and hashes it.
  ///
  /// Length is measured in UTF-8 bytes, matching the hash primitive's input
  /// limit. It is checked before the hasher is invoked, so out-of-range input
  /// never reaches the hash primitive.
  pub fn new(plain: &str, hasher: &dyn PasswordHasher) -> Result<Self, ValueObjectError> {
    let length = plain.len();

    if length < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort {
        min: Self::MIN_LENGTH,
      });
    }

    if length > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    let hash = hasher
      .hash(plain)
      .map_err(|e| ValueObjectError::HashFailure(e.to_string()))?;

    Ok(Self { hash })
  }

  /// Rebuilds a Password from a stored hash (read path, no validation)
  pub fn from_hash(hash: impl Into<String>) -> Self {
    Self { hash: hash.into() }
  }

  /// Checks a candidate plaintext against the stored hash
  pub fn verify(&self, candidate: &str, hasher: &dyn PasswordHasher) -> Result<(), ValueObjectError> {
    match hasher.verify(candidate, &self.hash) {
      Ok(true) => Ok(()),
      Ok(false) => Err(ValueObjectError::PasswordMismatch),
      Err(e) => Err(ValueObjectError::HashFailure(e.to_string())),
    }
  }

  pub fn hash(&self) -> &str {
    &self.hash
  }
}

// Implement Debug without exposing the hash
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// UserId Value Object
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
  /// Creates a new random UserId
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }

  pub fn from_uuid(uuid: Uuid) -> Self {
    Self(uuid)
  }

  /// Parses a UserId from its string form
  pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
    Uuid::parse_str(value.trim())
      .map(Self)
      .map_err(|_| ValueObjectError::InvalidUserId(value.to_string()))
  }

  pub fn into_inner(self) -> Uuid {
    self.0
  }
}

impl Default for UserId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<Uuid> for UserId {
  fn from(uuid: Uuid) -> Self {
    Self(uuid)
  }
}

impl From<UserId> for Uuid {
  fn from(user_id: UserId) -> Self {
    user_id.0
  }
}
