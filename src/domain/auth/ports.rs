use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::entities::User;
use super::errors::{HashError, RepositoryError};
use super::value_objects::{Email, Password, UserId};

/// Repository trait for user persistence operations
///
/// Implementations must enforce email uniqueness atomically: of two concurrent
/// `create_user` calls for the same normalized email, exactly one succeeds and
/// the other fails with `RepositoryError::DuplicateKey`.
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Inserts a new user
  async fn create_user(&self, user: &User) -> Result<(), RepositoryError>;

  /// Finds a user by normalized email, `NotFound` if absent
  async fn find_by_email(&self, email: &Email) -> Result<User, RepositoryError>;

  /// Finds a user by id, `NotFound` if absent
  async fn find_by_id(&self, id: &UserId) -> Result<User, RepositoryError>;

  /// Replaces the password hash and update timestamp of a user.
  /// Does not check that the user exists.
  async fn update_password(
    &self,
    id: &UserId,
    password: &Password,
    updated_at: DateTime<Utc>,
  ) -> Result<(), RepositoryError>;

  /// Replaces the profile fields and update timestamp of a user.
  /// Does not check that the user exists.
  async fn update_profile(
    &self,
    id: &UserId,
    name: &str,
    phone_number: Option<&str>,
    updated_at: DateTime<Utc>,
  ) -> Result<(), RepositoryError>;
}

/// Adaptive one-way password hashing primitive
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plaintext with a fresh random salt
  fn hash(&self, plain: &str) -> Result<String, HashError>;

  /// Returns `Ok(false)` on mismatch, `Err` if the stored hash cannot be used
  fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashError>;
}
