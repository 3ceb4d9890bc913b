use chrono::{DateTime, Utc};

use super::errors::ValidationError;
use super::ports::PasswordHasher;
use super::value_objects::{Email, Password, UserId, ValueObjectError};

/// User aggregate: validated credentials plus profile fields.
///
/// Fields are private. The password and profile can only change through
/// `change_password` and `update_profile`.
#[derive(Debug, Clone)]
pub struct User {
  id: UserId,
  email: Email,
  password: Password,
  name: String,
  phone_number: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with a fresh id; both timestamps are set to now
  pub fn new(
    email: Email,
    password: Password,
    name: impl Into<String>,
    phone_number: Option<String>,
  ) -> Result<Self, ValidationError> {
    let now = Utc::now();
    Ok(Self {
      id: UserId::new(),
      email,
      password,
      name: normalize_name(name.into())?,
      phone_number: normalize_phone(phone_number),
      created_at: now,
      updated_at: now,
    })
  }

  /// Rebuilds a user from persisted fields
  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: UserId,
    email: Email,
    password: Password,
    name: String,
    phone_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      password,
      name,
      phone_number,
      created_at,
      updated_at,
    }
  }

  pub fn id(&self) -> &UserId {
    &self.id
  }

  pub fn email(&self) -> &Email {
    &self.email
  }

  pub fn password(&self) -> &Password {
    &self.password
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn phone_number(&self) -> Option<&str> {
    self.phone_number.as_deref()
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  pub fn updated_at(&self) -> DateTime<Utc> {
    self.updated_at
  }

  pub fn verify_password(
    &self,
    plain: &str,
    hasher: &dyn PasswordHasher,
  ) -> Result<(), ValueObjectError> {
    self.password.verify(plain, hasher)
  }

  /// Replaces the password after re-verifying the current one.
  ///
  /// On any failure the stored hash and `updated_at` are left untouched.
  pub fn change_password(
    &mut self,
    old_password: &str,
    new_password: &str,
    hasher: &dyn PasswordHasher,
  ) -> Result<(), ValueObjectError> {
    self.password.verify(old_password, hasher)?;
    let password = Password::new(new_password, hasher)?;

    self.password = password;
    self.touch();
    Ok(())
  }

  /// Updates the display name and phone number
  pub fn update_profile(
    &mut self,
    name: impl Into<String>,
    phone_number: Option<String>,
  ) -> Result<(), ValidationError> {
    let name = normalize_name(name.into())?;

    self.name = name;
    self.phone_number = normalize_phone(phone_number);
    self.touch();
    Ok(())
  }

  fn touch(&mut self) {
    // Keep updated_at monotonic relative to created_at even if the clock moved back
    self.updated_at = Utc::now().max(self.created_at);
  }
}

fn normalize_name(name: String) -> Result<String, ValidationError> {
  let name = name.trim();
  if name.is_empty() {
    return Err(ValidationError::MissingField {
      field: "name".to_string(),
    });
  }
  Ok(name.to_string())
}

fn normalize_phone(phone_number: Option<String>) -> Option<String> {
  phone_number
    .map(|p| p.trim().to_string())
    .filter(|p| !p.is_empty())
}
