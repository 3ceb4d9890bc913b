use chrono::{DateTime, Utc};
use std::sync::Arc;
use zeroize::Zeroizing;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Command for registering a new user
#[derive(Clone)]
pub struct RegisterUserCommand {
  pub email: String,
  /// Plain text, wiped from memory on drop
  pub password: Zeroizing<String>,
  pub name: String,
  pub phone_number: Option<String>,
}

impl std::fmt::Debug for RegisterUserCommand {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RegisterUserCommand")
      .field("email", &self.email)
      .field("password", &"***")
      .field("name", &self.name)
      .field("phone_number", &self.phone_number)
      .finish()
  }
}

/// Response after successful user registration
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  pub user_id: String,
  pub email: String,
  pub name: String,
  pub phone_number: Option<String>,
  pub access_token: String,
  pub refresh_token: String,
  pub access_token_expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user registration use case
  ///
  /// # Errors
  /// Returns `AuthError` if registration fails (e.g., email already exists, validation errors)
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    let session = self
      .auth_service
      .register(
        &command.email,
        &command.password,
        &command.name,
        command.phone_number.as_deref(),
      )
      .await?;

    let user = session.user;
    Ok(RegisterUserResponse {
      user_id: user.id().to_string(),
      email: user.email().to_string(),
      name: user.name().to_string(),
      phone_number: user.phone_number().map(str::to_string),
      access_token: session.tokens.access.token,
      refresh_token: session.tokens.refresh.token,
      access_token_expires_at: session.tokens.access.expires_at,
      created_at: user.created_at(),
    })
  }
}
