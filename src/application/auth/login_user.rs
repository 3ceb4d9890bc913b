use chrono::{DateTime, Utc};
use std::sync::Arc;
use zeroize::Zeroizing;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Command for logging in a user
#[derive(Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: Zeroizing<String>,
}

impl std::fmt::Debug for LoginUserCommand {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LoginUserCommand")
      .field("email", &self.email)
      .field("password", &"***")
      .finish()
  }
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub user_id: String,
  pub email: String,
  pub name: String,
  pub phone_number: Option<String>,
  pub access_token: String,
  pub refresh_token: String,
  pub access_token_expires_at: DateTime<Utc>,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user login use case
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for an unknown email or a wrong password
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let session = self
      .auth_service
      .login(&command.email, &command.password)
      .await?;

    let user = session.user;
    Ok(LoginUserResponse {
      user_id: user.id().to_string(),
      email: user.email().to_string(),
      name: user.name().to_string(),
      phone_number: user.phone_number().map(str::to_string),
      access_token: session.tokens.access.token,
      refresh_token: session.tokens.refresh.token,
      access_token_expires_at: session.tokens.access.expires_at,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::test_support::auth_service;
  use crate::domain::auth::errors::ErrorKind;

  fn command(email: &str, password: &str) -> LoginUserCommand {
    LoginUserCommand {
      email: email.to_string(),
      password: Zeroizing::new(password.to_string()),
    }
  }

  #[tokio::test]
  async fn test_login_after_register() {
    let service = auth_service();
    let registered = service
      .register("a@x.com", "password123", "Ann", None)
      .await
      .unwrap();
    let use_case = LoginUserUseCase::new(service);

    let response = use_case
      .execute(command("A@x.com", "password123"))
      .await
      .unwrap();

    assert_eq!(response.user_id, registered.user.id().to_string());
    assert_eq!(response.email, "a@x.com");
    assert_eq!(response.phone_number, None);
  }

  #[tokio::test]
  async fn test_login_failures_are_unauthenticated() {
    let service = auth_service();
    service
      .register("a@x.com", "password123", "Ann", None)
      .await
      .unwrap();
    let use_case = LoginUserUseCase::new(service);

    let wrong = use_case
      .execute(command("a@x.com", "wrongpw"))
      .await
      .unwrap_err();
    let unknown = use_case
      .execute(command("b@x.com", "password123"))
      .await
      .unwrap_err();

    assert_eq!(wrong.kind(), ErrorKind::Unauthenticated);
    assert_eq!(unknown.kind(), ErrorKind::Unauthenticated);
  }
}
