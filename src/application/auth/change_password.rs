use std::sync::Arc;
use zeroize::Zeroizing;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Command for changing a user's password
#[derive(Clone)]
pub struct ChangePasswordCommand {
  pub user_id: String,
  pub old_password: Zeroizing<String>,
  pub new_password: Zeroizing<String>,
}

impl std::fmt::Debug for ChangePasswordCommand {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ChangePasswordCommand")
      .field("user_id", &self.user_id)
      .field("old_password", &"***")
      .field("new_password", &"***")
      .finish()
  }
}

/// Use case for changing a password
pub struct ChangePasswordUseCase {
  auth_service: Arc<AuthService>,
}

impl ChangePasswordUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// - `UserNotFound` for an unknown or unparsable user id
  /// - `InvalidCredentials` if the old password is wrong
  /// - `ValueObject` if the new password violates the length bounds
  pub async fn execute(&self, command: ChangePasswordCommand) -> Result<(), AuthError> {
    self
      .auth_service
      .change_password(&command.user_id, &command.old_password, &command.new_password)
      .await
  }
}
