use std::sync::Arc;

use crate::domain::auth::services::AuthService;

/// Use case for logging out a user
///
/// Tokens are stateless, so nothing is revoked; the caller is expected to
/// discard its tokens.
pub struct LogoutUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutUserUseCase {
  /// Creates a new instance of LogoutUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Always succeeds
  pub async fn execute(&self, token: &str) {
    self.auth_service.logout(token);
  }
}
