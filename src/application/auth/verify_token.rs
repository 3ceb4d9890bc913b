use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::auth::services::AuthService;

/// Result of checking an access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyTokenResponse {
  pub valid: bool,
  pub user_id: Option<String>,
  pub email: Option<String>,
  pub expires_at: Option<DateTime<Utc>>,
}

/// Use case for verifying an access token
pub struct VerifyTokenUseCase {
  auth_service: Arc<AuthService>,
}

impl VerifyTokenUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Never fails: bad signatures, expiry and garbage all yield `valid: false`
  pub async fn execute(&self, token: &str) -> VerifyTokenResponse {
    let verification = self.auth_service.verify_token(token);

    VerifyTokenResponse {
      valid: verification.valid,
      user_id: verification.user_id,
      email: verification.email,
      expires_at: verification.expires_at,
    }
  }
}
