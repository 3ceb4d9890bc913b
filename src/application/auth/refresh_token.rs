use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Command for exchanging a refresh token
#[derive(Clone)]
pub struct RefreshTokenCommand {
  pub refresh_token: String,
}

impl std::fmt::Debug for RefreshTokenCommand {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RefreshTokenCommand")
      .field("refresh_token", &"***")
      .finish()
  }
}

/// Freshly issued token pair
#[derive(Debug, Clone)]
pub struct RefreshTokenResponse {
  pub access_token: String,
  pub refresh_token: String,
  /// Expiry of the new access token
  pub expires_at: DateTime<Utc>,
}

/// Use case for refreshing tokens
pub struct RefreshTokenUseCase {
  auth_service: Arc<AuthService>,
}

impl RefreshTokenUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// Returns `AuthError::InvalidToken` if the token is bad or its subject no longer exists
  pub async fn execute(
    &self,
    command: RefreshTokenCommand,
  ) -> Result<RefreshTokenResponse, AuthError> {
    let session = self
      .auth_service
      .refresh_token(&command.refresh_token)
      .await?;

    Ok(RefreshTokenResponse {
      access_token: session.tokens.access.token,
      refresh_token: session.tokens.refresh.token,
      expires_at: session.tokens.access.expires_at,
    })
  }
}
