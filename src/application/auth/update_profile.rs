use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Command for updating profile fields
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
  pub user_id: String,
  pub name: String,
  pub phone_number: Option<String>,
}

/// Profile after the update
#[derive(Debug, Clone)]
pub struct UpdateProfileResponse {
  pub user_id: String,
  pub email: String,
  pub name: String,
  pub phone_number: Option<String>,
  pub updated_at: DateTime<Utc>,
}

/// Use case for updating a user's profile
pub struct UpdateProfileUseCase {
  auth_service: Arc<AuthService>,
}

impl UpdateProfileUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(
    &self,
    command: UpdateProfileCommand,
  ) -> Result<UpdateProfileResponse, AuthError> {
    let user = self
      .auth_service
      .update_profile(
        &command.user_id,
        &command.name,
        command.phone_number.as_deref(),
      )
      .await?;

    Ok(UpdateProfileResponse {
      user_id: user.id().to_string(),
      email: user.email().to_string(),
      name: user.name().to_string(),
      phone_number: user.phone_number().map(str::to_string),
      updated_at: user.updated_at(),
    })
  }
}
