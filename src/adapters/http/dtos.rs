use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Request bodies only check presence here; format and length rules live in the
// domain value objects so every entry point enforces them identically.
// Password-bearing requests deliberately do not derive Debug.

/// Request for user registration
#[derive(Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(length(min = 1, message = "Email is required"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,

  #[validate(length(min = 1, message = "Name is required"))]
  pub name: String,

  #[serde(default)]
  pub phone_number: Option<String>,
}

/// Request for user login
#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(length(min = 1, message = "Email is required"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Request for token verification
#[derive(Clone, Deserialize)]
pub struct VerifyTokenRequest {
  #[serde(default)]
  pub token: String,
}

/// Request for token refresh
#[derive(Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
  #[validate(length(min = 1, message = "Refresh token is required"))]
  pub refresh_token: String,
}

/// Request for changing the caller's password
#[derive(Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
  #[validate(length(min = 1, message = "Old password is required"))]
  pub old_password: String,

  #[validate(length(min = 1, message = "New password is required"))]
  pub new_password: String,
}

/// Request for updating the caller's profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
  #[validate(length(min = 1, message = "Name is required"))]
  pub name: String,

  #[serde(default)]
  pub phone_number: Option<String>,
}

/// Response after successful user registration
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  pub user_id: String,
  pub email: String,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone_number: Option<String>,
  pub access_token: String,
  pub refresh_token: String,
  pub access_token_expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

/// Response after successful user login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  pub user_id: String,
  pub email: String,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone_number: Option<String>,
  pub access_token: String,
  pub refresh_token: String,
  pub access_token_expires_at: DateTime<Utc>,
}

/// Token verification result; `valid: false` carries no other fields
#[derive(Debug, Clone, Serialize)]
pub struct VerifyTokenResponse {
  pub valid: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expires_at: Option<DateTime<Utc>>,
}

/// Response after a token refresh
#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenResponse {
  pub access_token: String,
  pub refresh_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Profile returned after an update
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
  pub user_id: String,
  pub email: String,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone_number: Option<String>,
  pub updated_at: DateTime<Utc>,
}

/// Generic success response
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub success: bool,
  pub message: String,
}

/// Error response structure
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}
