use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;
use zeroize::Zeroizing;

use crate::adapters::http::{
  dtos::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ProfileResponse, RefreshTokenRequest,
    RefreshTokenResponse, RegisterRequest, RegisterResponse, SuccessResponse, UpdateProfileRequest,
    VerifyTokenRequest, VerifyTokenResponse,
  },
  errors::ApiError,
  middleware::{AuthUser, bearer_token},
};
use crate::application::auth::{
  ChangePasswordCommand, ChangePasswordUseCase, LoginUserCommand, LoginUserUseCase,
  LogoutUserUseCase, RefreshTokenCommand, RefreshTokenUseCase, RegisterUserCommand,
  RegisterUserUseCase, UpdateProfileCommand, UpdateProfileUseCase, VerifyTokenUseCase,
};

/// Handler for user registration
///
/// POST /api/v1/auth/register
/// Body: RegisterRequest (JSON)
/// Response: RegisterResponse (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = RegisterUserCommand {
    email: request.email,
    password: Zeroizing::new(request.password),
    name: request.name,
    phone_number: request.phone_number,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(RegisterResponse {
    user_id: response.user_id,
    email: response.email,
    name: response.name,
    phone_number: response.phone_number,
    access_token: response.access_token,
    refresh_token: response.refresh_token,
    access_token_expires_at: response.access_token_expires_at,
    created_at: response.created_at,
  }))
}

/// Handler for user login
///
/// POST /api/v1/auth/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = LoginUserCommand {
    email: request.email,
    password: Zeroizing::new(request.password),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(LoginResponse {
    user_id: response.user_id,
    email: response.email,
    name: response.name,
    phone_number: response.phone_number,
    access_token: response.access_token,
    refresh_token: response.refresh_token,
    access_token_expires_at: response.access_token_expires_at,
  }))
}

/// Handler for token verification; always 200 with a `valid` flag
///
/// POST /api/v1/auth/verify
pub async fn verify_handler(
  request: web::Json<VerifyTokenRequest>,
  use_case: web::Data<Arc<VerifyTokenUseCase>>,
) -> HttpResponse {
  let response = use_case.execute(&request.token).await;

  HttpResponse::Ok().json(VerifyTokenResponse {
    valid: response.valid,
    user_id: response.user_id,
    email: response.email,
    expires_at: response.expires_at,
  })
}

/// Handler for exchanging a refresh token
///
/// POST /api/v1/auth/refresh
pub async fn refresh_handler(
  request: web::Json<RefreshTokenRequest>,
  use_case: web::Data<Arc<RefreshTokenUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let response = use_case
    .execute(RefreshTokenCommand {
      refresh_token: request.into_inner().refresh_token,
    })
    .await?;

  Ok(HttpResponse::Ok().json(RefreshTokenResponse {
    access_token: response.access_token,
    refresh_token: response.refresh_token,
    expires_at: response.expires_at,
  }))
}

/// Handler for user logout. Always succeeds; issued tokens stay valid until expiry.
///
/// POST /api/v1/auth/logout
/// Headers: Authorization: Bearer <token> (optional)
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  http_req: HttpRequest,
) -> HttpResponse {
  let token = bearer_token(&http_req).unwrap_or_default();

  use_case.execute(&token).await;

  HttpResponse::Ok().json(SuccessResponse {
    success: true,
    message: "Successfully logged out".to_string(),
  })
}

/// Handler for changing the caller's password
///
/// POST /api/v1/auth/change-password
/// Headers: Authorization: Bearer <access token>
pub async fn change_password_handler(
  request: web::Json<ChangePasswordRequest>,
  use_case: web::Data<Arc<ChangePasswordUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user()?;
  let request = request.into_inner();

  use_case
    .execute(ChangePasswordCommand {
      user_id: user.user_id,
      old_password: Zeroizing::new(request.old_password),
      new_password: Zeroizing::new(request.new_password),
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    success: true,
    message: "Password changed".to_string(),
  }))
}

/// Handler for updating the caller's profile
///
/// PUT /api/v1/auth/profile
/// Headers: Authorization: Bearer <access token>
pub async fn update_profile_handler(
  request: web::Json<UpdateProfileRequest>,
  use_case: web::Data<Arc<UpdateProfileUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user()?;
  let request = request.into_inner();

  let response = use_case
    .execute(UpdateProfileCommand {
      user_id: user.user_id,
      name: request.name,
      phone_number: request.phone_number,
    })
    .await?;

  Ok(HttpResponse::Ok().json(ProfileResponse {
    user_id: response.user_id,
    email: response.email,
    name: response.name,
    phone_number: response.phone_number,
    updated_at: response.updated_at,
  }))
}
