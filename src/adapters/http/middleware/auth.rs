use actix_web::{
  Error, HttpMessage, HttpRequest,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header::AUTHORIZATION,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{adapters::http::errors::ApiError, application::auth::VerifyTokenUseCase};

/// Identity taken from a verified bearer access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
  pub user_id: String,
  pub email: String,
}

/// Authentication middleware for routes that act on the caller's own account
///
/// Extracts `Authorization: Bearer <token>`, verifies it and attaches an
/// [`AuthenticatedUser`] to the request extensions. Missing or invalid tokens
/// short-circuit with 401.
pub struct AuthMiddleware {
  verify_use_case: Arc<VerifyTokenUseCase>,
}

impl AuthMiddleware {
  pub fn new(verify_use_case: Arc<VerifyTokenUseCase>) -> Self {
    Self { verify_use_case }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      verify_use_case: self.verify_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  verify_use_case: Arc<VerifyTokenUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let verify_use_case = self.verify_use_case.clone();

    Box::pin(async move {
      let verification = match bearer_token(req.request()) {
        Some(token) => verify_use_case.execute(&token).await,
        None => {
          return Ok(req.error_response(missing_token()).map_into_right_body());
        }
      };

      let user = match (verification.valid, verification.user_id, verification.email) {
        (true, Some(user_id), Some(email)) => AuthenticatedUser { user_id, email },
        _ => {
          tracing::debug!("Rejected request with invalid access token");
          let error = ApiError::Unauthenticated("Invalid or expired token".to_string());
          return Ok(req.error_response(error).map_into_right_body());
        }
      };

      req.extensions_mut().insert(user);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

fn missing_token() -> ApiError {
  ApiError::Unauthenticated("Missing or invalid Authorization header".to_string())
}

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
  req
    .headers()
    .get(AUTHORIZATION)
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
}

/// Extension trait to read the authenticated user attached by [`AuthMiddleware`]
pub trait AuthUser {
  fn authenticated_user(&self) -> Result<AuthenticatedUser, ApiError>;
}

impl AuthUser for HttpRequest {
  fn authenticated_user(&self) -> Result<AuthenticatedUser, ApiError> {
    self
      .extensions()
      .get::<AuthenticatedUser>()
      .cloned()
      .ok_or_else(missing_token)
  }
}
