use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  ChangePasswordUseCase, LoginUserUseCase, LogoutUserUseCase, RefreshTokenUseCase,
  RegisterUserUseCase, UpdateProfileUseCase, VerifyTokenUseCase,
};
use crate::domain::auth::services::AuthService;

use super::handlers::auth::{
  change_password_handler, login_handler, logout_handler, refresh_handler, register_handler,
  update_profile_handler, verify_handler,
};
use super::middleware::AuthMiddleware;

/// Use cases backing the authentication routes
#[derive(Clone)]
pub struct AuthRouteDependencies {
  pub register: Arc<RegisterUserUseCase>,
  pub login: Arc<LoginUserUseCase>,
  pub verify: Arc<VerifyTokenUseCase>,
  pub refresh: Arc<RefreshTokenUseCase>,
  pub logout: Arc<LogoutUserUseCase>,
  pub change_password: Arc<ChangePasswordUseCase>,
  pub update_profile: Arc<UpdateProfileUseCase>,
}

impl AuthRouteDependencies {
  /// Builds every use case over one shared service
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self {
      register: Arc::new(RegisterUserUseCase::new(auth_service.clone())),
      login: Arc::new(LoginUserUseCase::new(auth_service.clone())),
      verify: Arc::new(VerifyTokenUseCase::new(auth_service.clone())),
      refresh: Arc::new(RefreshTokenUseCase::new(auth_service.clone())),
      logout: Arc::new(LogoutUserUseCase::new(auth_service.clone())),
      change_password: Arc::new(ChangePasswordUseCase::new(auth_service.clone())),
      update_profile: Arc::new(UpdateProfileUseCase::new(auth_service)),
    }
  }
}

/// Configure authentication routes
///
/// Mounts all authentication endpoints under the provided scope
/// (e.g. `/api/v1/auth`).
///
/// # Routes
///
/// - POST /register - Register a new user account
/// - POST /login - Authenticate and issue tokens
/// - POST /verify - Check an access token
/// - POST /refresh - Exchange a refresh token for a new pair
/// - POST /logout - Acknowledge logout (tokens are stateless)
/// - POST /change-password - Change the caller's password (bearer token required)
/// - PUT /profile - Update the caller's profile (bearer token required)
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use kube_ec_auth::adapters::http::routes::{AuthRouteDependencies, configure_auth_routes};
/// # use kube_ec_auth::domain::auth::services::AuthService;
///
/// # fn example(auth_service: Arc<AuthService>) {
/// let deps = AuthRouteDependencies::new(auth_service);
/// let app = App::new().service(
///   web::scope("/api/v1/auth").configure(|cfg| configure_auth_routes(cfg, deps.clone())),
/// );
/// # }
/// ```
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, deps: AuthRouteDependencies) {
  let verify = deps.verify.clone();

  cfg
    .app_data(web::Data::new(deps.register))
    .app_data(web::Data::new(deps.login))
    .app_data(web::Data::new(deps.verify))
    .app_data(web::Data::new(deps.refresh))
    .app_data(web::Data::new(deps.logout))
    .app_data(web::Data::new(deps.change_password))
    .app_data(web::Data::new(deps.update_profile))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .route("/verify", web::post().to(verify_handler))
    .route("/refresh", web::post().to(refresh_handler))
    .route("/logout", web::post().to(logout_handler))
    .service(
      web::resource("/change-password")
        .wrap(AuthMiddleware::new(verify.clone()))
        .route(web::post().to(change_password_handler)),
    )
    .service(
      web::resource("/profile")
        .wrap(AuthMiddleware::new(verify))
        .route(web::put().to(update_profile_handler)),
    );
}
