use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use super::entities::User;
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, UserRepository};
use super::tokens::{IssuedToken, TokenManager};
use super::value_objects::{Email, Password, UserId, ValueObjectError};

const TIMING_PASSWORD: &str = "timing-equalization-password";

/// Token signing configuration injected at service construction
#[derive(Clone)]
pub struct AuthServiceConfig {
  pub jwt_secret: String,
  pub access_token_ttl: Duration,
  pub refresh_token_ttl: Duration,
}

impl AuthServiceConfig {
  pub const DEFAULT_ACCESS_TOKEN_TTL_HOURS: i64 = 24;
  pub const DEFAULT_REFRESH_TOKEN_TTL_HOURS: i64 = 720;

  /// Config with the default access (24h) and refresh (720h) lifetimes
  pub fn with_default_ttls(jwt_secret: impl Into<String>) -> Self {
    Self {
      jwt_secret: jwt_secret.into(),
      access_token_ttl: Duration::hours(Self::DEFAULT_ACCESS_TOKEN_TTL_HOURS),
      refresh_token_ttl: Duration::hours(Self::DEFAULT_REFRESH_TOKEN_TTL_HOURS),
    }
  }
}

impl std::fmt::Debug for AuthServiceConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AuthServiceConfig")
      .field("jwt_secret", &"***")
      .field("access_token_ttl", &self.access_token_ttl)
      .field("refresh_token_ttl", &self.refresh_token_ttl)
      .finish()
  }
}

/// Access and refresh tokens issued together
#[derive(Debug, Clone)]
pub struct TokenPair {
  pub access: IssuedToken,
  pub refresh: IssuedToken,
}

/// Result of a successful register, login or refresh
#[derive(Debug, Clone)]
pub struct AuthSession {
  pub user: User,
  pub tokens: TokenPair,
}

/// Outcome of verifying an access token; never an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenVerification {
  pub valid: bool,
  pub user_id: Option<String>,
  pub email: Option<String>,
  pub expires_at: Option<DateTime<Utc>>,
}

impl TokenVerification {
  pub fn invalid() -> Self {
    Self {
      valid: false,
      user_id: None,
      email: None,
      expires_at: None,
    }
  }
}

/// Authentication service implementing core business logic.
///
/// Holds no mutable state; concurrent registrations for one email are
/// arbitrated by the repository's uniqueness constraint.
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  access_tokens: TokenManager,
  refresh_tokens: TokenManager,
  /// Verified against on unknown-email logins so both failure paths cost one hash check
  timing_hash: Option<String>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    config: AuthServiceConfig,
  ) -> Self {
    let timing_hash = match password_hasher.hash(TIMING_PASSWORD) {
      Ok(hash) => Some(hash),
      Err(e) => {
        tracing::warn!("Failed to prepare login timing hash: {}", e);
        None
      }
    };

    Self {
      user_repo,
      password_hasher,
      access_tokens: TokenManager::new(&config.jwt_secret, config.access_token_ttl),
      refresh_tokens: TokenManager::new(&config.jwt_secret, config.refresh_token_ttl),
      timing_hash,
    }
  }

  /// Registers a new user and issues a token pair
  ///
  /// # Errors
  /// - `ValueObject` / `Validation` for malformed input (no storage I/O happens)
  /// - `EmailAlreadyExists` if the normalized email is taken
  /// - `Repository` for storage failures
  pub async fn register(
    &self,
    email: &str,
    password: &str,
    name: &str,
    phone_number: Option<&str>,
  ) -> Result<AuthSession, AuthError> {
    let email = Email::new(email)?;
    let password = Password::new(password, self.password_hasher.as_ref())?;
    let user = User::new(email, password, name, phone_number.map(str::to_string))?;

    match self.user_repo.create_user(&user).await {
      Ok(()) => {}
      Err(RepositoryError::DuplicateKey(_)) => {
        tracing::info!("Registration rejected: email already registered");
        return Err(AuthError::EmailAlreadyExists);
      }
      Err(e) => {
        tracing::error!("Failed to persist new user: {}", e);
        return Err(e.into());
      }
    }

    let tokens = self.issue_tokens(&user)?;
    tracing::info!(user_id = %user.id(), "User registered");

    Ok(AuthSession { user, tokens })
  }

  /// Authenticates a user by email and password.
  ///
  /// An unknown email and a wrong password produce the same
  /// `InvalidCredentials` error.
  pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
    let email = Email::new(email)?;

    let user = match self.user_repo.find_by_email(&email).await {
      Ok(user) => user,
      Err(RepositoryError::NotFound) => {
        if let Some(hash) = &self.timing_hash {
          let _ = self.password_hasher.verify(password, hash);
        }
        tracing::warn!("Login failed: invalid credentials");
        return Err(AuthError::InvalidCredentials);
      }
      Err(e) => {
        tracing::error!("Failed to look up user for login: {}", e);
        return Err(e.into());
      }
    };

    match user.verify_password(password, self.password_hasher.as_ref()) {
      Ok(()) => {}
      Err(ValueObjectError::PasswordMismatch) => {
        tracing::warn!("Login failed: invalid credentials");
        return Err(AuthError::InvalidCredentials);
      }
      Err(e) => {
        tracing::error!(user_id = %user.id(), "Password verification failed: {}", e);
        return Err(e.into());
      }
    }

    let tokens = self.issue_tokens(&user)?;
    tracing::info!(user_id = %user.id(), "User logged in");

    Ok(AuthSession { user, tokens })
  }

  /// Checks an access token. Every failure mode collapses into `valid: false`.
  pub fn verify_token(&self, token: &str) -> TokenVerification {
    match self.access_tokens.verify(token) {
      Ok(claims) => TokenVerification {
        valid: true,
        expires_at: Some(claims.expires_at()),
        user_id: Some(claims.sub),
        email: Some(claims.email),
      },
      Err(e) => {
        tracing::debug!("Token verification failed: {}", e);
        TokenVerification::invalid()
      }
    }
  }

  /// Exchanges a refresh token for a new token pair.
  ///
  /// The presented token is not invalidated and stays usable until it expires.
  pub async fn refresh_token(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
    let claims = self.refresh_tokens.verify(refresh_token).map_err(|e| {
      tracing::warn!("Refresh rejected: {}", e);
      AuthError::InvalidToken
    })?;

    let user_id = UserId::parse(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

    let user = match self.user_repo.find_by_id(&user_id).await {
      Ok(user) => user,
      Err(RepositoryError::NotFound) => {
        tracing::warn!(user_id = %user_id, "Refresh rejected: user no longer exists");
        return Err(AuthError::InvalidToken);
      }
      Err(e) => {
        tracing::error!("Failed to look up user for refresh: {}", e);
        return Err(e.into());
      }
    };

    let tokens = self.issue_tokens(&user)?;
    tracing::info!(user_id = %user.id(), "Tokens refreshed");

    Ok(AuthSession { user, tokens })
  }

  /// Changes a user's password after verifying the current one
  ///
  /// # Errors
  /// - `UserNotFound` if no user has this id
  /// - `InvalidCredentials` if `old_password` does not match
  /// - `ValueObject` if `new_password` violates the length bounds
  pub async fn change_password(
    &self,
    user_id: &str,
    old_password: &str,
    new_password: &str,
  ) -> Result<(), AuthError> {
    let mut user = self.load_user(user_id).await?;

    match user.change_password(old_password, new_password, self.password_hasher.as_ref()) {
      Ok(()) => {}
      Err(ValueObjectError::PasswordMismatch) => {
        tracing::warn!(user_id = %user.id(), "Password change rejected: wrong current password");
        return Err(AuthError::InvalidCredentials);
      }
      Err(e) => return Err(e.into()),
    }

    self
      .user_repo
      .update_password(user.id(), user.password(), user.updated_at())
      .await?;

    tracing::info!(user_id = %user.id(), "Password changed");
    Ok(())
  }

  /// Updates a user's display name and phone number
  pub async fn update_profile(
    &self,
    user_id: &str,
    name: &str,
    phone_number: Option<&str>,
  ) -> Result<User, AuthError> {
    let mut user = self.load_user(user_id).await?;

    user.update_profile(name, phone_number.map(str::to_string))?;

    self
      .user_repo
      .update_profile(user.id(), user.name(), user.phone_number(), user.updated_at())
      .await?;

    tracing::info!(user_id = %user.id(), "Profile updated");
    Ok(user)
  }

  /// Logout is a no-op: issued tokens are stateless and stay valid until
  /// they expire. Clients are expected to discard them.
  pub fn logout(&self, _token: &str) {
    tracing::debug!("Logout requested; tokens are stateless and remain valid until expiry");
  }

  async fn load_user(&self, user_id: &str) -> Result<User, AuthError> {
    let user_id = UserId::parse(user_id).map_err(|_| AuthError::UserNotFound)?;

    match self.user_repo.find_by_id(&user_id).await {
      Ok(user) => Ok(user),
      Err(RepositoryError::NotFound) => Err(AuthError::UserNotFound),
      Err(e) => Err(e.into()),
    }
  }

  fn issue_tokens(&self, user: &User) -> Result<TokenPair, AuthError> {
    let access = self
      .access_tokens
      .generate(user.id(), user.email())
      .map_err(AuthError::TokenIssue)?;
    let refresh = self
      .refresh_tokens
      .generate(user.id(), user.email())
      .map_err(AuthError::TokenIssue)?;

    Ok(TokenPair { access, refresh })
  }
}
