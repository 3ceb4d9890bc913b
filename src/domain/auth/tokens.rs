//! Stateless signing and verification of identity claims.
//!
//! Tokens are HS256 JWTs carrying the subject id, email, issue time and expiry.
//! Access and refresh tokens share this exact structure; only the TTL used at
//! issuance differs.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value_objects::{Email, UserId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
  #[error("Token signature is invalid")]
  SignatureInvalid,

  #[error("Token has expired")]
  Expired,

  #[error("Token is malformed")]
  Malformed,

  #[error("Token encoding failed: {0}")]
  Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
  fn from(error: jsonwebtoken::errors::Error) -> Self {
    match error.kind() {
      JwtErrorKind::InvalidSignature => TokenError::SignatureInvalid,
      JwtErrorKind::ExpiredSignature => TokenError::Expired,
      _ => TokenError::Malformed,
    }
  }
}

/// Claims embedded in every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
  /// Subject: the user id
  pub sub: String,
  pub email: String,
  /// Issued at (Unix seconds)
  pub iat: i64,
  /// Expires at (Unix seconds)
  pub exp: i64,
}

impl TokenClaims {
  pub fn expires_at(&self) -> DateTime<Utc> {
    Utc
      .timestamp_opt(self.exp, 0)
      .single()
      .unwrap_or(DateTime::<Utc>::MIN_UTC)
  }
}

/// A freshly signed token together with its expiry
#[derive(Clone)]
pub struct IssuedToken {
  pub token: String,
  pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for IssuedToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("IssuedToken")
      .field("token", &"***")
      .field("expires_at", &self.expires_at)
      .finish()
  }
}

/// Signs and verifies tokens with a shared secret and a fixed TTL
#[derive(Clone)]
pub struct TokenManager {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
  ttl: Duration,
}

impl TokenManager {
  pub fn new(secret: &str, ttl: Duration) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    Self {
      encoding_key: EncodingKey::from_secret(secret.as_bytes()),
      decoding_key: DecodingKey::from_secret(secret.as_bytes()),
      validation,
      ttl,
    }
  }

  /// Issues a token valid for this manager's TTL
  pub fn generate(&self, user_id: &UserId, email: &Email) -> Result<IssuedToken, TokenError> {
    self.generate_with_ttl(user_id, email, self.ttl)
  }

  /// Issues a token valid for an explicit TTL
  pub fn generate_with_ttl(
    &self,
    user_id: &UserId,
    email: &Email,
    ttl: Duration,
  ) -> Result<IssuedToken, TokenError> {
    let issued_at = Utc::now();
    let expires_at = issued_at
      .checked_add_signed(ttl)
      .ok_or_else(|| TokenError::Encoding("Duration out of range".to_string()))?;

    let claims = TokenClaims {
      sub: user_id.to_string(),
      email: email.as_str().to_string(),
      iat: issued_at.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
      .map_err(|e| TokenError::Encoding(e.to_string()))?;

    Ok(IssuedToken {
      token,
      expires_at: claims.expires_at(),
    })
  }

  /// Verifies the signature and expiry of a token and returns its claims.
  ///
  /// A token is valid only while `now < exp`; the decoder alone still accepts
  /// `exp == now`.
  pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
    let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;

    if data.claims.exp <= Utc::now().timestamp() {
      return Err(TokenError::Expired);
    }

    Ok(data.claims)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn subject() -> (UserId, Email) {
    (UserId::new(), Email::new("a@x.com").unwrap())
  }

  #[test]
  fn test_generate_and_verify_round_trip() {
    let manager = TokenManager::new("secret", Duration::hours(24));
    let (user_id, email) = subject();

    let issued = manager.generate(&user_id, &email).unwrap();
    assert_eq!(issued.token.split('.').count(), 3);

    let claims = manager.verify(&issued.token).unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.exp - claims.iat, Duration::hours(24).num_seconds());
    assert_eq!(claims.expires_at(), issued.expires_at);
  }

  #[test]
  fn test_expired_token_is_rejected() {
    let manager = TokenManager::new("secret", Duration::hours(24));
    let (user_id, email) = subject();

    let issued = manager
      .generate_with_ttl(&user_id, &email, Duration::seconds(-5))
      .unwrap();

    assert_eq!(manager.verify(&issued.token), Err(TokenError::Expired));
  }

  #[test]
  fn test_zero_ttl_token_is_expired_immediately() {
    let manager = TokenManager::new("secret", Duration::zero());
    let (user_id, email) = subject();

    let issued = manager.generate(&user_id, &email).unwrap();

    assert_eq!(manager.verify(&issued.token), Err(TokenError::Expired));
  }

  #[test]
  fn test_wrong_secret_is_rejected() {
    let issuer = TokenManager::new("secret", Duration::hours(1));
    let verifier = TokenManager::new("another-secret", Duration::hours(1));
    let (user_id, email) = subject();

    let issued = issuer.generate(&user_id, &email).unwrap();

    assert_eq!(verifier.verify(&issued.token), Err(TokenError::SignatureInvalid));
  }

  #[test]
  fn test_tampered_payload_is_rejected() {
    let manager = TokenManager::new("secret", Duration::hours(1));
    let (user_id, email) = subject();
    let other = manager
      .generate(&UserId::new(), &Email::new("b@x.com").unwrap())
      .unwrap();
    let issued = manager.generate(&user_id, &email).unwrap();

    // Splice the payload of one token onto the signature of another
    let original: Vec<&str> = issued.token.split('.').collect();
    let foreign: Vec<&str> = other.token.split('.').collect();
    let forged = format!("{}.{}.{}", original[0], foreign[1], original[2]);

    assert_eq!(manager.verify(&forged), Err(TokenError::SignatureInvalid));
  }

  #[test]
  fn test_garbage_is_malformed() {
    let manager = TokenManager::new("secret", Duration::hours(1));

    assert_eq!(manager.verify("not-a-token"), Err(TokenError::Malformed));
    assert_eq!(manager.verify(""), Err(TokenError::Malformed));
  }

  #[test]
  fn test_managers_with_shared_secret_accept_each_others_tokens() {
    let access = TokenManager::new("secret", Duration::hours(24));
    let refresh = TokenManager::new("secret", Duration::hours(720));
    let (user_id, email) = subject();

    let access_token = access.generate(&user_id, &email).unwrap();

    // No claim distinguishes the two flavors
    assert!(refresh.verify(&access_token.token).is_ok());
  }
}
