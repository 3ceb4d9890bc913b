use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};

use crate::domain::auth::errors::HashError;
use crate::domain::auth::ports::PasswordHasher;

/// Argon2id password hasher implementation
///
/// Default parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
///
/// Every hash embeds its own salt and parameters in PHC string form, so hashes
/// produced under older settings keep verifying after the costs are raised.
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub const DEFAULT_MEMORY_KIB: u32 = 19456;
  pub const DEFAULT_ITERATIONS: u32 = 2;
  pub const DEFAULT_PARALLELISM: u32 = 1;

  /// Creates a new Argon2PasswordHasher with the specified cost parameters
  pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, HashError> {
    // Output length: 32 bytes
    let params = Params::new(memory_kib, iterations, parallelism, Some(32))
      .map_err(|e| HashError::InvalidParams(format!("Failed to create Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    Ok(Self { argon2 })
  }

  /// Low-cost hasher so unit tests stay fast
  #[cfg(test)]
  pub fn for_tests() -> Self {
    Self::new(1024, 1, 1).expect("test params are valid")
  }
}

impl PasswordHasher for Argon2PasswordHasher {
  fn hash(&self, plain: &str) -> Result<String, HashError> {
    // Fresh salt from the OS's cryptographically secure RNG
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(plain.as_bytes(), &salt)
      .map_err(|e| HashError::HashingFailed(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
  }

  /// Verification runs in constant time inside argon2's `verify_password`
  fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashError> {
    let parsed_hash = Argon2PasswordHash::new(hash)
      .map_err(|e| HashError::VerificationFailed(format!("Invalid hash format: {}", e)))?;

    match self.argon2.verify_password(plain.as_bytes(), &parsed_hash) {
      Ok(_) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(HashError::VerificationFailed(format!(
        "Password verification failed: {}",
        e
      ))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_hash_password() {
    let hasher = Argon2PasswordHasher::for_tests();

    let hash = hasher.hash("test_password_123").unwrap();

    assert!(hash.starts_with("$argon2id$"));
    assert!(!hash.contains("test_password_123"));
  }

  #[test]
  fn test_verify_correct_and_incorrect_password() {
    let hasher = Argon2PasswordHasher::for_tests();
    let hash = hasher.hash("test_password_123").unwrap();

    assert!(hasher.verify("test_password_123", &hash).unwrap());
    assert!(!hasher.verify("wrong_password", &hash).unwrap());
  }

  #[test]
  fn test_hash_produces_different_salts() {
    let hasher = Argon2PasswordHasher::for_tests();

    let hash1 = hasher.hash("test_password_123").unwrap();
    let hash2 = hasher.hash("test_password_123").unwrap();

    assert_ne!(hash1, hash2);
    assert!(hasher.verify("test_password_123", &hash1).unwrap());
    assert!(hasher.verify("test_password_123", &hash2).unwrap());
  }

  #[test]
  fn test_verify_invalid_hash_format() {
    let hasher = Argon2PasswordHasher::for_tests();

    let result = hasher.verify("test_password_123", "invalid_hash");

    assert!(matches!(result, Err(HashError::VerificationFailed(_))));
  }

  #[test]
  fn test_hashes_from_other_cost_settings_still_verify() {
    let cheap = Argon2PasswordHasher::for_tests();
    let stronger = Argon2PasswordHasher::new(2048, 2, 1).unwrap();

    let hash = cheap.hash("test_password_123").unwrap();

    assert!(stronger.verify("test_password_123", &hash).unwrap());
  }

  #[test]
  fn test_argon2_parameters() {
    let hasher = Argon2PasswordHasher::new(2048, 3, 1).unwrap();
    let hash = hasher.hash("test_password_123").unwrap();

    let parsed = Argon2PasswordHash::new(&hash).unwrap();

    assert_eq!(parsed.version, Some(Version::V0x13 as u32));
    assert!(hash.contains("m=2048,t=3,p=1"));
  }

  #[test]
  fn test_invalid_parameters_are_rejected() {
    let result = Argon2PasswordHasher::new(0, 0, 0);

    assert!(matches!(result, Err(HashError::InvalidParams(_))));
  }
}
