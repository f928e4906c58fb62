//! Password hashing with argon2id

use crate::error::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Well-formed argon2id hash with default parameters that matches no password.
///
/// Login verifies against it when the email is unknown so both failure paths
/// pay for one argon2 run.
pub const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$lG3Rppizw14FyglXLH9KYg$v7IaSwASq3S8jRVW4wC3p/sBx2k3aNns5b/PWMqwF30";

/// Hash a password with a fresh random salt, PHC-encoded
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash.
///
/// A malformed stored hash is treated as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
