//! Account passwords.
//!
//! Hashes are Argon2id PHC strings with the crate's default parameters.
//! Hashing is CPU-bound; handlers run it through `spawn_blocking`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Upper bound on accepted passwords, so a request can't buy unbounded hashing work.
pub const MAX_PASSWORD_BYTES: usize = 1024;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password must be at most {MAX_PASSWORD_BYTES} bytes")]
    TooLong,

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

impl PasswordError {
    /// Whether the caller supplied an unacceptable password, as opposed to a server fault.
    pub fn is_rejected_input(&self) -> bool {
        matches!(self, Self::Empty | Self::TooLong)
    }
}

fn check_policy(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        Err(PasswordError::Empty)
    } else if password.len() > MAX_PASSWORD_BYTES {
        Err(PasswordError::TooLong)
    } else {
        Ok(())
    }
}

/// Hash a new account password.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    check_policy(password)?;
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a login attempt against a stored hash.
///
/// Attempts no account could have been created with are simply wrong and
/// skip the hashing work.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
    if check_policy(password).is_err() {
        return Ok(false);
    }

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
