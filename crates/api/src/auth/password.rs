//! Argon2id password hashing and registration-time password checks.
//!
//! Hashes are stored as PHC strings, so the salt and algorithm parameters
//! travel with the hash and plaintext never reaches the database.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Upper bound on password length, in characters. Keeps hashing cost bounded.
pub const MAX_PASSWORD_LENGTH: usize = 256;

/// Hash a plaintext password using Argon2id with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; `Err` means the stored hash itself is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Enforce length bounds on a new password. Lengths count characters.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    let len = password.chars().count();
    if len < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}
