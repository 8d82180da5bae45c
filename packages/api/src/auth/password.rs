//! # Password hashing and verification — Argon2id
//!
//! - [`hash_password`] salts with [`OsRng`] and returns a PHC-format string
//!   (`$argon2id$v=19$...`), stored in `auth_users.password_hash`.
//! - [`verify_password`] returns `Ok(false)` on mismatch and an error only
//!   when the stored hash cannot be parsed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ApiError;

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| ApiError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("sunshine").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("sunshine", &hash).unwrap());
        assert!(!verify_password("moonshine", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("sunshine").unwrap();
        let b = hash_password("sunshine").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash() {
        assert!(matches!(
            verify_password("sunshine", "not-a-hash"),
            Err(ApiError::Hash(_))
        ));
    }
}
