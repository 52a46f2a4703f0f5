//! Salted one-way hashing of the bootstrap password.
//!
//! Hashes are Argon2id PHC strings, so the algorithm parameters and salt
//! travel with the stored value.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::db::SeedError;

pub fn hash_password(password: &str) -> Result<String, SeedError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SeedError::Hash(format!("Failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Returns `Ok(false)` on a mismatch; errors only when `hash` is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, SeedError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| SeedError::Hash(format!("Invalid password hash: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(SeedError::Hash(format!("Failed to verify password: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("admin123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("admin123", &hash).unwrap());
        assert!(!verify_password("admin124", &hash).unwrap());
    }

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hash = hash_password("admin123").unwrap();

        assert_ne!(hash, "admin123");
        assert!(!hash.contains("admin123"));
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_salt_differs_between_hashes() {
        let first = hash_password("admin123").unwrap();
        let second = hash_password("admin123").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("admin123", &first).unwrap());
        assert!(verify_password("admin123", &second).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let err = verify_password("admin123", "admin123").unwrap_err();
        assert!(matches!(err, SeedError::Hash(_)));
    }
}
