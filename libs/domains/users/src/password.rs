//! One-way password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{UserError, UserResult};

/// Hash a plaintext password with a freshly generated salt.
pub fn hash(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// Check a candidate plaintext against a stored hash.
///
/// The plaintext is never recoverable from the hash; this one-way check is
/// the only supported comparison.
pub fn verify(candidate: &str, stored_hash: &str) -> UserResult<bool> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash("correct horse battery staple").unwrap();

        assert_ne!(hashed, "correct horse battery staple");
        assert!(verify("correct horse battery staple", &hashed).unwrap());
        assert!(!verify("wrong password", &hashed).unwrap());
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let first = hash("secret").unwrap();
        let second = hash("secret").unwrap();

        assert_ne!(first, second);
        assert!(verify("secret", &first).unwrap());
        assert!(verify("secret", &second).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify("secret", "not-a-phc-string").is_err());
    }
}
