//! Password hashing and verification using Argon2id.
//!
//! Hashes are self-describing PHC strings carrying their own salt, so a
//! stored hash never reveals the password and two hashes of the same
//! password differ.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

fn peppered_input<'a>(password: &'a str, pepper: Option<&str>, buf: &'a mut String) -> &'a [u8] {
    match pepper {
        Some(p) => {
            *buf = format!("{p}{password}");
            buf.as_bytes()
        }
        None => password.as_bytes(),
    }
}

/// Hash a plaintext password into an Argon2id PHC-format string.
///
/// If `pepper` is provided it is prepended to the password before
/// hashing.
pub fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, AuthError> {
    let mut buf = String::new();
    let input = peppered_input(password, pepper, &mut buf);

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(input, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto(format!("hash error: {e}")))
}

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let mut buf = String::new();
    let input = peppered_input(password, pepper, &mut buf);

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(input, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

/// Hashes and verifies admin passwords with a fixed pepper.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    pepper: Option<String>,
}

impl CredentialStore {
    pub fn new(pepper: Option<String>) -> Self {
        Self { pepper }
    }

    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        hash_password(password, self.pepper.as_deref())
    }

    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        verify_password(password, hash, self.pepper.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("hunter22", None).unwrap();
        assert!(verify_password("hunter22", &hash, None).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password("hunter22", None).unwrap();
        assert!(!verify_password("wrong", &hash, None).unwrap());
    }

    #[test]
    fn hash_is_salted_and_hides_password() {
        let a = hash_password("hunter22", None).unwrap();
        let b = hash_password("hunter22", None).unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
        assert!(!a.contains("hunter22"));
    }

    #[test]
    fn pepper_is_applied() {
        let hash = hash_password("hunter22", Some("pepper!")).unwrap();
        assert!(verify_password("hunter22", &hash, Some("pepper!")).unwrap());
        // Without pepper should fail.
        assert!(!verify_password("hunter22", &hash, None).unwrap());
    }

    #[test]
    fn malformed_hash_returns_error() {
        let result = verify_password("pw", "not-a-hash", None);
        assert!(matches!(result, Err(AuthError::Crypto(_))));
    }

    #[test]
    fn credential_store_uses_its_pepper() {
        let store = CredentialStore::new(Some("s3cret".into()));
        let hash = store.hash("correct horse").unwrap();

        assert!(store.verify("correct horse", &hash).unwrap());
        assert!(!store.verify("wrong horse", &hash).unwrap());
        assert!(
            !CredentialStore::default()
                .verify("correct horse", &hash)
                .unwrap()
        );
    }
}
