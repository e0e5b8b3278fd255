//! Password handling: length policy and Argon2 hashing.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A plaintext password on its way to the identity backend.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn meets_minimum_length(&self) -> bool {
        self.char_len() >= MIN_PASSWORD_LEN
    }
}

impl core::fmt::Debug for Password {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("failed to gather salt entropy: {0}")]
    Entropy(String),

    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Hash a password into an Argon2 PHC string with a random 16-byte salt.
pub fn hash_password(password: &Password) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Entropy(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Verify a password against a stored PHC string.
///
/// An unparseable hash verifies as `false`.
pub fn verify_password(phc: &str, password: &Password) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.expose().as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_counts_characters() {
        assert!(!Password::new("abc12").meets_minimum_length());
        assert!(Password::new("abc123").meets_minimum_length());
        // 6 characters, 12 bytes
        assert!(Password::new("пароль").meets_minimum_length());
    }

    #[test]
    fn debug_is_redacted() {
        assert_eq!(format!("{:?}", Password::new("hunter22")), "Password(***)");
    }

    #[test]
    fn hash_then_verify() {
        let password = Password::new("correct horse");
        let phc = hash_password(&password).unwrap();
        assert!(phc.starts_with("$argon2"));
        assert!(verify_password(&phc, &password));
        assert!(!verify_password(&phc, &Password::new("wrong horse")));
    }

    #[test]
    fn salts_differ_per_hash() {
        let password = Password::new("same-secret");
        assert_ne!(hash_password(&password).unwrap(), hash_password(&password).unwrap());
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", &Password::new("anything")));
    }
}
