//! Password value object - one-way credential handling.
//!
//! Encapsulates Argon2 hashing and verification so plaintext passwords
//! never travel past the provisioning boundary.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// Password value object that handles hashing and verification.
///
/// Immutable, compared by digest value. Each call to [`Password::new`] draws
/// a fresh random salt, so two hashes of the same plaintext never collide.
#[derive(Clone)]
pub struct Password {
    digest: String,
}

// Don't expose the digest in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("digest", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns a validation error for an empty plaintext; hashing failures
    /// (resource exhaustion) surface as [`AppError::Hashing`].
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        let digest = Self::hash(plain_text)?;
        Ok(Self { digest })
    }

    /// Create a Password from an existing digest (from the store).
    pub fn from_digest(digest: String) -> Self {
        Self { digest }
    }

    /// Get the digest string for storage.
    pub fn as_str(&self) -> &str {
        &self.digest
    }

    /// Consume and return the digest string.
    pub fn into_string(self) -> String {
        self.digest
    }

    /// Verify a plain text password against this digest.
    ///
    /// A malformed digest never errors out of this method; it simply fails
    /// verification.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_digest(plain_text, &self.digest).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::Hashing(e.to_string()))?;
        Ok(digest.to_string())
    }

    fn verify_digest(plain_text: &str, digest: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| AppError::Hashing(format!("Invalid digest format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.digest
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest
    }
}

impl Eq for Password {}
