use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way credential hasher.
///
/// Produces salted Argon2id hashes in PHC string format and verifies
/// plaintext candidates against stored hashes. Plaintext is never logged
/// or returned.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher configured with secure defaults
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext credential.
    ///
    /// A fresh random salt is generated for every call, so hashing the same
    /// plaintext twice yields different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext credential to hash
    ///
    /// # Returns
    /// PHC string format hash (algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext credential against a stored hash.
    ///
    /// A stored hash that cannot be parsed counts as a verification
    /// failure, not an error: login against a corrupt hash must read as
    /// invalid credentials rather than a server fault.
    ///
    /// # Arguments
    /// * `password` - Plaintext credential to verify
    /// * `hash` - Stored hash in PHC string format
    ///
    /// # Returns
    /// True if the credential matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(false),
        };

        let argon2 = Argon2::default();

        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
