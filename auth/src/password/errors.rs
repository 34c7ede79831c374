use thiserror::Error;

/// Error type for password operations.
///
/// Verification mismatches and unparseable stored hashes are reported as
/// `Ok(false)` by the hasher, not as errors.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
