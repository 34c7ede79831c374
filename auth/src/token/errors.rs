use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Signing secret is not valid base64: {0}")]
    InvalidKey(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    TokenMalformed(String),

    #[error("Token signature is invalid")]
    TokenSignatureInvalid,

    #[error("Token is expired")]
    TokenExpired,
}

impl TokenError {
    /// Classify a decode failure from the underlying JWT library.
    pub(crate) fn from_decode_error(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::TokenSignatureInvalid,
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            _ => TokenError::TokenMalformed(err.to_string()),
        }
    }
}
