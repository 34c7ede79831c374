//! Authentication infrastructure library
//!
//! Provides the building blocks of credential-based authentication:
//! - Password hashing (Argon2id)
//! - Session token issuance and validation (JWT, HS256)
//!
//! The service layer owns principal lookup and orchestration; this crate is
//! deliberately storage-agnostic so it can be reused across services.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use std::collections::HashMap;
//!
//! use auth::TokenCodec;
//! use chrono::Utc;
//!
//! let codec = TokenCodec::from_base64_secret(
//!     "c2VjcmV0X2tleV9hdF9sZWFzdF8zMl9ieXRlc19sb25nISEh",
//!     24,
//! )
//! .unwrap();
//! let token = codec
//!     .issue("alice@example.com", HashMap::new(), Utc::now())
//!     .unwrap();
//! assert_eq!(codec.extract_subject(&token).unwrap(), "alice@example.com");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
