use async_trait::async_trait;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::RegisterCommand;
use crate::principal::errors::AuthError;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new principal and issue a session token for it.
    ///
    /// # Arguments
    /// * `command` - Validated command with identifier, display fields, and
    ///   plaintext credential
    ///
    /// # Returns
    /// Compact session token bound to the new principal
    ///
    /// # Errors
    /// * `DuplicateIdentifier` - Identifier is already registered
    /// * `Password` - Credential hashing failed
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<String, AuthError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `identifier` - Principal identifier
    /// * `password` - Plaintext credential to verify
    ///
    /// # Returns
    /// Compact session token bound to the principal
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or credential mismatch
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Store operation failed
    async fn authenticate(
        &self,
        identifier: &EmailAddress,
        password: &str,
    ) -> Result<String, AuthError>;

    /// Retrieve a principal by identifier.
    ///
    /// # Arguments
    /// * `identifier` - Principal identifier
    ///
    /// # Returns
    /// Principal entity
    ///
    /// # Errors
    /// * `PrincipalNotFound` - No principal with this identifier
    /// * `DatabaseError` - Store operation failed
    async fn principal_by_identifier(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Principal, AuthError>;
}

/// Credential store contract: persistence of principals, consumed by the
/// authentication core but implemented elsewhere.
#[async_trait]
pub trait PrincipalRepository: Send + Sync + 'static {
    /// Retrieve a principal by identifier.
    ///
    /// # Arguments
    /// * `identifier` - Principal identifier (email)
    ///
    /// # Returns
    /// Optional principal entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_identifier(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Option<Principal>, AuthError>;

    /// Persist a new principal.
    ///
    /// # Arguments
    /// * `principal` - Principal entity to store
    ///
    /// # Returns
    /// Stored principal entity
    ///
    /// # Errors
    /// * `DuplicateIdentifier` - Identifier is already registered
    /// * `DatabaseError` - Store operation failed
    async fn save(&self, principal: Principal) -> Result<Principal, AuthError>;
}
