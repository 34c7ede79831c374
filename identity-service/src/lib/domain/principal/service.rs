use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenCodec;
use chrono::Utc;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::RegisterCommand;
use crate::domain::principal::models::Role;
use crate::principal::errors::AuthError;
use crate::principal::ports::AuthServicePort;
use crate::principal::ports::PrincipalRepository;

/// Authentication orchestrator.
///
/// Coordinates the credential hasher, the token codec, and the credential
/// store: registration hashes and stores a new principal and issues its
/// first token; login verifies a credential and issues a fresh token.
pub struct AuthService<PR>
where
    PR: PrincipalRepository,
{
    repository: Arc<PR>,
    token_codec: Arc<TokenCodec>,
    password_hasher: auth::PasswordHasher,
}

impl<PR> AuthService<PR>
where
    PR: PrincipalRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `token_codec` - Shared session token codec
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(repository: Arc<PR>, token_codec: Arc<TokenCodec>) -> Self {
        Self {
            repository,
            token_codec,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<PR> AuthServicePort for AuthService<PR>
where
    PR: PrincipalRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<String, AuthError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let principal = Principal {
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            password_hash,
            role: Role::User,
            created_at: Utc::now(),
        };

        // The store enforces identifier uniqueness; a duplicate surfaces
        // here and no token is issued.
        let principal = self.repository.save(principal).await?;

        let token = self
            .token_codec
            .issue(principal.email.as_str(), HashMap::new(), Utc::now())?;

        Ok(token)
    }

    async fn authenticate(
        &self,
        identifier: &EmailAddress,
        password: &str,
    ) -> Result<String, AuthError> {
        // Single verify-then-fetch: the principal that is verified is the
        // principal the token is issued for. Unknown identifier and
        // credential mismatch are indistinguishable to the caller.
        let principal = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = self
            .password_hasher
            .verify(password, &principal.password_hash)?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .token_codec
            .issue(principal.email.as_str(), HashMap::new(), Utc::now())?;

        Ok(token)
    }

    async fn principal_by_identifier(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Principal, AuthError> {
        self.repository
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::PrincipalNotFound(identifier.to_string()))
    }
}
