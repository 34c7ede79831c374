use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Principal;
use crate::domain::principal::ports::PrincipalRepository;
use crate::principal::errors::AuthError;

/// In-memory credential store keyed by principal identifier.
///
/// Backs the integration test harness and local runs that have no
/// database. Uniqueness of the identifier is enforced on insert, the same
/// contract the relational store gets from its unique key.
pub struct InMemoryPrincipalRepository {
    principals: RwLock<HashMap<String, Principal>>,
}

impl InMemoryPrincipalRepository {
    pub fn new() -> Self {
        Self {
            principals: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPrincipalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn find_by_identifier(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Option<Principal>, AuthError> {
        let principals = self.principals.read().await;
        Ok(principals.get(identifier.as_str()).cloned())
    }

    async fn save(&self, principal: Principal) -> Result<Principal, AuthError> {
        let mut principals = self.principals.write().await;

        if principals.contains_key(principal.email.as_str()) {
            return Err(AuthError::DuplicateIdentifier(principal.email.to_string()));
        }

        principals.insert(principal.email.as_str().to_string(), principal.clone());
        Ok(principal)
    }
}
