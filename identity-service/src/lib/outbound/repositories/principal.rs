use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::Role;
use crate::domain::principal::ports::PrincipalRepository;
use crate::principal::errors::AuthError;

pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn principal_from_row(row: &PgRow) -> Result<Principal, AuthError> {
        let email: String = row
            .try_get("email")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        let first_name: String = row
            .try_get("first_name")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        let last_name: String = row
            .try_get("last_name")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        let created_at = row
            .try_get("created_at")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(Principal {
            email: EmailAddress::new(email)?,
            first_name,
            last_name,
            password_hash,
            role: Role::from_string(&role)?,
            created_at,
        })
    }
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn find_by_identifier(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Option<Principal>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT email, first_name, last_name, password_hash, role, created_at
            FROM principals
            WHERE email = $1
            "#,
        )
        .bind(identifier.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(Self::principal_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, principal: Principal) -> Result<Principal, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO principals (email, first_name, last_name, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(principal.email.as_str())
        .bind(&principal.first_name)
        .bind(&principal.last_name)
        .bind(&principal.password_hash)
        .bind(principal.role.as_str())
        .bind(principal.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AuthError::DuplicateIdentifier(principal.email.to_string());
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(principal)
    }
}
