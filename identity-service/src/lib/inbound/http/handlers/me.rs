use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::principal::models::Principal;
use crate::domain::principal::ports::AuthServicePort;
use crate::domain::principal::ports::PrincipalRepository;
use crate::inbound::http::middleware::CurrentPrincipal;
use crate::inbound::http::router::AppState;

/// Profile of the authenticated caller.
///
/// The subject of a valid token can stop resolving to a stored principal
/// between requests; that surfaces here as a not-found rather than a stale
/// profile.
pub async fn me<R: PrincipalRepository>(
    State(state): State<AppState<R>>,
    CurrentPrincipal(current): CurrentPrincipal,
) -> Result<ApiSuccess<PrincipalResponseData>, ApiError> {
    state
        .auth_service
        .principal_by_identifier(&current.email)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::OK, principal.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalResponseData {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for PrincipalResponseData {
    fn from(principal: &Principal) -> Self {
        Self {
            email: principal.email.to_string(),
            first_name: principal.first_name.clone(),
            last_name: principal.last_name.clone(),
            role: principal.role.to_string(),
            created_at: principal.created_at,
        }
    }
}
