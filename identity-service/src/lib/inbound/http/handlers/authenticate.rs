use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::ports::AuthServicePort;
use crate::domain::principal::ports::PrincipalRepository;
use crate::inbound::http::router::AppState;

pub async fn authenticate<R: PrincipalRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    // An identifier that does not parse cannot belong to any principal;
    // fold it into the same rejection as a bad credential.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let token = state
        .auth_service
        .authenticate(&email, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData { token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}
