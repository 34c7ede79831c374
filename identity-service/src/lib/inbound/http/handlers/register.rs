use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::RegisterCommand;
use crate::domain::principal::ports::AuthServicePort;
use crate::domain::principal::ports::PrincipalRepository;
use crate::inbound::http::router::AppState;
use crate::principal::errors::EmailError;

pub async fn register<R: PrincipalRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    first_name: String,
    last_name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterCommand::new(
            email,
            self.first_name,
            self.last_name,
            self.password,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
