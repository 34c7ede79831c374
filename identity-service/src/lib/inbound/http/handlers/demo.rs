use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentPrincipal;

/// Protected greeting endpoint.
///
/// Does nothing beyond proving that a request made it past the
/// authorization layer with an attached principal.
pub async fn demo(
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<ApiSuccess<DemoResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        DemoResponseData {
            message: "Hello World!".to_string(),
            authenticated_as: principal.email.to_string(),
            authority: principal.authority().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoResponseData {
    pub message: String,
    pub authenticated_as: String,
    pub authority: String,
}
