use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Role;
use crate::domain::principal::ports::PrincipalRepository;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Request-scoped association between a validated principal and the
/// in-flight request.
///
/// Attached to the request extensions by the bearer interceptor and read
/// by the authorization layer. Lives only for the request that carried the
/// token; concurrent requests each get their own.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal {
    pub email: EmailAddress,
    pub role: Role,
}

impl AuthenticatedPrincipal {
    /// The single granted authority, derived from the role.
    pub fn authority(&self) -> &'static str {
        self.role.as_str()
    }
}

/// Bearer token interceptor.
///
/// Runs once per request, ahead of every route. Decides only whether an
/// [`AuthenticatedPrincipal`] gets attached to the request; it never
/// rejects. Every branch falls through to the next stage, and enforcement
/// is left to [`CurrentPrincipal`] on protected routes.
pub async fn authenticate<R: PrincipalRepository>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Response {
    // No header, or a scheme other than Bearer: nothing to evaluate
    let Some(token) = bearer_token(&req).map(str::to_string) else {
        return next.run(req).await;
    };

    let subject = match state.token_codec.extract_subject(&token) {
        Ok(subject) => subject,
        Err(e) => {
            tracing::debug!(error = %e, "Discarding unreadable bearer token");
            return next.run(req).await;
        }
    };

    // A context attached earlier in the chain wins; never process twice
    if req.extensions().get::<AuthenticatedPrincipal>().is_some() {
        return next.run(req).await;
    }

    let identifier = match EmailAddress::new(subject) {
        Ok(identifier) => identifier,
        Err(e) => {
            tracing::debug!(error = %e, "Token subject is not a principal identifier");
            return next.run(req).await;
        }
    };

    // Fail closed: a store error reads the same as an unknown subject
    let principal = match state.repository.find_by_identifier(&identifier).await {
        Ok(Some(principal)) => principal,
        Ok(None) => {
            tracing::debug!(subject = %identifier, "Token subject resolves to no principal");
            return next.run(req).await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Principal lookup failed during token validation");
            return next.run(req).await;
        }
    };

    match state.token_codec.is_valid(&token, principal.email.as_str()) {
        Ok(true) => {
            req.extensions_mut().insert(AuthenticatedPrincipal {
                email: principal.email,
                role: principal.role,
            });
        }
        Ok(false) => {
            tracing::debug!(subject = %identifier, "Bearer token is no longer valid");
        }
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token failed validation");
        }
    }

    next.run(req).await
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}

/// Authorization layer for protected routes.
///
/// Extracts the context the interceptor attached; a request that reached
/// the handler without one is rejected here with 401.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub AuthenticatedPrincipal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
