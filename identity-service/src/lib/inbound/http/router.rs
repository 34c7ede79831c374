use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::demo::demo;
use super::handlers::me::me;
use super::handlers::register::register;
use super::middleware::authenticate as bearer_interceptor;
use crate::domain::principal::ports::PrincipalRepository;
use crate::domain::principal::service::AuthService;

/// Shared application state.
///
/// Generic over the credential store so the same router serves the
/// Postgres-backed binary and in-memory test instances.
pub struct AppState<R: PrincipalRepository> {
    pub auth_service: Arc<AuthService<R>>,
    pub repository: Arc<R>,
    pub token_codec: Arc<TokenCodec>,
}

impl<R: PrincipalRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            repository: Arc::clone(&self.repository),
            token_codec: Arc::clone(&self.token_codec),
        }
    }
}

pub fn create_router<R: PrincipalRepository>(
    auth_service: Arc<AuthService<R>>,
    repository: Arc<R>,
    token_codec: Arc<TokenCodec>,
) -> Router {
    let state = AppState {
        auth_service,
        repository,
        token_codec,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/register", post(register::<R>))
        .route("/api/v1/auth/authenticate", post(authenticate::<R>));

    let protected_routes = Router::new()
        .route("/api/v1/demo-controller", get(demo))
        .route("/api/v1/me", get(me::<R>));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // The interceptor is layered over the merged router, so it evaluates
    // every inbound request exactly once; public routes simply never read
    // the context it may attach.
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            bearer_interceptor::<R>,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
