use std::sync::Arc;

use auth::TokenCodec;
use identity_service::domain::principal::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryPrincipalRepository;
use serde_json::json;

pub const JWT_SECRET: &str = "dGVzdF9zaWduaW5nX2tleV8zMl9ieXRlc19taW5pbXVtISEh";
pub const TOKEN_TTL_MINUTES: i64 = 24;

/// Test application that spawns a real server
///
/// Backed by the in-memory credential store so the suite needs no
/// external services.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Codec sharing the server's secret, for crafting tokens the server
    /// did not issue (expired, unknown subject, ...)
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryPrincipalRepository::new());
        let token_codec = Arc::new(
            TokenCodec::from_base64_secret(JWT_SECRET, TOKEN_TTL_MINUTES)
                .expect("Failed to build token codec"),
        );
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&token_codec),
        ));

        let router = create_router(auth_service, repository, token_codec);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_codec: TokenCodec::from_base64_secret(JWT_SECRET, TOKEN_TTL_MINUTES)
                .expect("Failed to build token codec"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a principal and return the issued token
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/v1/auth/register")
            .json(&json!({
                "email": email,
                "first_name": "Test",
                "last_name": "Principal",
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute register request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Registration must return a token")
            .to_string()
    }
}
