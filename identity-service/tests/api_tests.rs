mod common;

use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_returns_token_usable_on_protected_route() {
    let app = TestApp::spawn().await;

    let token = app.register("a@x.com", "secret").await;
    assert!(!token.is_empty());

    let response = app
        .get_authenticated("/api/v1/demo-controller", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Hello World!");
    assert_eq!(body["data"]["authenticated_as"], "a@x.com");
    assert_eq!(body["data"]["authority"], "USER");
}

#[tokio::test]
async fn test_register_duplicate_identifier() {
    let app = TestApp::spawn().await;

    app.register("dup@x.com", "secret").await;

    // Same identifier again
    let response = app
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": "dup@x.com",
            "first_name": "Other",
            "last_name": "Person",
            "password": "different"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already registered"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": "not-an-email",
            "first_name": "Test",
            "last_name": "Principal",
            "password": "secret"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_authenticate_success() {
    let app = TestApp::spawn().await;

    app.register("a@x.com", "secret").await;

    let response = app
        .post("/api/v1/auth/authenticate")
        .json(&json!({
            "email": "a@x.com",
            "password": "secret"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().expect("Login must return a token");

    // The fresh token works on protected routes
    let response = app
        .get_authenticated("/api/v1/demo-controller", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_authenticate_wrong_password() {
    let app = TestApp::spawn().await;

    app.register("a@x.com", "secret").await;

    let response = app
        .post("/api/v1/auth/authenticate")
        .json(&json!({
            "email": "a@x.com",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["token"].is_null());
}

#[tokio::test]
async fn test_authenticate_unknown_identifier() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/authenticate")
        .json(&json!({
            "email": "ghost@x.com",
            "password": "secret"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/demo-controller")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_wrong_scheme() {
    let app = TestApp::spawn().await;

    app.register("a@x.com", "secret").await;

    // No token extraction is attempted for a non-Bearer scheme; the
    // request simply arrives unauthenticated.
    let response = app
        .get("/api/v1/demo-controller")
        .header(reqwest::header::AUTHORIZATION, "Basic abc")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_expired_token() {
    let app = TestApp::spawn().await;

    app.register("a@x.com", "secret").await;

    // Signature and subject are fine; only the expiry has passed
    let issued_at = Utc::now() - Duration::minutes(common::TOKEN_TTL_MINUTES + 1);
    let expired = app
        .token_codec
        .issue("a@x.com", HashMap::new(), issued_at)
        .expect("Failed to issue token");

    let response = app
        .get_authenticated("/api/v1/demo-controller", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_tampered_token() {
    let app = TestApp::spawn().await;

    let token = app.register("a@x.com", "secret").await;

    let (head, signature) = token.rsplit_once('.').expect("Token must have 3 segments");
    let mut chars: Vec<char> = signature.chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{}.{}", head, chars.into_iter().collect::<String>());

    let response = app
        .get_authenticated("/api/v1/demo-controller", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_token_for_unknown_subject() {
    let app = TestApp::spawn().await;

    // Well-signed token whose subject was never registered
    let token = app
        .token_codec
        .issue("ghost@x.com", HashMap::new(), Utc::now())
        .expect("Failed to issue token");

    let response = app
        .get_authenticated("/api/v1/demo-controller", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_profile() {
    let app = TestApp::spawn().await;

    let token = app.register("a@x.com", "secret").await;

    let response = app
        .get_authenticated("/api/v1/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "a@x.com");
    assert_eq!(body["data"]["first_name"], "Test");
    assert_eq!(body["data"]["last_name"], "Principal");
    assert_eq!(body["data"]["role"], "USER");
    assert!(body["data"]["created_at"].is_string());
}
