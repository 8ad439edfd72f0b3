//! Authentication API Tests
//!
//! Exercises request validation, which rejects before any repository call.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, TestApp};

/// Registration fails with an invalid email
#[tokio::test]
async fn test_register_with_invalid_email_fails() {
    let app = TestApp::new().await;
    let body = json!({
        "username": "testuser",
        "email": "not-an-email",
        "password": "ValidPassword123!"
    });

    let response = app.post_json("/auth/register", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10007);
}

/// Registration fails with a short password
#[tokio::test]
async fn test_register_with_short_password_fails() {
    let app = TestApp::new().await;
    let body = json!({
        "username": "testuser",
        "email": "test@example.com",
        "password": "short"
    });

    let response = app.post_json("/auth/register", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Login fails with a too-short username before hitting storage
#[tokio::test]
async fn test_login_with_invalid_username_fails() {
    let app = TestApp::new().await;
    let body = json!({
        "username": "x",
        "password": "ValidPassword123!"
    });

    let response = app.post_json("/auth/login", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Password reset request validates the email format
#[tokio::test]
async fn test_reset_password_email_requires_valid_address() {
    let app = TestApp::new().await;
    let body = json!({ "email": "nope" });

    let response = app
        .post_json("/auth/reset-password-email", &body.to_string())
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Password update validates the replacement password
#[tokio::test]
async fn test_reset_password_update_requires_long_password() {
    let app = TestApp::new().await;
    let body = json!({
        "token": "some-raw-token",
        "new_password": "short"
    });

    let response = app
        .post_json("/auth/reset-password-update", &body.to_string())
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Malformed JSON bodies are rejected by the extractor
#[tokio::test]
async fn test_register_with_malformed_body_fails() {
    let app = TestApp::new().await;

    let response = app.post_json("/auth/register", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
