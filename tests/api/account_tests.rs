//! Account API Tests
//!
//! Covers action dispatch and token checks, which run before any query.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, TestApp};

/// Unknown actions are rejected with the missing-parameter code
#[tokio::test]
async fn test_unknown_account_action_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .get("/user?action=doSomethingElse&username=alice&jwtToken=token")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10006);
}

/// A request without the action parameter never reaches dispatch
#[tokio::test]
async fn test_missing_action_parameter_is_bad_request() {
    let app = TestApp::new().await;

    let response = app.get("/user?username=alice&jwtToken=token").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A garbage token is rejected before any account data is touched
#[tokio::test]
async fn test_account_details_with_invalid_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .get("/user?action=getAllUserDetails&username=alice&jwtToken=garbage")
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10003);
}

/// Unknown support actions are rejected on the POST route too
#[tokio::test]
async fn test_unknown_support_action_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/user?action=doSomething&title=t&content=c&username=alice&jwtToken=token",
            &json!({}).to_string(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10006);
}

/// Logout requires a decodable token
#[tokio::test]
async fn test_logout_with_invalid_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/user/logout?username=alice&jwtToken=garbage", "")
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
