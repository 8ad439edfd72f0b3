//! Admin API Tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, TestApp};

/// Unknown admin actions are rejected with the missing-parameter code
#[tokio::test]
async fn test_unknown_admin_action_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .get("/admin?action=dropAllTables&username=root&jwtToken=token")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10006);
}

/// Inquiry listing requires the target username parameter
#[tokio::test]
async fn test_inquiries_without_target_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .get("/admin?action=getAllInquiriesForUser&username=root&jwtToken=token")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10006);
}

/// The ban toggle rejects undecodable tokens before any lookup
#[tokio::test]
async fn test_ban_with_invalid_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .put_json(
            "/admin?banUsername=alice&loggedUsername=root&jwtToken=garbage",
            &json!([{ "id": 3, "name": "BANNED" }]).to_string(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
