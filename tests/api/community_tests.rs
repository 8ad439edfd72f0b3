//! Community API Tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, TestApp};

/// Unknown read actions are rejected with the missing-parameter code
#[tokio::test]
async fn test_unknown_community_read_action_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .get("/community?action=browseEverything&username=alice&jwtToken=token")
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10006);
}

/// Unknown mutation actions are rejected with the missing-parameter code
#[tokio::test]
async fn test_unknown_community_mutation_action_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/community?action=breakThings&username=alice&jwtToken=token",
            &json!({}).to_string(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10006);
}

/// Posting a question requires the topic parameter
#[tokio::test]
async fn test_add_question_without_topic_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/community?action=addQuestion&content=hello&username=alice&jwtToken=token",
            &json!({}).to_string(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10006);
}

/// Voting requires the answer id parameter
#[tokio::test]
async fn test_vote_without_answer_id_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/community?action=increaseVoteCount&username=alice&jwtToken=token",
            &json!({}).to_string(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10006);
}

/// Listing questions rejects undecodable tokens before any query
#[tokio::test]
async fn test_questions_with_invalid_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .get("/community?action=getAllQuestions&topic=General&username=alice&jwtToken=garbage")
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
