//! Community Handlers
//!
//! Reads arrive on GET, mutations on POST, both discriminated by the
//! `action` query parameter. The terms-of-service agreement flag is part
//! of this vocabulary because the community board is gated on it.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::dto::request::CommunityQuery;
use crate::application::dto::response::MessageResponse;
use crate::application::services::{AccessValidator, CommunityService};
use crate::infrastructure::repositories::{PgQuestionRepository, PgUserRepository};
use crate::shared::actions;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn community_service(
    state: &AppState,
) -> CommunityService<PgUserRepository, PgQuestionRepository> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));

    CommunityService::new(
        AccessValidator::new(Arc::clone(&user_repo), state.settings.jwt.clone()),
        user_repo,
        Arc::new(PgQuestionRepository::new(state.db.clone())),
    )
}

fn require<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::MissingParameter(name.to_string()))
}

/// Action-discriminated community reads
pub async fn community_reads(
    State(state): State<AppState>,
    Query(query): Query<CommunityQuery>,
) -> Result<Response, AppError> {
    let service = community_service(&state);

    match query.action.as_str() {
        actions::GET_ALL_QUESTIONS => {
            let topic = require(query.topic, "topic")?;
            let questions = service
                .get_all_questions(&query.username, &query.jwt_token, &topic)
                .await?;
            Ok(Json(questions).into_response())
        }
        actions::GET_ALL_TOPIC_NAMES => {
            let topics = service
                .get_all_topic_names(&query.username, &query.jwt_token)
                .await?;
            Ok(Json(topics).into_response())
        }
        actions::GET_USER_AGREED_TO_TERMS_AND_CONDITIONS => {
            let agreed = service
                .get_agreed_to_terms(&query.username, &query.jwt_token)
                .await?;
            Ok(Json(agreed).into_response())
        }
        other => Err(AppError::MissingParameter(format!(
            "Unknown action '{}'",
            other
        ))),
    }
}

/// Action-discriminated community mutations
pub async fn community_mutations(
    State(state): State<AppState>,
    Query(query): Query<CommunityQuery>,
) -> Result<Response, AppError> {
    let service = community_service(&state);

    match query.action.as_str() {
        actions::ADD_QUESTION => {
            let topic = require(query.topic, "topic")?;
            let content = require(query.content, "content")?;
            let question = service
                .add_question(&query.username, &query.jwt_token, &topic, &content)
                .await?;
            Ok(Json(question).into_response())
        }
        actions::DELETE_QUESTION => {
            let question_id = require(query.question_id, "questionId")?;
            service
                .delete_question(&query.username, &query.jwt_token, question_id)
                .await?;
            Ok(Json(MessageResponse::new("Question deleted")).into_response())
        }
        actions::SOLVE_QUESTION => {
            let question_id = require(query.question_id, "questionId")?;
            service
                .solve_question(&query.username, &query.jwt_token, question_id)
                .await?;
            Ok(Json(MessageResponse::new("Question marked as solved")).into_response())
        }
        actions::ADD_NEW_ANSWER => {
            let question_id = require(query.question_id, "questionId")?;
            let content = require(query.content, "content")?;
            let answer = service
                .add_answer(&query.username, &query.jwt_token, question_id, &content)
                .await?;
            Ok(Json(answer).into_response())
        }
        actions::DELETE_ANSWER => {
            let answer_id = require(query.answer_id, "answerId")?;
            service
                .delete_answer(&query.username, &query.jwt_token, answer_id)
                .await?;
            Ok(Json(MessageResponse::new("Answer deleted")).into_response())
        }
        actions::INCREASE_VOTE_COUNT => {
            let answer_id = require(query.answer_id, "answerId")?;
            service
                .vote_on_answer(&query.username, &query.jwt_token, answer_id, 1)
                .await?;
            Ok(Json(MessageResponse::new("Vote recorded")).into_response())
        }
        actions::DECREASE_VOTE_COUNT => {
            let answer_id = require(query.answer_id, "answerId")?;
            service
                .vote_on_answer(&query.username, &query.jwt_token, answer_id, -1)
                .await?;
            Ok(Json(MessageResponse::new("Vote recorded")).into_response())
        }
        actions::SET_AGREE_TO_TERMS_AND_CONDITIONS => {
            let message = service
                .set_agreed_to_terms(&query.username, &query.jwt_token)
                .await?;
            Ok(Json(MessageResponse::new(message)).into_response())
        }
        other => Err(AppError::MissingParameter(format!(
            "Unknown action '{}'",
            other
        ))),
    }
}
