//! Community Service
//!
//! Topic-grouped questions and answers, answer voting, and the
//! terms-of-service agreement flag.

use std::sync::Arc;

use chrono::Utc;

use super::access::AccessValidator;
use crate::application::dto::{AnswerResponse, QuestionResponse};
use crate::domain::{Answer, Question, QuestionRepository, UserRepository};
use crate::shared::error::AppError;
use crate::shared::responses;
use crate::shared::time::format_datetime;

const MAX_POST_LENGTH: usize = 1500;

/// Service for the community Q&A board.
pub struct CommunityService<U: UserRepository, Q: QuestionRepository> {
    access: AccessValidator<U>,
    user_repository: Arc<U>,
    question_repository: Arc<Q>,
}

impl<U: UserRepository, Q: QuestionRepository> CommunityService<U, Q> {
    pub fn new(
        access: AccessValidator<U>,
        user_repository: Arc<U>,
        question_repository: Arc<Q>,
    ) -> Self {
        Self {
            access,
            user_repository,
            question_repository,
        }
    }

    /// All questions under a topic, each with its answers.
    pub async fn get_all_questions(
        &self,
        username: &str,
        token: &str,
        topic: &str,
    ) -> Result<Vec<QuestionResponse>, AppError> {
        self.access.validate_user_with_jwt(username, token).await?;

        let questions = self.question_repository.find_all_by_topic(topic).await?;

        let mut responses = Vec::with_capacity(questions.len());
        for question in &questions {
            let answers = self
                .question_repository
                .find_answers_by_question_id(question.id)
                .await?;
            responses.push(QuestionResponse::from_parts(question, &answers));
        }

        Ok(responses)
    }

    /// Names of every discussion topic.
    pub async fn get_all_topic_names(
        &self,
        username: &str,
        token: &str,
    ) -> Result<Vec<String>, AppError> {
        self.access.validate_user_with_jwt(username, token).await?;
        self.question_repository.all_topic_names().await
    }

    /// Post a new question under a topic.
    pub async fn add_question(
        &self,
        username: &str,
        token: &str,
        topic: &str,
        content: &str,
    ) -> Result<QuestionResponse, AppError> {
        validate_post_content(content)?;
        let user = self.access.validate_user_with_jwt(username, token).await?;

        let question = Question {
            id: 0,
            content: content.to_string(),
            topic_name: topic.to_string(),
            user_id: user.id,
            username: user.username.clone(),
            date: format_datetime(Utc::now()),
            solved: false,
        };

        let saved = self.question_repository.create_question(&question).await?;

        Ok(QuestionResponse::from_parts(&saved, &[]))
    }

    /// Delete a question. Allowed for the author and for administrators.
    pub async fn delete_question(
        &self,
        username: &str,
        token: &str,
        question_id: i64,
    ) -> Result<(), AppError> {
        let caller = self.access.validate_user_with_jwt(username, token).await?;

        let question = self
            .question_repository
            .find_question_by_id(question_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question {} not found", question_id)))?;

        if question.user_id != caller.id && !caller.is_admin() {
            return Err(AppError::Forbidden(
                "Only the author or an administrator can delete a question".to_string(),
            ));
        }

        self.question_repository.delete_question(question_id).await
    }

    /// Mark a question as solved. Only its author can do this.
    pub async fn solve_question(
        &self,
        username: &str,
        token: &str,
        question_id: i64,
    ) -> Result<(), AppError> {
        let caller = self.access.validate_user_with_jwt(username, token).await?;

        let question = self
            .question_repository
            .find_question_by_id(question_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question {} not found", question_id)))?;

        if question.user_id != caller.id {
            return Err(AppError::Forbidden(
                "Only the author can mark a question as solved".to_string(),
            ));
        }

        self.question_repository.mark_solved(question_id).await
    }

    /// Post an answer to an existing question.
    pub async fn add_answer(
        &self,
        username: &str,
        token: &str,
        question_id: i64,
        content: &str,
    ) -> Result<AnswerResponse, AppError> {
        validate_post_content(content)?;
        let user = self.access.validate_user_with_jwt(username, token).await?;

        self.question_repository
            .find_question_by_id(question_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question {} not found", question_id)))?;

        let answer = Answer {
            id: 0,
            question_id,
            content: content.to_string(),
            user_id: user.id,
            username: user.username.clone(),
            date: format_datetime(Utc::now()),
            vote_count: 0,
        };

        let saved = self.question_repository.create_answer(&answer).await?;

        Ok(AnswerResponse::from(&saved))
    }

    /// Delete an answer. Allowed for the author and for administrators.
    pub async fn delete_answer(
        &self,
        username: &str,
        token: &str,
        answer_id: i64,
    ) -> Result<(), AppError> {
        let caller = self.access.validate_user_with_jwt(username, token).await?;

        let answer = self
            .question_repository
            .find_answer_by_id(answer_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Answer {} not found", answer_id)))?;

        if answer.user_id != caller.id && !caller.is_admin() {
            return Err(AppError::Forbidden(
                "Only the author or an administrator can delete an answer".to_string(),
            ));
        }

        self.question_repository.delete_answer(answer_id).await
    }

    /// Adjust an answer's vote count by one in either direction.
    pub async fn vote_on_answer(
        &self,
        username: &str,
        token: &str,
        answer_id: i64,
        delta: i32,
    ) -> Result<(), AppError> {
        self.access.validate_user_with_jwt(username, token).await?;

        self.question_repository
            .find_answer_by_id(answer_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Answer {} not found", answer_id)))?;

        self.question_repository
            .adjust_vote_count(answer_id, delta)
            .await
    }

    /// Record the caller's agreement to the terms of service.
    pub async fn set_agreed_to_terms(
        &self,
        username: &str,
        token: &str,
    ) -> Result<&'static str, AppError> {
        let mut user = self.access.validate_user_with_jwt(username, token).await?;

        user.agreed_to_terms = true;
        self.user_repository.update(&user).await?;

        Ok(responses::AGREED_TO_TERMS_SUCCESSFULLY)
    }

    /// Whether the caller has agreed to the current terms of service.
    pub async fn get_agreed_to_terms(&self, username: &str, token: &str) -> Result<bool, AppError> {
        let user = self.access.validate_user_with_jwt(username, token).await?;
        Ok(user.agreed_to_terms)
    }
}

fn validate_post_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() || content.len() > MAX_POST_LENGTH {
        return Err(AppError::Validation(format!(
            "Content must be 1-{} characters",
            MAX_POST_LENGTH
        )));
    }
    Ok(())
}
