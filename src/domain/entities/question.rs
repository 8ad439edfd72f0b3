//! Community Q&A entities and repository trait.
//!
//! Maps to the `topics`, `questions`, and `answers` tables.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A question posted under a topic.
///
/// `username` is denormalized from the owning user at query time so the DTO
/// layer does not need a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub content: String,
    pub topic_name: String,
    pub user_id: i64,
    pub username: String,
    pub date: String,
    pub solved: bool,
}

/// An answer to a question, carrying a community vote count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub content: String,
    pub user_id: i64,
    pub username: String,
    pub date: String,
    pub vote_count: i32,
}

/// Repository trait for community Q&A data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Fetch all questions under a topic, newest first.
    async fn find_all_by_topic(&self, topic_name: &str) -> Result<Vec<Question>, AppError>;

    /// Find a single question by ID.
    async fn find_question_by_id(&self, id: i64) -> Result<Option<Question>, AppError>;

    /// Insert a new question.
    async fn create_question(&self, question: &Question) -> Result<Question, AppError>;

    /// Delete a question (cascades to its answers).
    async fn delete_question(&self, id: i64) -> Result<(), AppError>;

    /// Mark a question as solved.
    async fn mark_solved(&self, id: i64) -> Result<(), AppError>;

    /// Fetch all answers belonging to a question, highest-voted first.
    async fn find_answers_by_question_id(&self, question_id: i64) -> Result<Vec<Answer>, AppError>;

    /// Find a single answer by ID.
    async fn find_answer_by_id(&self, id: i64) -> Result<Option<Answer>, AppError>;

    /// Insert a new answer.
    async fn create_answer(&self, answer: &Answer) -> Result<Answer, AppError>;

    /// Delete an answer.
    async fn delete_answer(&self, id: i64) -> Result<(), AppError>;

    /// Adjust an answer's vote count by the given delta.
    async fn adjust_vote_count(&self, answer_id: i64, delta: i32) -> Result<(), AppError>;

    /// List every topic name.
    async fn all_topic_names(&self) -> Result<Vec<String>, AppError>;
}
