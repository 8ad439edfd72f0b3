//! Question Repository Implementation
//!
//! PostgreSQL implementation of the QuestionRepository trait covering
//! topics, questions, and answers. Usernames are joined in so the DTO
//! layer does not need a second lookup.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Answer, Question, QuestionRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    content: String,
    topic_name: String,
    user_id: i64,
    username: String,
    date: String,
    solved: bool,
}

impl QuestionRow {
    fn into_question(self) -> Question {
        Question {
            id: self.id,
            content: self.content,
            topic_name: self.topic_name,
            user_id: self.user_id,
            username: self.username,
            date: self.date,
            solved: self.solved,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AnswerRow {
    id: i64,
    question_id: i64,
    content: String,
    user_id: i64,
    username: String,
    date: String,
    vote_count: i32,
}

impl AnswerRow {
    fn into_answer(self) -> Answer {
        Answer {
            id: self.id,
            question_id: self.question_id,
            content: self.content,
            user_id: self.user_id,
            username: self.username,
            date: self.date,
            vote_count: self.vote_count,
        }
    }
}

/// PostgreSQL community Q&A repository implementation.
#[derive(Clone)]
pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    async fn find_all_by_topic(&self, topic_name: &str) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT q.id, q.content, q.topic_name, q.user_id, u.username, q.date, q.solved
            FROM questions q
            JOIN users u ON u.id = q.user_id
            WHERE q.topic_name = $1
            ORDER BY q.id DESC
            "#,
        )
        .bind(topic_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_question()).collect())
    }

    async fn find_question_by_id(&self, id: i64) -> Result<Option<Question>, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT q.id, q.content, q.topic_name, q.user_id, u.username, q.date, q.solved
            FROM questions q
            JOIN users u ON u.id = q.user_id
            WHERE q.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_question()))
    }

    async fn create_question(&self, question: &Question) -> Result<Question, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            WITH inserted AS (
                INSERT INTO questions (content, topic_name, user_id, date, solved)
                VALUES ($1, $2, $3, $4, FALSE)
                RETURNING id, content, topic_name, user_id, date, solved
            )
            SELECT i.id, i.content, i.topic_name, i.user_id, u.username, i.date, i.solved
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(&question.content)
        .bind(&question.topic_name)
        .bind(question.user_id)
        .bind(&question.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_question())
    }

    async fn delete_question(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Question not found".to_string()));
        }

        Ok(())
    }

    async fn mark_solved(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE questions SET solved = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Question not found".to_string()));
        }

        Ok(())
    }

    async fn find_answers_by_question_id(&self, question_id: i64) -> Result<Vec<Answer>, AppError> {
        let rows = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT a.id, a.question_id, a.content, a.user_id, u.username, a.date, a.vote_count
            FROM answers a
            JOIN users u ON u.id = a.user_id
            WHERE a.question_id = $1
            ORDER BY a.vote_count DESC, a.id
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_answer()).collect())
    }

    async fn find_answer_by_id(&self, id: i64) -> Result<Option<Answer>, AppError> {
        let row = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT a.id, a.question_id, a.content, a.user_id, u.username, a.date, a.vote_count
            FROM answers a
            JOIN users u ON u.id = a.user_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_answer()))
    }

    async fn create_answer(&self, answer: &Answer) -> Result<Answer, AppError> {
        let row = sqlx::query_as::<_, AnswerRow>(
            r#"
            WITH inserted AS (
                INSERT INTO answers (question_id, content, user_id, date, vote_count)
                VALUES ($1, $2, $3, $4, 0)
                RETURNING id, question_id, content, user_id, date, vote_count
            )
            SELECT i.id, i.question_id, i.content, i.user_id, u.username, i.date, i.vote_count
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(answer.question_id)
        .bind(&answer.content)
        .bind(answer.user_id)
        .bind(&answer.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_answer())
    }

    async fn delete_answer(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Answer not found".to_string()));
        }

        Ok(())
    }

    async fn adjust_vote_count(&self, answer_id: i64, delta: i32) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE answers SET vote_count = vote_count + $2 WHERE id = $1")
            .bind(answer_id)
            .bind(delta)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Answer not found".to_string()));
        }

        Ok(())
    }

    async fn all_topic_names(&self) -> Result<Vec<String>, AppError> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM topics ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(names)
    }
}
