//! Inquiry Repository Implementation
//!
//! PostgreSQL implementation of the InquiryRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Inquiry, InquiryRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct InquiryRow {
    id: i64,
    custom_id: String,
    title: String,
    content: String,
    date: String,
    user_id: i64,
}

impl InquiryRow {
    fn into_inquiry(self) -> Inquiry {
        Inquiry {
            id: self.id,
            custom_id: self.custom_id,
            title: self.title,
            content: self.content,
            date: self.date,
            user_id: self.user_id,
        }
    }
}

/// PostgreSQL inquiry repository implementation.
#[derive(Clone)]
pub struct PgInquiryRepository {
    pool: PgPool,
}

impl PgInquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InquiryRepository for PgInquiryRepository {
    async fn create(&self, inquiry: &Inquiry) -> Result<Inquiry, AppError> {
        let row = sqlx::query_as::<_, InquiryRow>(
            r#"
            INSERT INTO inquiries (custom_id, title, content, date, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, custom_id, title, content, date, user_id
            "#,
        )
        .bind(&inquiry.custom_id)
        .bind(&inquiry.title)
        .bind(&inquiry.content)
        .bind(&inquiry.date)
        .bind(inquiry.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_inquiry())
    }

    async fn find_all_by_user_id(&self, user_id: i64) -> Result<Vec<Inquiry>, AppError> {
        let rows = sqlx::query_as::<_, InquiryRow>(
            r#"
            SELECT id, custom_id, title, content, date, user_id
            FROM inquiries
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_inquiry()).collect())
    }
}
