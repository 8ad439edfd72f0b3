//! Report Repository Implementation
//!
//! PostgreSQL implementation of the ReportRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Report, ReportRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: i64,
    title: String,
    content: String,
    img_url: Option<String>,
    date: String,
    user_id: i64,
}

impl ReportRow {
    fn into_report(self) -> Report {
        Report {
            id: self.id,
            title: self.title,
            content: self.content,
            img_url: self.img_url,
            date: self.date,
            user_id: self.user_id,
        }
    }
}

/// PostgreSQL report repository implementation.
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn create(&self, report: &Report) -> Result<Report, AppError> {
        let row = sqlx::query_as::<_, ReportRow>(
            r#"
            INSERT INTO reports (title, content, img_url, date, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, content, img_url, date, user_id
            "#,
        )
        .bind(&report.title)
        .bind(&report.content)
        .bind(&report.img_url)
        .bind(&report.date)
        .bind(report.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_report())
    }

    async fn find_all_by_user_id(&self, user_id: i64) -> Result<Vec<Report>, AppError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT id, title, content, img_url, date, user_id
            FROM reports
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_report()).collect())
    }
}
