//! Report entity and repository trait.
//!
//! Maps to the `reports` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A problem report submitted by a user, optionally carrying a screenshot URL.
///
/// Maps to the `reports` table:
/// - id: BIGINT PRIMARY KEY
/// - title: VARCHAR(50) NOT NULL
/// - content: VARCHAR(1500) NOT NULL
/// - img_url: TEXT NULL
/// - date: VARCHAR(32) NOT NULL (formatted date string)
/// - user_id: BIGINT NOT NULL REFERENCES users(id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub img_url: Option<String>,
    pub date: String,
    pub user_id: i64,
}

/// Repository trait for Report data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert a new report.
    async fn create(&self, report: &Report) -> Result<Report, AppError>;

    /// Fetch all reports owned by the given user.
    async fn find_all_by_user_id(&self, user_id: i64) -> Result<Vec<Report>, AppError>;
}
