//! Inquiry entity and repository trait.
//!
//! Maps to the `inquiries` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A support inquiry submitted by a user and forwarded to the support inbox.
///
/// Maps to the `inquiries` table:
/// - id: BIGINT PRIMARY KEY
/// - custom_id: VARCHAR(64) NOT NULL (uuid, used as the email subject)
/// - title: VARCHAR(50) NOT NULL
/// - content: VARCHAR(1500) NOT NULL
/// - date: VARCHAR(32) NOT NULL (formatted date string)
/// - user_id: BIGINT NOT NULL REFERENCES users(id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: i64,
    pub custom_id: String,
    pub title: String,
    pub content: String,
    pub date: String,
    pub user_id: i64,
}

/// Repository trait for Inquiry data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// Insert a new inquiry.
    async fn create(&self, inquiry: &Inquiry) -> Result<Inquiry, AppError>;

    /// Fetch all inquiries owned by the given user.
    async fn find_all_by_user_id(&self, user_id: i64) -> Result<Vec<Inquiry>, AppError>;
}
