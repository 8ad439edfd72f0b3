//! Transaction entity and repository trait.
//!
//! Maps to the `transactions` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A denormalized snapshot of a Stripe charge.
///
/// All monetary and date fields are stored pre-formatted because the dedup
/// check during reconciliation compares the formatted strings exactly.
///
/// Maps to the `transactions` table:
/// - id: BIGINT PRIMARY KEY
/// - user_email: VARCHAR(255) NOT NULL
/// - billing_date: VARCHAR(32) NOT NULL
/// - duration: VARCHAR(20) NOT NULL ("1 Month", "3 Months", ...)
/// - end_of_billing_date: VARCHAR(32) NOT NULL
/// - amount: VARCHAR(32) NOT NULL ("29 USD")
/// - card: VARCHAR(32) NOT NULL ("visa 4242")
/// - status: VARCHAR(20) NOT NULL
/// - receipt: TEXT NULL
/// - description: TEXT NULL
///
/// Uniqueness is enforced across (amount, billing_date, card, duration,
/// end_of_billing_date, user_email).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_email: String,
    pub billing_date: String,
    pub duration: String,
    pub end_of_billing_date: String,
    pub amount: String,
    pub card: String,
    pub status: String,
    pub receipt: Option<String>,
    pub description: Option<String>,
}

/// Repository trait for Transaction data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Insert a new transaction snapshot.
    async fn create(&self, transaction: &Transaction) -> Result<Transaction, AppError>;

    /// Fetch all transactions recorded for the given billing email.
    async fn find_all_by_email(&self, email: &str) -> Result<Vec<Transaction>, AppError>;

    /// Exact-match existence check over the six dedup fields.
    async fn exists_matching(&self, transaction: &Transaction) -> Result<bool, AppError>;
}
