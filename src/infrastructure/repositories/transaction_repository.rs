//! Transaction Repository Implementation
//!
//! PostgreSQL implementation of the TransactionRepository trait. The
//! `exists_matching` check backs the six-field dedup performed during
//! Stripe charge reconciliation.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Transaction, TransactionRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    user_email: String,
    billing_date: String,
    duration: String,
    end_of_billing_date: String,
    amount: String,
    card: String,
    status: String,
    receipt: Option<String>,
    description: Option<String>,
}

impl TransactionRow {
    fn into_transaction(self) -> Transaction {
        Transaction {
            id: self.id,
            user_email: self.user_email,
            billing_date: self.billing_date,
            duration: self.duration,
            end_of_billing_date: self.end_of_billing_date,
            amount: self.amount,
            card: self.card,
            status: self.status,
            receipt: self.receipt,
            description: self.description,
        }
    }
}

/// PostgreSQL transaction repository implementation.
#[derive(Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn create(&self, transaction: &Transaction) -> Result<Transaction, AppError> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (user_email, billing_date, duration, end_of_billing_date,
                                      amount, card, status, receipt, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_email, billing_date, duration, end_of_billing_date,
                      amount, card, status, receipt, description
            "#,
        )
        .bind(&transaction.user_email)
        .bind(&transaction.billing_date)
        .bind(&transaction.duration)
        .bind(&transaction.end_of_billing_date)
        .bind(&transaction.amount)
        .bind(&transaction.card)
        .bind(&transaction.status)
        .bind(&transaction.receipt)
        .bind(&transaction.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Transaction already recorded".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_transaction())
    }

    async fn find_all_by_email(&self, email: &str) -> Result<Vec<Transaction>, AppError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, user_email, billing_date, duration, end_of_billing_date,
                   amount, card, status, receipt, description
            FROM transactions
            WHERE user_email = $1
            ORDER BY id
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_transaction()).collect())
    }

    async fn exists_matching(&self, transaction: &Transaction) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM transactions
                WHERE amount = $1
                  AND billing_date = $2
                  AND card = $3
                  AND duration = $4
                  AND end_of_billing_date = $5
                  AND user_email = $6
            )
            "#,
        )
        .bind(&transaction.amount)
        .bind(&transaction.billing_date)
        .bind(&transaction.card)
        .bind(&transaction.duration)
        .bind(&transaction.end_of_billing_date)
        .bind(&transaction.user_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
