//! Billing Service
//!
//! Reconciles Stripe charges into local transaction snapshots. Charges are
//! pulled unfiltered from the API, matched to the caller's billing email,
//! and deduplicated against already-recorded snapshots by exact field
//! comparison.

use std::sync::Arc;

use chrono::Months;

use crate::domain::{Transaction, TransactionRepository};
use crate::infrastructure::stripe::{Charge, StripeGateway};
use crate::shared::error::AppError;
use crate::shared::time::{format_datetime, timestamp_to_datetime};

/// Charge amount (in cents) for the one-month plan.
const ONE_MONTH_PRICE: i64 = 2999;
/// Charge amount (in cents) for the three-month plan.
const THREE_MONTH_PRICE: i64 = 7999;
/// Charge amount (in cents) for the twelve-month plan.
const TWELVE_MONTH_PRICE: i64 = 28799;

/// Map a charge amount to its subscription duration label.
pub fn transform_to_duration(amount: i64) -> &'static str {
    match amount {
        ONE_MONTH_PRICE => "1 Month",
        THREE_MONTH_PRICE => "3 Months",
        TWELVE_MONTH_PRICE => "12 Months",
        _ => "None",
    }
}

fn duration_months(duration: &str) -> u32 {
    match duration {
        "1 Month" => 1,
        "3 Months" => 3,
        "12 Months" => 12,
        _ => 0,
    }
}

/// Service pulling charges from Stripe and filtering them down to the ones
/// not yet recorded locally.
pub struct BillingService<S: StripeGateway, T: TransactionRepository> {
    stripe_gateway: Arc<S>,
    transaction_repository: Arc<T>,
}

impl<S: StripeGateway, T: TransactionRepository> BillingService<S, T> {
    pub fn new(stripe_gateway: Arc<S>, transaction_repository: Arc<T>) -> Self {
        Self {
            stripe_gateway,
            transaction_repository,
        }
    }

    /// Fetch charges billed to `email` that have no local snapshot yet.
    ///
    /// Fails with `NotFound` when the Stripe account has no charges at all.
    pub async fn unrecorded_transactions_for_email(
        &self,
        email: &str,
    ) -> Result<Vec<Transaction>, AppError> {
        let charges = self.stripe_gateway.list_charges().await?;

        if charges.is_empty() {
            return Err(AppError::NotFound(
                "No charges found in the billing account".to_string(),
            ));
        }

        let mut unrecorded = Vec::new();
        for charge in charges
            .iter()
            .filter(|c| c.billing_details.email.as_deref() == Some(email))
        {
            let transaction = charge_to_transaction(charge, email);
            if !self
                .transaction_repository
                .exists_matching(&transaction)
                .await?
            {
                unrecorded.push(transaction);
            }
        }

        Ok(unrecorded)
    }
}

/// Flatten a Stripe charge into the stored snapshot form.
fn charge_to_transaction(charge: &Charge, email: &str) -> Transaction {
    let billing = timestamp_to_datetime(charge.created);
    let duration = transform_to_duration(charge.amount);
    let end_of_billing = billing
        .checked_add_months(Months::new(duration_months(duration)))
        .unwrap_or(billing);

    let card = charge
        .payment_method_details
        .as_ref()
        .and_then(|details| details.card.as_ref())
        .map(|card| format!("{} {}", card.brand, card.last4))
        .unwrap_or_else(|| "unknown".to_string());

    Transaction {
        id: 0,
        user_email: email.to_string(),
        billing_date: format_datetime(billing),
        duration: duration.to_string(),
        end_of_billing_date: format_datetime(end_of_billing),
        amount: format!("{} {}", charge.amount / 100, charge.currency.to_uppercase()),
        card,
        status: charge.status.clone(),
        receipt: charge.receipt_url.clone(),
        description: charge.calculated_statement_descriptor.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockTransactionRepository;
    use crate::infrastructure::stripe::{BillingDetails, CardDetails, MockStripeGateway, PaymentMethodDetails};
    use test_case::test_case;

    fn test_charge(amount: i64, email: &str) -> Charge {
        Charge {
            id: "ch_1".to_string(),
            amount,
            currency: "usd".to_string(),
            created: 1_709_280_000, // 2024-03-01 08:00:00 UTC
            status: "succeeded".to_string(),
            receipt_url: Some("https://stripe.test/receipt".to_string()),
            calculated_statement_descriptor: Some("FXIB".to_string()),
            billing_details: BillingDetails {
                email: Some(email.to_string()),
            },
            payment_method_details: Some(PaymentMethodDetails {
                card: Some(CardDetails {
                    brand: "visa".to_string(),
                    last4: "4242".to_string(),
                }),
            }),
        }
    }

    #[test_case(2999, "1 Month")]
    #[test_case(7999, "3 Months")]
    #[test_case(28799, "12 Months")]
    #[test_case(500, "None")]
    fn test_transform_to_duration(amount: i64, expected: &str) {
        assert_eq!(transform_to_duration(amount), expected);
    }

    #[test]
    fn test_charge_to_transaction_formats_fields() {
        let transaction = charge_to_transaction(&test_charge(2999, "alice@example.com"), "alice@example.com");

        assert_eq!(transaction.billing_date, "2024-03-01 08:00:00");
        assert_eq!(transaction.end_of_billing_date, "2024-04-01 08:00:00");
        assert_eq!(transaction.amount, "29 USD");
        assert_eq!(transaction.card, "visa 4242");
        assert_eq!(transaction.duration, "1 Month");
    }

    #[test]
    fn test_unplanned_amount_keeps_billing_date_as_end_date() {
        let transaction = charge_to_transaction(&test_charge(500, "alice@example.com"), "alice@example.com");

        assert_eq!(transaction.duration, "None");
        assert_eq!(transaction.end_of_billing_date, transaction.billing_date);
    }

    #[tokio::test]
    async fn test_empty_charge_list_is_not_found() {
        let mut stripe = MockStripeGateway::new();
        stripe.expect_list_charges().returning(|| Ok(Vec::new()));

        let service = BillingService::new(Arc::new(stripe), Arc::new(MockTransactionRepository::new()));
        let result = service
            .unrecorded_transactions_for_email("alice@example.com")
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_recorded_and_foreign_charges_are_filtered_out() {
        let mut stripe = MockStripeGateway::new();
        stripe.expect_list_charges().returning(|| {
            Ok(vec![
                test_charge(2999, "alice@example.com"),
                test_charge(7999, "alice@example.com"),
                test_charge(2999, "bob@example.com"),
            ])
        });

        // The 1-month charge is already recorded, the 3-month one is not.
        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_exists_matching()
            .returning(|t: &Transaction| Ok(t.duration == "1 Month"));

        let service = BillingService::new(Arc::new(stripe), Arc::new(transactions));
        let unrecorded = service
            .unrecorded_transactions_for_email("alice@example.com")
            .await
            .unwrap();

        assert_eq!(unrecorded.len(), 1);
        assert_eq!(unrecorded[0].duration, "3 Months");
        assert_eq!(unrecorded[0].user_email, "alice@example.com");
    }
}
