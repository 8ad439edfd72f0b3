//! Stripe Client
//!
//! Thin client over the Stripe charges API, behind a trait so the billing
//! service can be tested without network access.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::StripeSettings;
use crate::shared::error::AppError;

/// Billing contact attached to a charge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingDetails {
    pub email: Option<String>,
}

/// Card summary attached to a charge's payment method.
#[derive(Debug, Clone, Deserialize)]
pub struct CardDetails {
    pub brand: String,
    pub last4: String,
}

/// Payment method details attached to a charge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentMethodDetails {
    pub card: Option<CardDetails>,
}

/// A Stripe charge, limited to the fields reconciliation consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Charge {
    pub id: String,
    /// Amount in the currency's smallest unit (cents)
    pub amount: i64,
    pub currency: String,
    /// Unix timestamp in seconds
    pub created: i64,
    pub status: String,
    pub receipt_url: Option<String>,
    pub calculated_statement_descriptor: Option<String>,
    #[serde(default)]
    pub billing_details: BillingDetails,
    #[serde(default)]
    pub payment_method_details: Option<PaymentMethodDetails>,
}

#[derive(Debug, Deserialize)]
struct ChargeList {
    data: Vec<Charge>,
}

/// Gateway abstraction over the Stripe API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StripeGateway: Send + Sync {
    /// List charges visible to the account. Unpaginated: callers filter
    /// client-side by billing email.
    async fn list_charges(&self) -> Result<Vec<Charge>, AppError>;
}

/// HTTP implementation of the Stripe gateway.
pub struct HttpStripeGateway {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl HttpStripeGateway {
    pub fn new(settings: &StripeSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StripeGateway for HttpStripeGateway {
    async fn list_charges(&self) -> Result<Vec<Charge>, AppError> {
        let url = format!("{}/v1/charges", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[("limit", "100")])
            .send()
            .await
            .map_err(|e| AppError::Payment(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Payment(format!(
                "Stripe returned status {}",
                response.status()
            )));
        }

        let list: ChargeList = response
            .json()
            .await
            .map_err(|e| AppError::Payment(format!("Invalid charge list payload: {}", e)))?;

        Ok(list.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> HttpStripeGateway {
        HttpStripeGateway::new(&StripeSettings {
            api_key: "sk_test_123".to_string(),
            base_url: server.uri(),
        })
    }

    #[tokio::test]
    async fn test_list_charges_parses_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "object": "list",
                "data": [{
                    "id": "ch_1",
                    "amount": 2999,
                    "currency": "usd",
                    "created": 1_700_000_000,
                    "status": "succeeded",
                    "receipt_url": "https://stripe.test/receipt/ch_1",
                    "calculated_statement_descriptor": "FXIB",
                    "billing_details": { "email": "alice@example.com" },
                    "payment_method_details": { "card": { "brand": "visa", "last4": "4242" } }
                }],
                "has_more": false
            })))
            .mount(&server)
            .await;

        let charges = gateway_for(&server).list_charges().await.unwrap();

        assert_eq!(charges.len(), 1);
        assert_eq!(charges[0].amount, 2999);
        assert_eq!(charges[0].billing_details.email.as_deref(), Some("alice@example.com"));
        let card = charges[0]
            .payment_method_details
            .as_ref()
            .and_then(|d| d.card.as_ref())
            .unwrap();
        assert_eq!(card.brand, "visa");
        assert_eq!(card.last4, "4242");
    }

    #[tokio::test]
    async fn test_list_charges_maps_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = gateway_for(&server).list_charges().await;

        assert!(matches!(result, Err(AppError::Payment(_))));
    }
}
