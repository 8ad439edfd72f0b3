//! Account Service
//!
//! Operations a logged-in user performs against their own account: profile
//! reads and edits, logout, support submissions, and the billing view that
//! reconciles Stripe charges on access.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::access::AccessValidator;
use super::billing_service::BillingService;
use super::email_service::EmailService;
use crate::application::dto::{
    InquiryResponse, ReportResponse, TransactionResponse, UserDetailsResponse,
};
use crate::domain::{
    Inquiry, InquiryRepository, Report, ReportRepository, TransactionRepository, UserRepository,
};
use crate::infrastructure::email::MailTransport;
use crate::infrastructure::stripe::StripeGateway;
use crate::shared::error::AppError;
use crate::shared::responses;
use crate::shared::time::format_datetime;

const MAX_TITLE_LENGTH: usize = 50;
const MAX_CONTENT_LENGTH: usize = 1500;

/// Service for self-service account operations.
pub struct AccountService<U, I, R, T, M, S>
where
    U: UserRepository,
    I: InquiryRepository,
    R: ReportRepository,
    T: TransactionRepository,
    M: MailTransport,
    S: StripeGateway,
{
    access: AccessValidator<U>,
    user_repository: Arc<U>,
    inquiry_repository: Arc<I>,
    report_repository: Arc<R>,
    transaction_repository: Arc<T>,
    email_service: EmailService<U, M>,
    billing_service: BillingService<S, T>,
}

impl<U, I, R, T, M, S> AccountService<U, I, R, T, M, S>
where
    U: UserRepository,
    I: InquiryRepository,
    R: ReportRepository,
    T: TransactionRepository,
    M: MailTransport,
    S: StripeGateway,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        access: AccessValidator<U>,
        user_repository: Arc<U>,
        inquiry_repository: Arc<I>,
        report_repository: Arc<R>,
        transaction_repository: Arc<T>,
        email_service: EmailService<U, M>,
        billing_service: BillingService<S, T>,
    ) -> Self {
        Self {
            access,
            user_repository,
            inquiry_repository,
            report_repository,
            transaction_repository,
            email_service,
            billing_service,
        }
    }

    /// Full account view for the owning user.
    pub async fn get_user_details(
        &self,
        username: &str,
        token: &str,
    ) -> Result<UserDetailsResponse, AppError> {
        let user = self.access.validate_user_with_jwt(username, token).await?;
        Ok(UserDetailsResponse::from(&user))
    }

    /// Billing history for the owning user.
    ///
    /// Before reading, any Stripe charge without a local snapshot is
    /// persisted, acknowledged by email, and reflected in the account's
    /// subscription label.
    pub async fn get_all_user_transactions(
        &self,
        username: &str,
        token: &str,
    ) -> Result<Vec<TransactionResponse>, AppError> {
        let mut user = self.access.validate_user_with_jwt(username, token).await?;

        let unrecorded = self
            .billing_service
            .unrecorded_transactions_for_email(&user.email)
            .await?;

        for transaction in &unrecorded {
            let recorded = self.transaction_repository.create(transaction).await?;
            self.email_service
                .send_payment_email(&user.username, &user.email, &recorded)
                .await?;
        }

        if let Some(latest) = unrecorded.last() {
            if latest.duration != "None" {
                user.subscription = latest.duration.clone();
                self.user_repository.update(&user).await?;
            }
        }

        let transactions = self
            .transaction_repository
            .find_all_by_email(&user.email)
            .await?;

        Ok(transactions.iter().map(TransactionResponse::from).collect())
    }

    /// Replace the account biography.
    pub async fn update_biography(
        &self,
        username: &str,
        token: &str,
        biography: &str,
    ) -> Result<UserDetailsResponse, AppError> {
        let mut user = self.access.validate_user_with_jwt(username, token).await?;

        user.biography = biography.to_string();
        self.user_repository.update(&user).await?;

        Ok(UserDetailsResponse::from(&user))
    }

    /// Invalidate the outstanding two-factor code so a stale code cannot
    /// complete a login after the session ends.
    pub async fn logout(&self, username: &str, token: &str) -> Result<&'static str, AppError> {
        let mut user = self.access.validate_user_with_jwt(username, token).await?;

        user.two_factor_code = None;
        self.user_repository.update(&user).await?;

        tracing::info!(username = %user.username, "User logged out");

        Ok(responses::USER_LOGOUT_SUCCESSFULLY)
    }

    /// Persist a problem report and forward it to the support inbox.
    pub async fn save_report_and_send_email(
        &self,
        username: &str,
        token: &str,
        title: &str,
        content: &str,
        img_url: Option<String>,
    ) -> Result<ReportResponse, AppError> {
        validate_support_text(title, content)?;
        let user = self.access.validate_user_with_jwt(username, token).await?;

        let report = Report {
            id: 0,
            title: title.to_string(),
            content: content.to_string(),
            img_url,
            date: format_datetime(Utc::now()),
            user_id: user.id,
        };

        let saved = self.report_repository.create(&report).await?;
        self.email_service
            .send_report_email(&saved, &user.username)
            .await?;

        Ok(ReportResponse::from(&saved))
    }

    /// Persist a support inquiry and forward it to the support inbox.
    pub async fn save_inquiry_and_send_email(
        &self,
        username: &str,
        token: &str,
        title: &str,
        content: &str,
    ) -> Result<InquiryResponse, AppError> {
        validate_support_text(title, content)?;
        let user = self.access.validate_user_with_jwt(username, token).await?;

        let inquiry = Inquiry {
            id: 0,
            custom_id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            date: format_datetime(Utc::now()),
            user_id: user.id,
        };

        let saved = self.inquiry_repository.create(&inquiry).await?;
        self.email_service
            .send_inquiry_email(&saved, &user.email)
            .await?;

        Ok(InquiryResponse::from(&saved))
    }
}

fn validate_support_text(title: &str, content: &str) -> Result<(), AppError> {
    if title.is_empty() || title.len() > MAX_TITLE_LENGTH {
        return Err(AppError::Validation(format!(
            "Title must be 1-{} characters",
            MAX_TITLE_LENGTH
        )));
    }
    if content.is_empty() || content.len() > MAX_CONTENT_LENGTH {
        return Err(AppError::Validation(format!(
            "Content must be 1-{} characters",
            MAX_CONTENT_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::access::issue_token;
    use crate::config::{EmailSettings, JwtSettings};
    use crate::domain::{
        MockInquiryRepository, MockReportRepository, MockTransactionRepository,
        MockUserRepository, Transaction, User,
    };
    use crate::infrastructure::email::MockMailTransport;
    use crate::infrastructure::stripe::{
        BillingDetails, CardDetails, Charge, MockStripeGateway, PaymentMethodDetails,
    };

    type TestAccountService = AccountService<
        MockUserRepository,
        MockInquiryRepository,
        MockReportRepository,
        MockTransactionRepository,
        MockMailTransport,
        MockStripeGateway,
    >;

    fn jwt_settings() -> JwtSettings {
        JwtSettings {
            secret: "test-secret-key-that-is-long-enough!".to_string(),
            access_token_expiry_minutes: 60,
        }
    }

    fn test_user() -> User {
        User {
            id: 42,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            ..Default::default()
        }
    }

    fn token_for(user: &User) -> String {
        issue_token(user, &jwt_settings()).unwrap().0
    }

    struct Mocks {
        users: MockUserRepository,
        inquiries: MockInquiryRepository,
        reports: MockReportRepository,
        transactions: MockTransactionRepository,
        transport: MockMailTransport,
        stripe: MockStripeGateway,
    }

    impl Default for Mocks {
        fn default() -> Self {
            Self {
                users: MockUserRepository::new(),
                inquiries: MockInquiryRepository::new(),
                reports: MockReportRepository::new(),
                transactions: MockTransactionRepository::new(),
                transport: MockMailTransport::new(),
                stripe: MockStripeGateway::new(),
            }
        }
    }

    fn build_service(mocks: Mocks) -> TestAccountService {
        let users = Arc::new(mocks.users);
        let transactions = Arc::new(mocks.transactions);
        let transport = Arc::new(mocks.transport);

        let email_settings = EmailSettings {
            origin: "support@fxib.test".to_string(),
            frontend_base_url: "http://localhost:3000".to_string(),
        };

        AccountService::new(
            AccessValidator::new(Arc::clone(&users), jwt_settings()),
            Arc::clone(&users),
            Arc::new(mocks.inquiries),
            Arc::new(mocks.reports),
            Arc::clone(&transactions),
            EmailService::new(Arc::clone(&users), transport, email_settings),
            BillingService::new(Arc::new(mocks.stripe), transactions),
        )
    }

    #[tokio::test]
    async fn test_logout_clears_two_factor_code() {
        let mut user = test_user();
        user.two_factor_code = Some(123_456);
        let token = token_for(&user);

        let mut mocks = Mocks::default();
        mocks
            .users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        mocks
            .users
            .expect_update()
            .withf(|u: &User| u.two_factor_code.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let service = build_service(mocks);
        let message = service.logout("alice", &token).await.unwrap();

        assert_eq!(message, responses::USER_LOGOUT_SUCCESSFULLY);
    }

    #[tokio::test]
    async fn test_new_charge_is_recorded_emailed_and_reflected_in_subscription() {
        let user = test_user();
        let token = token_for(&user);

        let mut mocks = Mocks::default();
        mocks
            .users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        mocks
            .users
            .expect_update()
            .withf(|u: &User| u.subscription == "1 Month")
            .times(1)
            .returning(|_| Ok(()));

        mocks.stripe.expect_list_charges().returning(|| {
            Ok(vec![Charge {
                id: "ch_1".to_string(),
                amount: 2999,
                currency: "usd".to_string(),
                created: 1_709_280_000,
                status: "succeeded".to_string(),
                receipt_url: None,
                calculated_statement_descriptor: None,
                billing_details: BillingDetails {
                    email: Some("alice@example.com".to_string()),
                },
                payment_method_details: Some(PaymentMethodDetails {
                    card: Some(CardDetails {
                        brand: "visa".to_string(),
                        last4: "4242".to_string(),
                    }),
                }),
            }])
        });

        mocks
            .transactions
            .expect_exists_matching()
            .returning(|_| Ok(false));
        mocks
            .transactions
            .expect_create()
            .times(1)
            .returning(|t: &Transaction| Ok(t.clone()));
        mocks
            .transactions
            .expect_find_all_by_email()
            .returning(|_| Ok(vec![]));

        mocks.transport.expect_send().times(1).returning(|_| Ok(()));

        let service = build_service(mocks);
        service
            .get_all_user_transactions("alice", &token)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_oversized_report_title_is_rejected() {
        let user = test_user();
        let token = token_for(&user);

        let service = build_service(Mocks::default());
        let result = service
            .save_report_and_send_email("alice", &token, &"x".repeat(51), "content", None)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_inquiry_is_saved_before_it_is_emailed() {
        let user = test_user();
        let token = token_for(&user);

        let mut mocks = Mocks::default();
        mocks
            .users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        mocks
            .inquiries
            .expect_create()
            .withf(|inquiry: &Inquiry| !inquiry.custom_id.is_empty() && inquiry.user_id == 42)
            .times(1)
            .returning(|inquiry: &Inquiry| Ok(inquiry.clone()));
        mocks.transport.expect_send().times(1).returning(|_| Ok(()));

        let service = build_service(mocks);
        let response = service
            .save_inquiry_and_send_email("alice", &token, "Billing question", "How do refunds work?")
            .await
            .unwrap();

        assert_eq!(response.title, "Billing question");
    }
}
