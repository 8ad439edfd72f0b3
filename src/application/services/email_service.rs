//! Email Service
//!
//! Renders notification templates and delivers them through the mail
//! transport. Token and code generation for the reset/two-factor flows
//! lives here because both end in an email.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::EmailSettings;
use crate::domain::{Inquiry, Report, Transaction, User, UserLocation, UserRepository};
use crate::infrastructure::email::templates;
use crate::infrastructure::email::{MailTransport, OutgoingEmail};
use crate::shared::error::AppError;
use crate::shared::responses;
use crate::shared::time::format_datetime;

/// Service coordinating outgoing notification mail.
pub struct EmailService<U: UserRepository, M: MailTransport> {
    user_repository: Arc<U>,
    transport: Arc<M>,
    settings: EmailSettings,
}

impl<U: UserRepository, M: MailTransport> EmailService<U, M> {
    pub fn new(user_repository: Arc<U>, transport: Arc<M>, settings: EmailSettings) -> Self {
        Self {
            user_repository,
            transport,
            settings,
        }
    }

    /// Generate a reset token for the account registered under `email`,
    /// store its digest, and mail the raw token as a link.
    pub async fn send_reset_password_email(&self, email: &str) -> Result<&'static str, AppError> {
        let mut user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No account registered for {}", email)))?;

        let raw_token = Uuid::new_v4().to_string();
        user.reset_token = Some(sha256_hex(&raw_token));
        self.user_repository.update(&user).await?;

        self.transport
            .send(&OutgoingEmail {
                from: self.settings.origin.clone(),
                to: user.email.clone(),
                subject: templates::RESET_PASSWORD_SUBJECT.to_string(),
                html_body: templates::reset_password_body(
                    &user.username,
                    &raw_token,
                    &self.settings.frontend_base_url,
                ),
            })
            .await?;

        tracing::info!(username = %user.username, "Password reset email sent");

        Ok(responses::PASSWORD_CHANGE_EMAIL_SENT_SUCCESSFULLY)
    }

    /// Assign a fresh six-digit login code to the user and mail it.
    pub async fn send_two_factor_email(&self, username: &str) -> Result<&'static str, AppError> {
        let mut user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;

        let code = self.generate_unique_code().await?;
        user.two_factor_code = Some(code);
        self.user_repository.update(&user).await?;

        self.transport
            .send(&OutgoingEmail {
                from: self.settings.origin.clone(),
                to: user.email.clone(),
                subject: templates::TWO_FACTOR_SUBJECT.to_string(),
                html_body: templates::two_factor_body(&user.username, code),
            })
            .await?;

        Ok(responses::TWO_FACTOR_CODE_EMAIL_SENT_SUCCESSFULLY)
    }

    /// Warn the user that a login arrived from a location other than the
    /// one recorded at registration.
    pub async fn send_location_difference_email(
        &self,
        user: &User,
        current: &UserLocation,
        original: &UserLocation,
    ) -> Result<&'static str, AppError> {
        self.transport
            .send(&OutgoingEmail {
                from: self.settings.origin.clone(),
                to: user.email.clone(),
                subject: templates::LOCATION_DIFFERENCE_SUBJECT.to_string(),
                html_body: templates::location_difference_body(&user.username, current, original),
            })
            .await?;

        Ok(responses::LOCATION_DIFFERENCE_EMAIL_SENT_SUCCESSFULLY)
    }

    /// Welcome email after a successful registration.
    pub async fn send_registration_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<(), AppError> {
        self.transport
            .send(&OutgoingEmail {
                from: self.settings.origin.clone(),
                to: email.to_string(),
                subject: templates::REGISTRATION_SUCCESS_SUBJECT.to_string(),
                html_body: templates::registration_success_body(username),
            })
            .await
    }

    /// Receipt email for a newly recorded subscription payment.
    pub async fn send_payment_email(
        &self,
        username: &str,
        email: &str,
        transaction: &Transaction,
    ) -> Result<(), AppError> {
        self.transport
            .send(&OutgoingEmail {
                from: self.settings.origin.clone(),
                to: email.to_string(),
                subject: templates::SUBSCRIPTION_SUCCESS_SUBJECT.to_string(),
                html_body: templates::subscription_success_body(username, transaction),
            })
            .await
    }

    /// Notify a user that their account was suspended.
    pub async fn send_ban_email(&self, user: &User) -> Result<(), AppError> {
        let date = format_datetime(Utc::now());
        self.transport
            .send(&OutgoingEmail {
                from: self.settings.origin.clone(),
                to: user.email.clone(),
                subject: templates::USER_BAN_SUBJECT.to_string(),
                html_body: templates::user_ban_body(&user.username, &date),
            })
            .await
    }

    /// Notify a user that their suspension was lifted.
    pub async fn send_unban_email(&self, user: &User) -> Result<(), AppError> {
        let date = format_datetime(Utc::now());
        self.transport
            .send(&OutgoingEmail {
                from: self.settings.origin.clone(),
                to: user.email.clone(),
                subject: templates::USER_UNBAN_SUBJECT.to_string(),
                html_body: templates::user_unban_body(&user.username, &date),
            })
            .await
    }

    /// Forward a saved inquiry to the support inbox. The mail is sent in
    /// the user's name with the inquiry's custom ID as the subject so
    /// support can reply and track it.
    pub async fn send_inquiry_email(
        &self,
        inquiry: &Inquiry,
        sender_email: &str,
    ) -> Result<(), AppError> {
        self.transport
            .send(&OutgoingEmail {
                from: sender_email.to_string(),
                to: self.settings.origin.clone(),
                subject: inquiry.custom_id.clone(),
                html_body: templates::inquiry_body(
                    &inquiry.title,
                    &inquiry.content,
                    &inquiry.date,
                    sender_email,
                ),
            })
            .await
    }

    /// Forward a saved problem report to the support inbox.
    pub async fn send_report_email(&self, report: &Report, username: &str) -> Result<(), AppError> {
        self.transport
            .send(&OutgoingEmail {
                from: self.settings.origin.clone(),
                to: self.settings.origin.clone(),
                subject: templates::report_subject(username),
                html_body: templates::report_body(
                    &report.title,
                    &report.date,
                    username,
                    &report.content,
                    report.img_url.as_deref().unwrap_or(""),
                ),
            })
            .await
    }

    /// Roll six-digit codes until one is free of collisions with codes
    /// already assigned to other accounts.
    async fn generate_unique_code(&self) -> Result<i32, AppError> {
        loop {
            let code: i32 = rand::rng().random_range(100_000..=999_999);
            if !self.user_repository.two_factor_code_exists(code).await? {
                return Ok(code);
            }
        }
    }
}

/// Hex-encoded sha256 digest, used for stored reset tokens.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockUserRepository;
    use crate::infrastructure::email::MockMailTransport;

    fn email_settings() -> EmailSettings {
        EmailSettings {
            origin: "support@fxib.test".to_string(),
            frontend_base_url: "http://localhost:3000".to_string(),
        }
    }

    fn test_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sha256_hex_is_stable() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_reset_email_stores_digest_not_raw_token() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(test_user())));
        users
            .expect_update()
            .withf(|user: &User| {
                // 64 hex chars, not a 36-char UUID
                user.reset_token
                    .as_ref()
                    .is_some_and(|t| t.len() == 64 && t.chars().all(|c| c.is_ascii_hexdigit()))
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut transport = MockMailTransport::new();
        transport.expect_send().times(1).returning(|_| Ok(()));

        let service = EmailService::new(Arc::new(users), Arc::new(transport), email_settings());
        let message = service
            .send_reset_password_email("alice@example.com")
            .await
            .unwrap();

        assert_eq!(message, responses::PASSWORD_CHANGE_EMAIL_SENT_SUCCESSFULLY);
    }

    #[tokio::test]
    async fn test_reset_email_unknown_address_sends_nothing() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let mut transport = MockMailTransport::new();
        transport.expect_send().times(0);

        let service = EmailService::new(Arc::new(users), Arc::new(transport), email_settings());
        let result = service.send_reset_password_email("ghost@example.com").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_two_factor_code_rerolls_on_collision() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(test_user())));

        let mut first = true;
        users.expect_two_factor_code_exists().returning(move |_| {
            let collides = first;
            first = false;
            Ok(collides)
        });
        users
            .expect_update()
            .withf(|user: &User| {
                user.two_factor_code
                    .is_some_and(|code| (100_000..=999_999).contains(&code))
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut transport = MockMailTransport::new();
        transport.expect_send().times(1).returning(|_| Ok(()));

        let service = EmailService::new(Arc::new(users), Arc::new(transport), email_settings());
        let message = service.send_two_factor_email("alice").await.unwrap();

        assert_eq!(message, responses::TWO_FACTOR_CODE_EMAIL_SENT_SUCCESSFULLY);
    }

    #[tokio::test]
    async fn test_inquiry_email_sent_in_users_name_to_support_inbox() {
        let users = MockUserRepository::new();

        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .withf(|email: &OutgoingEmail| {
                email.from == "alice@example.com"
                    && email.to == "support@fxib.test"
                    && email.subject == "INQ-1"
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = EmailService::new(Arc::new(users), Arc::new(transport), email_settings());
        let inquiry = Inquiry {
            id: 1,
            custom_id: "INQ-1".to_string(),
            title: "Billing question".to_string(),
            content: "How do refunds work?".to_string(),
            date: "2024-03-01 10:00:00".to_string(),
            user_id: 1,
        };

        service
            .send_inquiry_email(&inquiry, "alice@example.com")
            .await
            .unwrap();
    }
}
