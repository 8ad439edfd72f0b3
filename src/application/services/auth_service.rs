//! Authentication Service
//!
//! Registration, the two-step login flow, and the password reset flow.
//! Access tokens are only issued after the emailed six-digit code is
//! verified.

use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::access::issue_token;
use super::email_service::{sha256_hex, EmailService};
use crate::application::dto::TokenResponse;
use crate::config::JwtSettings;
use crate::domain::{Role, User, UserRepository, USER};
use crate::infrastructure::email::MailTransport;
use crate::infrastructure::geoip::GeoLocator;
use crate::shared::error::AppError;
use crate::shared::responses;

/// Service handling account creation and login.
pub struct AuthService<U: UserRepository, M: MailTransport, G: GeoLocator> {
    user_repository: Arc<U>,
    email_service: EmailService<U, M>,
    geo_locator: Arc<G>,
    jwt_settings: JwtSettings,
}

impl<U: UserRepository, M: MailTransport, G: GeoLocator> AuthService<U, M, G> {
    pub fn new(
        user_repository: Arc<U>,
        email_service: EmailService<U, M>,
        geo_locator: Arc<G>,
        jwt_settings: JwtSettings,
    ) -> Self {
        Self {
            user_repository,
            email_service,
            geo_locator,
            jwt_settings,
        }
    }

    /// Create a new account with the USER role and send the welcome email.
    ///
    /// The registration IP, when present and resolvable, is stored as the
    /// account's home location for later login comparisons.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        ip: Option<&str>,
    ) -> Result<&'static str, AppError> {
        if self.user_repository.username_exists(username).await? {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }
        if self.user_repository.email_exists(email).await? {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let location = match ip {
            Some(ip) => match self.geo_locator.locate(ip).await {
                Ok(location) => Some(location),
                Err(e) => {
                    tracing::warn!(ip = %ip, error = %e, "Registration location lookup failed");
                    None
                }
            },
            None => None,
        };

        let user = User {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            location,
            roles: vec![Role::new(0, USER)],
            ..Default::default()
        };

        let created = self.user_repository.create(&user).await?;
        self.email_service
            .send_registration_email(&created.username, &created.email)
            .await?;

        tracing::info!(username = %created.username, "User registered");

        Ok(responses::REGISTRATION_SUCCESSFUL)
    }

    /// First login factor: verify credentials, flag logins from an
    /// unfamiliar location, and email a fresh six-digit code.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        ip: Option<&str>,
    ) -> Result<&'static str, AppError> {
        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(invalid_credentials());
        }

        if let (Some(ip), Some(original)) = (ip, user.location.as_ref()) {
            match self.geo_locator.locate(ip).await {
                Ok(current) => {
                    if current.country != original.country || current.city != original.city {
                        self.email_service
                            .send_location_difference_email(&user, &current, original)
                            .await?;
                    }
                }
                Err(e) => {
                    tracing::warn!(ip = %ip, error = %e, "Login location lookup failed");
                }
            }
        }

        self.email_service.send_two_factor_email(username).await
    }

    /// Second login factor: verify the emailed code, clear it, and issue
    /// an access token.
    pub async fn verify_two_factor(
        &self,
        username: &str,
        code: i32,
    ) -> Result<TokenResponse, AppError> {
        let mut user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(invalid_credentials)?;

        if user.two_factor_code != Some(code) {
            return Err(AppError::Unauthorized(
                "Invalid two-factor code".to_string(),
            ));
        }

        user.two_factor_code = None;
        self.user_repository.update(&user).await?;

        let (access_token, expires_in) = issue_token(&user, &self.jwt_settings)?;

        tracing::info!(username = %user.username, "Login completed");

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        })
    }

    /// Start the password reset flow by emailing a one-time token link.
    pub async fn request_password_reset(&self, email: &str) -> Result<&'static str, AppError> {
        self.email_service.send_reset_password_email(email).await
    }

    /// Complete the password reset flow: the raw emailed token is hashed
    /// and matched against the stored digest.
    pub async fn update_password(
        &self,
        raw_token: &str,
        new_password: &str,
    ) -> Result<&'static str, AppError> {
        let digest = sha256_hex(raw_token);

        let mut user = self
            .user_repository
            .find_by_reset_token(&digest)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid or expired reset token".to_string()))?;

        user.password_hash = hash_password(new_password)?;
        user.reset_token = None;
        self.user_repository.update(&user).await?;

        tracing::info!(username = %user.username, "Password updated via reset token");

        Ok(responses::PASSWORD_UPDATED_SUCCESSFULLY)
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid username or password".to_string())
}

/// Hash a password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored Argon2 hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmailSettings;
    use crate::domain::MockUserRepository;
    use crate::infrastructure::email::MockMailTransport;
    use crate::infrastructure::geoip::MockGeoLocator;

    fn jwt_settings() -> JwtSettings {
        JwtSettings {
            secret: "test-secret-key-that-is-long-enough!".to_string(),
            access_token_expiry_minutes: 60,
        }
    }

    fn service_with(
        users: MockUserRepository,
        transport: MockMailTransport,
        geo: MockGeoLocator,
    ) -> AuthService<MockUserRepository, MockMailTransport, MockGeoLocator> {
        let users = Arc::new(users);
        let email_service = EmailService::new(
            Arc::clone(&users),
            Arc::new(transport),
            EmailSettings {
                origin: "support@fxib.test".to_string(),
                frontend_base_url: "http://localhost:3000".to_string(),
            },
        );
        AuthService::new(users, email_service, Arc::new(geo), jwt_settings())
    }

    #[test]
    fn test_password_hash_verifies() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let mut users = MockUserRepository::new();
        users.expect_username_exists().returning(|_| Ok(true));
        users.expect_create().times(0);

        let mut transport = MockMailTransport::new();
        transport.expect_send().times(0);

        let service = service_with(users, transport, MockGeoLocator::new());
        let result = service
            .register("alice", "alice@example.com", "password123", None)
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password_without_email() {
        let hash = hash_password("the-real-password").unwrap();

        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(move |_| {
            Ok(Some(User {
                id: 1,
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: hash.clone(),
                ..Default::default()
            }))
        });

        let mut transport = MockMailTransport::new();
        transport.expect_send().times(0);

        let service = service_with(users, transport, MockGeoLocator::new());
        let result = service.login("alice", "guessed-wrong", None).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_verify_two_factor_rejects_wrong_code() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| {
            Ok(Some(User {
                id: 1,
                username: "alice".to_string(),
                two_factor_code: Some(111_111),
                ..Default::default()
            }))
        });
        users.expect_update().times(0);

        let service = service_with(users, MockMailTransport::new(), MockGeoLocator::new());
        let result = service.verify_two_factor("alice", 222_222).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_verify_two_factor_issues_token_and_clears_code() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| {
            Ok(Some(User {
                id: 42,
                username: "alice".to_string(),
                two_factor_code: Some(314_159),
                ..Default::default()
            }))
        });
        users
            .expect_update()
            .withf(|user: &User| user.two_factor_code.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(users, MockMailTransport::new(), MockGeoLocator::new());
        let tokens = service.verify_two_factor("alice", 314_159).await.unwrap();

        assert_eq!(tokens.token_type, "Bearer");
        assert!(!tokens.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_update_password_rejects_unknown_token() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_reset_token().returning(|_| Ok(None));
        users.expect_update().times(0);

        let service = service_with(users, MockMailTransport::new(), MockGeoLocator::new());
        let result = service.update_password("bogus-token", "new-password-1").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
