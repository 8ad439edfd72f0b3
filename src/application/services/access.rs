//! Access Validation
//!
//! JWT issuing/decoding plus the username-to-token ownership check every
//! authenticated operation performs before touching data.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;

/// JWT claims carried by access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID as a string
    pub sub: String,
    /// Expiration timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
}

/// Issue a signed access token for the given user.
pub fn issue_token(user: &User, settings: &JwtSettings) -> Result<(String, i64), AppError> {
    let now = Utc::now();
    let expires_in = settings.access_token_expiry_minutes * 60;
    let claims = Claims {
        sub: user.id.to_string(),
        exp: (now + Duration::minutes(settings.access_token_expiry_minutes)).timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

    Ok((token, expires_in))
}

/// Decode and verify a token, returning its claims.
pub fn decode_token(token: &str, settings: &JwtSettings) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

/// Validates that a caller-supplied username matches the token subject, and
/// that the caller holds the authority an operation requires.
pub struct AccessValidator<U: UserRepository> {
    user_repository: Arc<U>,
    jwt_settings: JwtSettings,
}

impl<U: UserRepository> AccessValidator<U> {
    pub fn new(user_repository: Arc<U>, jwt_settings: JwtSettings) -> Self {
        Self {
            user_repository,
            jwt_settings,
        }
    }

    /// Verify the token and confirm it was issued to the named user.
    ///
    /// Returns the full user record on success so callers avoid a second
    /// lookup.
    pub async fn validate_user_with_jwt(
        &self,
        username: &str,
        token: &str,
    ) -> Result<User, AppError> {
        let claims = decode_token(token, &self.jwt_settings)?;

        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;

        if user.id.to_string() != claims.sub {
            return Err(AppError::Unauthorized(
                "Token does not belong to this user".to_string(),
            ));
        }

        Ok(user)
    }

    /// Verify the token, confirm ownership, and require the ADMIN role.
    pub async fn validate_admin_with_jwt(
        &self,
        username: &str,
        token: &str,
    ) -> Result<User, AppError> {
        let user = self.validate_user_with_jwt(username, token).await?;

        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Administrator authority required".to_string(),
            ));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockUserRepository, Role, USER};

    fn jwt_settings() -> JwtSettings {
        JwtSettings {
            secret: "test-secret-key-that-is-long-enough!".to_string(),
            access_token_expiry_minutes: 60,
        }
    }

    fn test_user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            roles: vec![Role::new(2, USER)],
            ..Default::default()
        }
    }

    #[test]
    fn test_issued_token_round_trips() {
        let settings = jwt_settings();
        let user = test_user(42, "alice");

        let (token, expires_in) = issue_token(&user, &settings).unwrap();
        let claims = decode_token(&token, &settings).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(expires_in, 3600);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let user = test_user(1, "alice");
        let (token, _) = issue_token(&user, &jwt_settings()).unwrap();

        let other = JwtSettings {
            secret: "a-different-secret-key-of-valid-size".to_string(),
            access_token_expiry_minutes: 60,
        };

        assert!(matches!(
            decode_token(&token, &other),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_validate_rejects_token_of_another_user() {
        let settings = jwt_settings();
        let (token, _) = issue_token(&test_user(99, "mallory"), &settings).unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(test_user(42, "alice"))));

        let validator = AccessValidator::new(Arc::new(repo), settings);
        let result = validator.validate_user_with_jwt("alice", &token).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_validate_admin_requires_admin_role() {
        let settings = jwt_settings();
        let (token, _) = issue_token(&test_user(42, "alice"), &settings).unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(test_user(42, "alice"))));

        let validator = AccessValidator::new(Arc::new(repo), settings);
        let result = validator.validate_admin_with_jwt("alice", &token).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
