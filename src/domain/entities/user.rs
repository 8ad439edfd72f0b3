//! User entity and repository trait.
//!
//! Maps to the `users` table (plus the `user_roles` join) in the database
//! schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::{self, Role};
use crate::shared::error::AppError;

/// Geographic location captured at registration and compared at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLocation {
    pub continent: String,
    pub country: String,
    pub country_flag_url: String,
    pub city: String,
    pub ip: String,
}

/// Represents a user account.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY
/// - username: VARCHAR(32) NOT NULL UNIQUE
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - password_hash: VARCHAR(255) NOT NULL
/// - biography: TEXT NOT NULL DEFAULT ''
/// - subscription: VARCHAR(32) NOT NULL DEFAULT 'Free'
/// - agreed_to_terms: BOOLEAN NOT NULL DEFAULT FALSE
/// - reset_token: VARCHAR(64) NULL (sha256 hex of the raw token)
/// - two_factor_code: INTEGER NULL (unique while assigned)
/// - continent/country/country_flag_url/city/ip: NULL location columns
/// - registration_date: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Username (unique)
    pub username: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Free-text biography; set to the banned sentinel while suspended
    pub biography: String,

    /// Subscription plan label ("Free", "1 Month", ...)
    pub subscription: String,

    /// Terms-of-service agreement flag
    pub agreed_to_terms: bool,

    /// sha256 hex digest of the outstanding password-reset token
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,

    /// Outstanding two-factor login code
    #[serde(skip_serializing)]
    pub two_factor_code: Option<i32>,

    /// Location recorded at registration, if the lookup succeeded
    pub location: Option<UserLocation>,

    /// Account creation timestamp
    pub registration_date: DateTime<Utc>,

    /// Assigned roles
    pub roles: Vec<Role>,
}

impl User {
    /// Check whether this account carries the BANNED sentinel role.
    pub fn is_banned(&self) -> bool {
        role::is_banned(&self.roles)
    }

    /// Check whether this account carries ADMIN.
    pub fn is_admin(&self) -> bool {
        role::is_admin(&self.roles)
    }
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: 0,
            username: String::new(),
            email: String::new(),
            password_hash: String::new(),
            biography: String::new(),
            subscription: crate::shared::responses::FREE_SUBSCRIPTION.to_string(),
            agreed_to_terms: false,
            reset_token: None,
            two_factor_code: None,
            location: None,
            registration_date: Utc::now(),
            roles: Vec::new(),
        }
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID, with roles loaded.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by username, with roles loaded.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Find a user by email address, with roles loaded.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Find a user by the sha256 digest of an outstanding reset token.
    async fn find_by_reset_token(&self, token_digest: &str) -> Result<Option<User>, AppError>;

    /// Fetch every user, with roles loaded.
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Insert a new user and attach its initial roles (matched by name).
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Persist the mutable scalar fields of an existing user.
    async fn update(&self, user: &User) -> Result<(), AppError>;

    /// Replace the user's role set with roles matched by name.
    async fn replace_roles(&self, user_id: i64, roles: &[Role]) -> Result<(), AppError>;

    /// Check if an email address is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Check if a username is already taken.
    async fn username_exists(&self, username: &str) -> Result<bool, AppError>;

    /// Check if a two-factor login code is currently assigned to any user.
    async fn two_factor_code_exists(&self, code: i32) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::role::{ADMIN, BANNED, USER};

    fn test_user() -> User {
        User {
            id: 7,
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hashed_password".to_string(),
            roles: vec![Role::new(2, USER)],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_user_is_free_and_unagreed() {
        let user = User::default();
        assert_eq!(user.subscription, "Free");
        assert!(!user.agreed_to_terms);
        assert!(user.roles.is_empty());
    }

    #[test]
    fn test_is_banned_reflects_role_set() {
        let mut user = test_user();
        assert!(!user.is_banned());

        user.roles.push(Role::new(3, BANNED));
        assert!(user.is_banned());
    }

    #[test]
    fn test_is_admin_reflects_role_set() {
        let mut user = test_user();
        assert!(!user.is_admin());

        user.roles.push(Role::new(1, ADMIN));
        assert!(user.is_admin());
    }

    #[test]
    fn test_sensitive_fields_not_serialized() {
        let mut user = test_user();
        user.reset_token = Some("abc123".to_string());
        user.two_factor_code = Some(123456);

        let serialized = serde_json::to_string(&user).expect("Failed to serialize user");

        assert!(!serialized.contains("password_hash"));
        assert!(!serialized.contains("reset_token"));
        assert!(!serialized.contains("two_factor_code"));
    }
}
