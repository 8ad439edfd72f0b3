//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Client IP for the registration-location lookup
    pub ip: Option<String>,
}

/// Login request (first factor)
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Client IP for the location-difference check
    pub ip: Option<String>,
}

/// Two-factor verification request (second factor)
#[derive(Debug, Deserialize)]
pub struct TwoFactorRequest {
    pub username: String,
    pub code: i32,
}

/// Password reset request
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Password update following a reset email
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    pub token: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Query parameters for the action-discriminated account GET endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    pub action: String,
    pub username: String,
    pub jwt_token: String,
}

/// Query parameters for the biography update endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiographyQuery {
    pub username: String,
    pub jwt_token: String,
    pub biography: String,
}

/// Query parameters for the logout endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutQuery {
    pub username: String,
    pub jwt_token: String,
}

/// Query parameters for the action-discriminated support POST endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportQuery {
    pub action: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "imgURL")]
    pub img_url: Option<String>,
    pub username: String,
    pub jwt_token: String,
}

/// Query parameters for the action-discriminated admin GET endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminQuery {
    pub action: String,
    pub username: String,
    pub jwt_token: String,
    pub current_username: Option<String>,
}

/// Query parameters for the admin ban endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanQuery {
    pub ban_username: String,
    pub logged_username: String,
    pub jwt_token: String,
}

/// Role payload supplied by the admin frontend when toggling a ban
#[derive(Debug, Clone, Deserialize)]
pub struct RolePayload {
    pub id: i64,
    pub name: String,
}

/// Query parameters for the action-discriminated community endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityQuery {
    pub action: String,
    pub username: String,
    pub jwt_token: String,
    pub topic: Option<String>,
    pub content: Option<String>,
    pub question_id: Option<i64>,
    pub answer_id: Option<i64>,
}
