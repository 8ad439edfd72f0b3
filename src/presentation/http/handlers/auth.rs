//! Authentication Handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::application::dto::request::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, TwoFactorRequest, UpdatePasswordRequest,
};
use crate::application::dto::response::{MessageResponse, TokenResponse};
use crate::application::services::{AuthService, EmailService};
use crate::infrastructure::email::SmtpMailer;
use crate::infrastructure::geoip::HttpGeoLocator;
use crate::infrastructure::repositories::PgUserRepository;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn auth_service(state: &AppState) -> AuthService<PgUserRepository, SmtpMailer, HttpGeoLocator> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let email_service = EmailService::new(
        Arc::clone(&user_repo),
        state.mailer.clone(),
        state.settings.email.clone(),
    );
    AuthService::new(
        user_repo,
        email_service,
        state.geo.clone(),
        state.settings.jwt.clone(),
    )
}

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = auth_service(&state)
        .register(
            &body.username,
            &body.email,
            &body.password,
            body.ip.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new(message))))
}

/// First login factor: credentials check plus two-factor code email
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = auth_service(&state)
        .login(&body.username, &body.password, body.ip.as_deref())
        .await?;

    Ok(Json(MessageResponse::new(message)))
}

/// Second login factor: verify the emailed code and issue a token
pub async fn verify_two_factor(
    State(state): State<AppState>,
    Json(body): Json<TwoFactorRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let tokens = auth_service(&state)
        .verify_two_factor(&body.username, body.code)
        .await?;

    Ok(Json(tokens))
}

/// Send a password reset link to the given address
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = auth_service(&state)
        .request_password_reset(&body.email)
        .await?;

    Ok(Json(MessageResponse::new(message)))
}

/// Complete the password reset with the emailed token
pub async fn update_password(
    State(state): State<AppState>,
    Json(body): Json<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = auth_service(&state)
        .update_password(&body.token, &body.new_password)
        .await?;

    Ok(Json(MessageResponse::new(message)))
}
