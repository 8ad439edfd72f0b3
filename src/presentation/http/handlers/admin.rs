//! Admin Handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::dto::request::{AdminQuery, BanQuery, RolePayload};
use crate::application::dto::response::MessageResponse;
use crate::application::services::{AccessValidator, AdminService, EmailService};
use crate::infrastructure::email::SmtpMailer;
use crate::infrastructure::repositories::{
    PgInquiryRepository, PgReportRepository, PgUserRepository,
};
use crate::shared::actions;
use crate::shared::error::AppError;
use crate::startup::AppState;

type ConcreteAdminService =
    AdminService<PgUserRepository, PgInquiryRepository, PgReportRepository, SmtpMailer>;

fn admin_service(state: &AppState) -> ConcreteAdminService {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));

    AdminService::new(
        AccessValidator::new(Arc::clone(&user_repo), state.settings.jwt.clone()),
        Arc::clone(&user_repo),
        Arc::new(PgInquiryRepository::new(state.db.clone())),
        Arc::new(PgReportRepository::new(state.db.clone())),
        EmailService::new(
            user_repo,
            state.mailer.clone(),
            state.settings.email.clone(),
        ),
    )
}

fn require_target(query: &AdminQuery) -> Result<&str, AppError> {
    query
        .current_username
        .as_deref()
        .ok_or_else(|| AppError::MissingParameter("currentUsername".to_string()))
}

/// Action-discriminated admin reads
pub async fn admin_actions(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<Response, AppError> {
    match query.action.as_str() {
        actions::GET_ALL_USERS_AS_ADMIN => {
            let users = admin_service(&state)
                .get_all_users(&query.username, &query.jwt_token)
                .await?;
            Ok(Json(users).into_response())
        }
        actions::GET_ALL_INQUIRIES_FOR_USER => {
            let target = require_target(&query)?;
            let inquiries = admin_service(&state)
                .get_all_inquiries_for_user(&query.username, &query.jwt_token, target)
                .await?;
            Ok(Json(inquiries).into_response())
        }
        actions::GET_ALL_REPORTS_FOR_USER => {
            let target = require_target(&query)?;
            let reports = admin_service(&state)
                .get_all_reports_for_user(&query.username, &query.jwt_token, target)
                .await?;
            Ok(Json(reports).into_response())
        }
        other => Err(AppError::MissingParameter(format!(
            "Unknown action '{}'",
            other
        ))),
    }
}

/// Toggle a member's suspension with the supplied role set
pub async fn ban_user(
    State(state): State<AppState>,
    Query(query): Query<BanQuery>,
    Json(roles): Json<Vec<RolePayload>>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = admin_service(&state)
        .ban_user(
            &query.logged_username,
            &query.jwt_token,
            &query.ban_username,
            roles,
        )
        .await?;

    Ok(Json(MessageResponse::new(message)))
}
