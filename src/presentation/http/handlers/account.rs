//! Account Handlers
//!
//! The account endpoint is action-discriminated: a single GET route serves
//! profile and billing reads, a single POST route serves support
//! submissions. Unknown actions are rejected before any service work.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::dto::request::{AccountQuery, BiographyQuery, LogoutQuery, SupportQuery};
use crate::application::dto::response::MessageResponse;
use crate::application::services::{
    AccessValidator, AccountService, BillingService, EmailService,
};
use crate::infrastructure::email::SmtpMailer;
use crate::infrastructure::repositories::{
    PgInquiryRepository, PgReportRepository, PgTransactionRepository, PgUserRepository,
};
use crate::infrastructure::stripe::HttpStripeGateway;
use crate::shared::actions;
use crate::shared::error::AppError;
use crate::startup::AppState;

type ConcreteAccountService = AccountService<
    PgUserRepository,
    PgInquiryRepository,
    PgReportRepository,
    PgTransactionRepository,
    SmtpMailer,
    HttpStripeGateway,
>;

fn account_service(state: &AppState) -> ConcreteAccountService {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let transaction_repo = Arc::new(PgTransactionRepository::new(state.db.clone()));

    AccountService::new(
        AccessValidator::new(Arc::clone(&user_repo), state.settings.jwt.clone()),
        Arc::clone(&user_repo),
        Arc::new(PgInquiryRepository::new(state.db.clone())),
        Arc::new(PgReportRepository::new(state.db.clone())),
        Arc::clone(&transaction_repo),
        EmailService::new(
            Arc::clone(&user_repo),
            state.mailer.clone(),
            state.settings.email.clone(),
        ),
        BillingService::new(state.stripe.clone(), transaction_repo),
    )
}

/// Action-discriminated account reads
pub async fn account_actions(
    State(state): State<AppState>,
    Query(query): Query<AccountQuery>,
) -> Result<Response, AppError> {
    match query.action.as_str() {
        actions::GET_ALL_USER_DETAILS => {
            let details = account_service(&state)
                .get_user_details(&query.username, &query.jwt_token)
                .await?;
            Ok(Json(details).into_response())
        }
        actions::GET_ALL_USER_TRANSACTIONS => {
            let transactions = account_service(&state)
                .get_all_user_transactions(&query.username, &query.jwt_token)
                .await?;
            Ok(Json(transactions).into_response())
        }
        other => Err(AppError::MissingParameter(format!(
            "Unknown action '{}'",
            other
        ))),
    }
}

/// Action-discriminated support submissions
pub async fn support_actions(
    State(state): State<AppState>,
    Query(query): Query<SupportQuery>,
) -> Result<Response, AppError> {
    match query.action.as_str() {
        actions::REPORT_PROBLEM_AND_EMAIL_SEND => {
            let report = account_service(&state)
                .save_report_and_send_email(
                    &query.username,
                    &query.jwt_token,
                    &query.title,
                    &query.content,
                    query.img_url,
                )
                .await?;
            Ok(Json(report).into_response())
        }
        actions::SEND_INQUIRY_AND_EMAIL_SEND => {
            let inquiry = account_service(&state)
                .save_inquiry_and_send_email(
                    &query.username,
                    &query.jwt_token,
                    &query.title,
                    &query.content,
                )
                .await?;
            Ok(Json(inquiry).into_response())
        }
        other => Err(AppError::MissingParameter(format!(
            "Unknown action '{}'",
            other
        ))),
    }
}

/// Replace the caller's biography
pub async fn update_biography(
    State(state): State<AppState>,
    Query(query): Query<BiographyQuery>,
) -> Result<Response, AppError> {
    let details = account_service(&state)
        .update_biography(&query.username, &query.jwt_token, &query.biography)
        .await?;

    Ok(Json(details).into_response())
}

/// Invalidate the caller's outstanding two-factor code
pub async fn logout(
    State(state): State<AppState>,
    Query(query): Query<LogoutQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = account_service(&state)
        .logout(&query.username, &query.jwt_token)
        .await?;

    Ok(Json(MessageResponse::new(message)))
}
