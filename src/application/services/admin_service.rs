//! Admin Service
//!
//! Moderation operations: listing member accounts, toggling suspensions
//! through the BANNED sentinel role, and reviewing a member's support
//! history.

use std::sync::Arc;

use super::access::AccessValidator;
use super::email_service::EmailService;
use crate::application::dto::{AdminUserResponse, InquiryResponse, ReportResponse, RolePayload};
use crate::domain::{InquiryRepository, ReportRepository, Role, UserRepository};
use crate::infrastructure::email::MailTransport;
use crate::shared::error::AppError;
use crate::shared::responses;

/// Service for administrator-only operations.
pub struct AdminService<U, I, R, M>
where
    U: UserRepository,
    I: InquiryRepository,
    R: ReportRepository,
    M: MailTransport,
{
    access: AccessValidator<U>,
    user_repository: Arc<U>,
    inquiry_repository: Arc<I>,
    report_repository: Arc<R>,
    email_service: EmailService<U, M>,
}

impl<U, I, R, M> AdminService<U, I, R, M>
where
    U: UserRepository,
    I: InquiryRepository,
    R: ReportRepository,
    M: MailTransport,
{
    pub fn new(
        access: AccessValidator<U>,
        user_repository: Arc<U>,
        inquiry_repository: Arc<I>,
        report_repository: Arc<R>,
        email_service: EmailService<U, M>,
    ) -> Self {
        Self {
            access,
            user_repository,
            inquiry_repository,
            report_repository,
            email_service,
        }
    }

    /// List every non-administrator account.
    pub async fn get_all_users(
        &self,
        username: &str,
        token: &str,
    ) -> Result<Vec<AdminUserResponse>, AppError> {
        self.access.validate_admin_with_jwt(username, token).await?;

        let users = self.user_repository.find_all().await?;

        Ok(users
            .iter()
            .filter(|user| !user.is_admin())
            .map(AdminUserResponse::from)
            .collect())
    }

    /// Toggle a member's suspension.
    ///
    /// The caller supplies the target's new role set; the current BANNED
    /// sentinel decides the direction of the toggle. Banning writes the
    /// suspension sentinel into the biography, unbanning clears it. Both
    /// directions reset the terms agreement, so the user re-accepts the
    /// terms on their next visit.
    pub async fn ban_user(
        &self,
        logged_username: &str,
        token: &str,
        ban_username: &str,
        roles: Vec<RolePayload>,
    ) -> Result<&'static str, AppError> {
        self.access
            .validate_admin_with_jwt(logged_username, token)
            .await?;

        let mut target = self
            .user_repository
            .find_by_username(ban_username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", ban_username)))?;

        if !target.is_banned() {
            target.biography = responses::BANNED_USER_STATUS.to_string();
            self.email_service.send_ban_email(&target).await?;
            tracing::info!(admin = %logged_username, target = %ban_username, "User banned");
        } else {
            self.email_service.send_unban_email(&target).await?;
            target.biography.clear();
            tracing::info!(admin = %logged_username, target = %ban_username, "User unbanned");
        }

        let new_roles: Vec<Role> = roles
            .into_iter()
            .map(|role| Role::new(role.id, role.name))
            .collect();
        self.user_repository
            .replace_roles(target.id, &new_roles)
            .await?;

        target.agreed_to_terms = false;
        target.roles = new_roles;
        self.user_repository.update(&target).await?;

        Ok(responses::USER_BANNED_SUCCESSFULLY)
    }

    /// Support inquiries submitted by the named member.
    pub async fn get_all_inquiries_for_user(
        &self,
        logged_username: &str,
        token: &str,
        target_username: &str,
    ) -> Result<Vec<InquiryResponse>, AppError> {
        self.access
            .validate_admin_with_jwt(logged_username, token)
            .await?;

        let target = self
            .user_repository
            .find_by_username(target_username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", target_username)))?;

        let inquiries = self
            .inquiry_repository
            .find_all_by_user_id(target.id)
            .await?;

        Ok(inquiries.iter().map(InquiryResponse::from).collect())
    }

    /// Problem reports submitted by the named member.
    pub async fn get_all_reports_for_user(
        &self,
        logged_username: &str,
        token: &str,
        target_username: &str,
    ) -> Result<Vec<ReportResponse>, AppError> {
        self.access
            .validate_admin_with_jwt(logged_username, token)
            .await?;

        let target = self
            .user_repository
            .find_by_username(target_username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", target_username)))?;

        let reports = self.report_repository.find_all_by_user_id(target.id).await?;

        Ok(reports.iter().map(ReportResponse::from).collect())
    }
}
