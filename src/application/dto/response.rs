//! Response DTOs
//!
//! Serializable views of domain entities returned by the API. Conversions
//! live here so handlers and services stay free of field-mapping noise.

use serde::Serialize;

use crate::domain::{Answer, Inquiry, Question, Report, Role, Transaction, User, UserLocation};
use crate::shared::time::format_datetime;

/// Constant-string acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Issued access token following two-factor verification.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Role view returned to the admin frontend.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
}

impl From<&Role> for RoleResponse {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
        }
    }
}

/// Full account view returned to the owning user.
#[derive(Debug, Serialize)]
pub struct UserDetailsResponse {
    pub username: String,
    pub email: String,
    pub biography: String,
    pub subscription: String,
    pub agreed_to_terms: bool,
    pub registration_date: String,
    pub location: Option<UserLocation>,
    pub roles: Vec<RoleResponse>,
}

impl From<&User> for UserDetailsResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            biography: user.biography.clone(),
            subscription: user.subscription.clone(),
            agreed_to_terms: user.agreed_to_terms,
            registration_date: format_datetime(user.registration_date),
            location: user.location.clone(),
            roles: user.roles.iter().map(RoleResponse::from).collect(),
        }
    }
}

/// Condensed account view returned to administrators.
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub username: String,
    pub email: String,
    pub subscription: String,
    pub registration_date: String,
    pub roles: Vec<RoleResponse>,
}

impl From<&User> for AdminUserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            subscription: user.subscription.clone(),
            registration_date: format_datetime(user.registration_date),
            roles: user.roles.iter().map(RoleResponse::from).collect(),
        }
    }
}

/// Recorded billing transaction view.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub billing_date: String,
    pub duration: String,
    pub end_of_billing_date: String,
    pub amount: String,
    pub card: String,
    pub status: String,
    pub receipt: Option<String>,
    pub description: Option<String>,
}

impl From<&Transaction> for TransactionResponse {
    fn from(transaction: &Transaction) -> Self {
        Self {
            billing_date: transaction.billing_date.clone(),
            duration: transaction.duration.clone(),
            end_of_billing_date: transaction.end_of_billing_date.clone(),
            amount: transaction.amount.clone(),
            card: transaction.card.clone(),
            status: transaction.status.clone(),
            receipt: transaction.receipt.clone(),
            description: transaction.description.clone(),
        }
    }
}

/// Support inquiry view.
#[derive(Debug, Serialize)]
pub struct InquiryResponse {
    pub custom_id: String,
    pub title: String,
    pub content: String,
    pub date: String,
}

impl From<&Inquiry> for InquiryResponse {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            custom_id: inquiry.custom_id.clone(),
            title: inquiry.title.clone(),
            content: inquiry.content.clone(),
            date: inquiry.date.clone(),
        }
    }
}

/// Problem report view.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub title: String,
    pub content: String,
    pub img_url: Option<String>,
    pub date: String,
}

impl From<&Report> for ReportResponse {
    fn from(report: &Report) -> Self {
        Self {
            title: report.title.clone(),
            content: report.content.clone(),
            img_url: report.img_url.clone(),
            date: report.date.clone(),
        }
    }
}

/// Community answer view.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub id: i64,
    pub content: String,
    pub username: String,
    pub date: String,
    pub vote_count: i32,
}

impl From<&Answer> for AnswerResponse {
    fn from(answer: &Answer) -> Self {
        Self {
            id: answer.id,
            content: answer.content.clone(),
            username: answer.username.clone(),
            date: answer.date.clone(),
            vote_count: answer.vote_count,
        }
    }
}

/// Community question view with nested answers.
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub content: String,
    pub topic_name: String,
    pub username: String,
    pub date: String,
    pub solved: bool,
    pub answers: Vec<AnswerResponse>,
}

impl QuestionResponse {
    pub fn from_parts(question: &Question, answers: &[Answer]) -> Self {
        Self {
            id: question.id,
            content: question.content.clone(),
            topic_name: question.topic_name.clone(),
            username: question.username.clone(),
            date: question.date.clone(),
            solved: question.solved,
            answers: answers.iter().map(AnswerResponse::from).collect(),
        }
    }
}
