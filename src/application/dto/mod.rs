//! Data Transfer Objects
//!
//! Request and response structures for the HTTP API.

pub mod request;
pub mod response;

pub use request::{
    AccountQuery, AdminQuery, BanQuery, BiographyQuery, CommunityQuery, LoginRequest, LogoutQuery,
    RegisterRequest, ResetPasswordRequest, RolePayload, SupportQuery, TwoFactorRequest,
    UpdatePasswordRequest,
};
pub use response::{
    AdminUserResponse, AnswerResponse, InquiryResponse, MessageResponse, QuestionResponse,
    ReportResponse, RoleResponse, TokenResponse, TransactionResponse, UserDetailsResponse,
};
