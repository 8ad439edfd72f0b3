//! Application Services
//!
//! Business logic orchestrating the domain entities. Services are generic
//! over the repository and transport traits so each one can be unit tested
//! against mocks; handlers instantiate them per-request with the concrete
//! infrastructure implementations.

pub mod access;
pub mod account_service;
pub mod admin_service;
pub mod auth_service;
pub mod billing_service;
pub mod community_service;
pub mod email_service;

pub use access::AccessValidator;
pub use account_service::AccountService;
pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use billing_service::BillingService;
pub use community_service::CommunityService;
pub use email_service::EmailService;
