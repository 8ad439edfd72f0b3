//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! This module provides concrete implementations of the repository traits
//! defined in the domain layer. Each repository handles data access for
//! a specific entity type.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - User accounts, roles, and token lookups
//! - **InquiryRepository** - Support inquiries
//! - **ReportRepository** - Problem reports
//! - **TransactionRepository** - Stripe charge snapshots with dedup check
//! - **QuestionRepository** - Community topics, questions, and answers

pub mod inquiry_repository;
pub mod question_repository;
pub mod report_repository;
pub mod transaction_repository;
pub mod user_repository;

// Re-export repository structs for convenience
pub use inquiry_repository::PgInquiryRepository;
pub use question_repository::PgQuestionRepository;
pub use report_repository::PgReportRepository;
pub use transaction_repository::PgTransactionRepository;
pub use user_repository::PgUserRepository;
