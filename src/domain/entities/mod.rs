//! # Domain Entities
//!
//! Core domain entities representing the main business objects in the
//! platform. All entities map directly to their corresponding database
//! tables.
//!
//! ## Core Entities
//!
//! - **User**: Account with credentials, profile, roles, and tokens
//! - **Role**: Named role (ADMIN / USER / BANNED), many-to-many with users
//! - **Inquiry**: Support inquiry submitted by a user
//! - **Report**: Problem report submitted by a user
//! - **Transaction**: Denormalized snapshot of a Stripe charge
//! - **Question/Answer**: Community Q&A content, grouped by topic
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer,
//! following the dependency inversion principle.

mod inquiry;
mod question;
mod report;
mod role;
mod transaction;
mod user;

// Re-export User entity and related types
pub use user::{User, UserLocation, UserRepository};

// Re-export Role entity and helpers
pub use role::{is_admin, is_banned, Role, ADMIN, BANNED, USER};

// Re-export support content entities
pub use inquiry::{Inquiry, InquiryRepository};
pub use report::{Report, ReportRepository};

// Re-export Transaction entity
pub use transaction::{Transaction, TransactionRepository};

// Re-export community Q&A entities
pub use question::{Answer, Question, QuestionRepository};

#[cfg(test)]
pub use inquiry::MockInquiryRepository;
#[cfg(test)]
pub use question::MockQuestionRepository;
#[cfg(test)]
pub use report::MockReportRepository;
#[cfg(test)]
pub use transaction::MockTransactionRepository;
#[cfg(test)]
pub use user::MockUserRepository;
