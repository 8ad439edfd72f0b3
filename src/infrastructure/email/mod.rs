//! Email Infrastructure
//!
//! SMTP transport (lettre) and fixed HTML templates for notification mail.

pub mod mailer;
pub mod templates;

pub use mailer::{MailTransport, OutgoingEmail, SmtpMailer};

#[cfg(test)]
pub use mailer::MockMailTransport;
