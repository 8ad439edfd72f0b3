//! Shared Utilities
//!
//! Common types used across all layers: errors, action and response
//! constants, and date formatting.

pub mod actions;
pub mod error;
pub mod responses;
pub mod time;

pub use error::AppError;
