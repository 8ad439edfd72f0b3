//! Presentation Layer
//!
//! HTTP routing, handlers, and middleware.

pub mod http;
pub mod middleware;
