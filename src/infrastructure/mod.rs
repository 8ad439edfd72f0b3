//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database repositories (PostgreSQL)
//! - SMTP mail transport and HTML templates
//! - Stripe and geolocation API clients

pub mod database;
pub mod email;
pub mod geoip;
pub mod repositories;
pub mod stripe;
