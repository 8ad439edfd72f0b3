//! REST API endpoint tests

mod account_tests;
mod admin_tests;
mod auth_tests;
mod community_tests;
mod health_tests;
