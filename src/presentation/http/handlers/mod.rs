//! HTTP Request Handlers

pub mod account;
pub mod admin;
pub mod auth;
pub mod community;
pub mod health;
