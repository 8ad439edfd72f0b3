//! Application Layer
//!
//! Use-case services and the DTOs they exchange with the presentation
//! layer.

pub mod dto;
pub mod services;
