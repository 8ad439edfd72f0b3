//! # FXIB Backend Library
//!
//! This crate provides the backend for the FXIB trading community
//! platform:
//! - RESTful HTTP API endpoints
//! - Two-step login with emailed six-digit codes
//! - Stripe subscription billing reconciliation
//! - HTML notification email delivery over SMTP
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database, mail, and external API implementations
//! - **Presentation Layer**: HTTP routing and handlers
//!
//! ## Module Structure
//!
//! ```text
//! fxib_backend/
//! +-- config/        Configuration management
//! +-- domain/        Domain entities and repository traits
//! +-- application/   Application services and DTOs
//! +-- infrastructure/ Database, SMTP, Stripe, and geolocation clients
//! +-- presentation/  HTTP routes and handlers
//! +-- shared/        Common utilities (errors, actions, dates)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
