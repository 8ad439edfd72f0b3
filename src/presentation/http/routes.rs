//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Authentication routes (public)
        .nest("/auth", auth_routes())
        // Account routes (token-validated per action)
        .route(
            "/user",
            get(handlers::account::account_actions).post(handlers::account::support_actions),
        )
        .route("/user/biography", put(handlers::account::update_biography))
        .route("/user/logout", post(handlers::account::logout))
        // Administrator routes
        .route(
            "/admin",
            get(handlers::admin::admin_actions).put(handlers::admin::ban_user),
        )
        // Community Q&A routes
        .route(
            "/community",
            get(handlers::community::community_reads)
                .post(handlers::community::community_mutations),
        )
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/two-factor", post(handlers::auth::verify_two_factor))
        .route(
            "/reset-password-email",
            post(handlers::auth::request_password_reset),
        )
        .route(
            "/reset-password-update",
            post(handlers::auth::update_password),
        )
}
