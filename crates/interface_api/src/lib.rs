//! HTTP API Layer
//!
//! This crate exposes the enrollment domain over REST using Axum. The API is
//! stateless: every request carries the snapshot it is evaluated against.
//!
//! # Architecture
//!
//! - **Handlers**: Eligibility, enrollment classification/confirmation, calendar
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use core_kernel::today_in_korea;
use domain_enrollment::EnrollmentService;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{calendar, eligibility, enrollments, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
}

impl AppState {
    /// Enrollment service with the configured rules and reference date
    pub fn service(&self) -> EnrollmentService {
        let reference_date = self.config.reference_date.unwrap_or_else(today_in_korea);
        EnrollmentService::new(self.config.rules.clone(), reference_date)
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(config: ApiConfig) -> Router {
    let state = AppState { config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check));

    let enrollment_routes = Router::new()
        .route("/classify", post(enrollments::classify))
        .route("/confirm", post(enrollments::confirm));

    // Protected API routes
    let api_routes = Router::new()
        .route("/eligibility/evaluate", post(eligibility::evaluate))
        .nest("/enrollments", enrollment_routes)
        .route("/calendar/adjacent-month", get(calendar::adjacent_month))
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
