//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for recording and converting purchases
//! - Security header, rate limit and timeout middleware
//! - Mapping of domain failures to HTTP responses

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use purchasefx_core::ReconciliationService;
use purchasefx_shared::config::ServerConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Stores transactions and converts them with historical rates.
    pub reconciliation: Arc<ReconciliationService>,
}

impl AppState {
    /// Creates the state around a reconciliation service.
    #[must_use]
    pub fn new(reconciliation: ReconciliationService) -> Self {
        Self {
            reconciliation: Arc::new(reconciliation),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new().nest("/api/v1", routes::api_routes());
    let router = middleware::with_timeout(router, config.request_timeout_secs);
    let router = middleware::with_rate_limit(router, config.rate_limit_per_minute);

    middleware::with_security_headers(router)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
