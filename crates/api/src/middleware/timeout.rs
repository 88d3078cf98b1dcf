//! Per-request time limit.

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::{BoxError, Router};
use purchasefx_shared::AppError;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tracing::{error, warn};

use crate::error::ApiError;

/// Aborts handlers running longer than `secs` with `408`; zero disables it.
pub fn with_timeout<S>(router: Router<S>, secs: u64) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if secs == 0 {
        return router;
    }
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout_error))
            .layer(TimeoutLayer::new(Duration::from_secs(secs))),
    )
}

async fn handle_timeout_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        warn!("request timed out");
        ApiError(AppError::Timeout("request took too long".to_string()))
    } else {
        error!(error = %err, "unhandled middleware error");
        ApiError(AppError::Internal("internal server error".to_string()))
    }
}
