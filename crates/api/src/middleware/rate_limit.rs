//! Global request rate limit.

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use purchasefx_shared::AppError;
use tracing::warn;

use crate::error::ApiError;

/// One quota shared by every route, regardless of caller.
pub struct RateLimiter {
    limiter: GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl RateLimiter {
    /// Allows bursts of `requests_per_minute`, replenished over a minute.
    ///
    /// Returns `None` for zero, meaning no limit applies.
    #[must_use]
    pub fn per_minute(requests_per_minute: u64) -> Option<Self> {
        let per_minute = u32::try_from(requests_per_minute).unwrap_or(u32::MAX);
        let per_minute = NonZeroU32::new(per_minute)?;
        Some(Self {
            limiter: GovernorRateLimiter::direct(Quota::per_minute(per_minute)),
        })
    }

    /// Takes one cell from the quota; false when it is exhausted.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

async fn rate_limit(State(limiter): State<Arc<RateLimiter>>, request: Request, next: Next) -> Response {
    if limiter.try_acquire() {
        return next.run(request).await;
    }
    warn!(path = %request.uri().path(), "rate limit exceeded");
    ApiError(AppError::TooManyRequests("rate limit exceeded".to_string())).into_response()
}

/// Rejects requests beyond `per_minute` with `429`; zero leaves the router as is.
pub fn with_rate_limit<S>(router: Router<S>, per_minute: u64) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    match RateLimiter::per_minute(per_minute) {
        Some(limiter) => router.layer(from_fn_with_state(Arc::new(limiter), rate_limit)),
        None => router,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_exhausted_after_burst() {
        let limiter = RateLimiter::per_minute(2).unwrap();
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn test_zero_disables_limiting() {
        assert!(RateLimiter::per_minute(0).is_none());
    }

    #[test]
    fn test_oversized_limit_saturates() {
        let limiter = RateLimiter::per_minute(u64::MAX).unwrap();
        for _ in 0..1000 {
            assert!(limiter.try_acquire());
        }
    }
}
