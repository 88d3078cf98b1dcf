//! HTTP middleware.
//!
//! Each helper takes a router and returns it wrapped, so the stacking order
//! stays visible in [`crate::create_router`].

mod rate_limit;
mod security;
mod timeout;

pub use rate_limit::{RateLimiter, with_rate_limit};
pub use security::with_security_headers;
pub use timeout::with_timeout;
