//! Request throttling for mutating routes.
//!
//! The limiter is an injected component so an in-process fixed window can be
//! swapped for a shared store without touching the routes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderValue, Method, header::RETRY_AFTER},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use tally_shared::{AppError, Claims};
use tracing::warn;

use crate::AppState;
use crate::error::ApiError;

/// Outcome of a throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The request may proceed.
    Allow,
    /// The caller must wait before retrying.
    Deny {
        /// Whole seconds until the window resets, at least 1.
        retry_after_secs: u64,
    },
}

/// Decides whether a keyed request may proceed.
pub trait RateLimiter: Send + Sync {
    /// Records one request for `key` and returns whether it is allowed.
    fn check(&self, key: &str) -> RateDecision;
}

/// Time source for the limiter.
pub type Clock = Arc<dyn Fn() -> Instant + Send + Sync>;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    count: u32,
    reset_at: Instant,
}

/// In-memory fixed-window limiter: `max_requests` per key per `window`.
pub struct FixedWindowRateLimiter {
    max_requests: u32,
    window: Duration,
    buckets: DashMap<String, Bucket>,
    clock: Clock,
}

impl FixedWindowRateLimiter {
    /// Creates a limiter driven by the system clock.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self::with_clock(max_requests, window, Arc::new(Instant::now))
    }

    /// Creates a limiter with a custom time source.
    #[must_use]
    pub fn with_clock(max_requests: u32, window: Duration, clock: Clock) -> Self {
        Self {
            max_requests,
            window,
            buckets: DashMap::new(),
            clock,
        }
    }
}

impl std::fmt::Debug for FixedWindowRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedWindowRateLimiter")
            .field("max_requests", &self.max_requests)
            .field("window", &self.window)
            .field("buckets", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn check(&self, key: &str) -> RateDecision {
        let now = (self.clock)();
        let mut bucket = self.buckets.entry(key.to_owned()).or_insert(Bucket {
            count: 0,
            reset_at: now + self.window,
        });

        if bucket.reset_at <= now {
            *bucket = Bucket {
                count: 0,
                reset_at: now + self.window,
            };
        }

        if bucket.count >= self.max_requests {
            let remaining = bucket.reset_at.saturating_duration_since(now);
            let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            return RateDecision::Deny {
                retry_after_secs: secs.max(1),
            };
        }

        bucket.count += 1;
        RateDecision::Allow
    }
}

/// Throttles mutating requests per route and caller.
///
/// Must run inside `auth_middleware`; the key is `"{method} {route}:{user_id}"`.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if matches!(*request.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return next.run(request).await;
    }

    let Some(user_id) = request.extensions().get::<Claims>().map(Claims::user_id) else {
        return next.run(request).await;
    };

    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path().to_owned(), |p| p.as_str().to_owned());
    let key = format!("{} {route}:{user_id}", request.method());

    match state.rate_limiter.check(&key) {
        RateDecision::Allow => next.run(request).await,
        RateDecision::Deny { retry_after_secs } => {
            warn!(user_id = %user_id, route = %route, retry_after_secs, "Request throttled");
            let mut response = ApiError(AppError::RateLimited(
                "Too many requests. Please slow down.".to_string(),
            ))
            .into_response();
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));
            response
        }
    }
}
