//! Fixed-window rate limiting for the proxy route.
//!
//! # Design Decisions
//! - Fixed window, not token bucket: buckets reset when the window elapses,
//!   so bursts up to 2x the nominal rate are possible at window boundaries.
//!   Accepted for this use case.
//! - One mutex guards the bucket map, making every lookup-and-update a
//!   single critical section; concurrent requests from one client cannot
//!   lose increments.
//! - The limiter is an owned value in AppState, not a module-level
//!   singleton, so tests construct their own and drive a fake clock.
//! - No eviction of stale client keys; the map grows with distinct client
//!   IPs over process lifetime (see DESIGN.md).

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::RateLimitConfig;
use crate::http::error::ProxyError;

struct Bucket {
    window_start: Instant,
    count: u32,
}

/// Per-client fixed-window request counter.
pub struct RateLimiter {
    buckets: Mutex<HashMap<IpAddr, Bucket>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            window: Duration::from_secs(config.window_secs),
            max_requests: config.max_requests,
        }
    }

    /// Admit or reject a request from the given client.
    pub fn admit(&self, client: IpAddr) -> bool {
        self.admit_at(client, Instant::now())
    }

    /// Admission decision at an explicit instant, for tests.
    fn admit_at(&self, client: IpAddr, now: Instant) -> bool {
        let mut buckets = self.buckets.lock().expect("rate limiter mutex poisoned");
        let bucket = buckets.entry(client).or_insert(Bucket {
            window_start: now,
            count: 0,
        });

        if now.duration_since(bucket.window_start) >= self.window {
            bucket.window_start = now;
            bucket.count = 1;
            return true;
        }

        if bucket.count < self.max_requests {
            bucket.count += 1;
            true
        } else {
            false
        }
    }
}

/// Middleware guarding the messages route.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Method rejection (405) happens before admission; a non-POST request
    // is never proxied and must not consume quota.
    if request.method() != axum::http::Method::POST {
        return next.run(request).await;
    }

    let client = addr.ip();
    if limiter.admit(client) {
        next.run(request).await
    } else {
        tracing::warn!(client = %client, "Rate limit exceeded");
        ProxyError::RateLimited.into_response()
    }
}
