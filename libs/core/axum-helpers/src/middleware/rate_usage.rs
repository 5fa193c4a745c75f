//! Fixed-window request accounting middleware.
//!
//! Counts requests per client per window, attaches a read-only [`RateUsage`]
//! snapshot to the request extensions for downstream handlers, and rejects
//! requests once the window ceiling is exceeded.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tokio::sync::RwLock;

use crate::errors::error_response;

/// Read-only usage snapshot for one request.
///
/// Attached to request extensions by [`track_usage`] and consumed by
/// handlers as context. It never alters control flow downstream of the
/// middleware itself.
#[derive(Debug, Clone)]
pub struct RateUsage {
    /// Best-effort client identity (peer IP or forwarded-for address)
    pub client_id: String,
    /// Requests counted for this client in the current window, including this one
    pub current: u64,
    /// Window ceiling
    pub limit: u64,
}

#[derive(Debug)]
struct Window {
    started_at: Instant,
    count: u64,
}

/// Per-client fixed-window request counter.
#[derive(Clone)]
pub struct RateUsageTracker {
    window: Duration,
    max_requests: u64,
    windows: Arc<RwLock<HashMap<String, Window>>>,
}

impl RateUsageTracker {
    pub fn new(window: Duration, max_requests: u64) -> Self {
        Self {
            window,
            max_requests,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Count one request for the client and return the resulting snapshot.
    ///
    /// Rolls the client's window over when it has expired.
    pub async fn observe(&self, client_id: &str) -> RateUsage {
        let mut windows = self.windows.write().await;
        let now = Instant::now();

        let window = windows.entry(client_id.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(window.started_at) >= self.window {
            window.started_at = now;
            window.count = 0;
        }

        window.count += 1;

        RateUsage {
            client_id: client_id.to_string(),
            current: window.count,
            limit: self.max_requests,
        }
    }
}

/// Middleware that records per-client usage and rejects over-limit requests.
///
/// Install with `axum::middleware::from_fn_with_state` on the whole router
/// so every request is counted.
pub async fn track_usage(
    State(tracker): State<RateUsageTracker>,
    mut request: Request,
    next: Next,
) -> Response {
    let client_id = client_id(&request);
    let usage = tracker.observe(&client_id).await;

    if usage.current > usage.limit {
        tracing::warn!(
            client = %client_id,
            current = usage.current,
            limit = usage.limit,
            "Rate limit reached"
        );
        return error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests, please try again later.".to_string(),
            "RATE_LIMITED",
        );
    }

    request.extensions_mut().insert(usage);
    next.run(request).await
}

/// Best-effort client identity: first X-Forwarded-For entry, then peer address.
fn client_id(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(ip) = forwarded
            .split(',')
            .next()
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
