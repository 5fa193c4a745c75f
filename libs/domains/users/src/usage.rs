//! Usage accounting for resolver operations.

use axum_helpers::RateUsage;
use tracing::info;

/// Record the rate-usage snapshot for one operation invocation.
///
/// Side-effect only; the snapshot never alters what the operation does.
pub fn record(operation: &str, usage: &RateUsage) {
    info!(
        operation,
        current = usage.current,
        limit = usage.limit,
        "Current API usage for {}: {}/{}",
        usage.client_id,
        usage.current,
        usage.limit
    );
}
