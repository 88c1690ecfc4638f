//! Token freshness checks.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Returns true if a token created at `created_at` is older than `ttl` at `now`.
///
/// Times are whole seconds since the Unix epoch. A creation time in the
/// future counts as age zero.
pub fn is_expired(created_at: u64, ttl: Duration, now: u64) -> bool {
    now.saturating_sub(created_at) > ttl.as_secs()
}

/// Current wall-clock time in seconds since the Unix epoch.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
