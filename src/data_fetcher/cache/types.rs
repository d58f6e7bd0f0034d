//! Cache data structures with TTL support

use std::time::{Duration, Instant};

/// Serialized JSON payload held by the in-process store
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub data: String,
    pub cached_at: Instant,
    pub ttl_seconds: u64,
}

impl CachedResponse {
    /// Creates a new cached response entry
    pub fn new(data: String, ttl_seconds: u64) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
            ttl_seconds,
        }
    }

    /// Checks if the cached data is expired
    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= self.ttl()
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Gets the remaining time until expiration
    pub fn time_until_expiry(&self) -> Duration {
        self.ttl().saturating_sub(self.cached_at.elapsed())
    }
}
