//! ResponseStore trait definition.

use async_trait::async_trait;

use super::error::CacheError;

/// Key-value store with per-entry expiration that backs the read-through
/// cache. Keys are request fingerprints, values are serialized JSON bodies.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Get a value, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value that expires after `ttl_seconds`.
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Remove every entry this store owns.
    async fn clear(&self) -> Result<(), CacheError>;

    /// Short backend name used in log lines.
    fn name(&self) -> &'static str;
}
