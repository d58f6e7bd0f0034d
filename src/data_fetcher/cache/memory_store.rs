use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::error::CacheError;
use super::store::ResponseStore;
use super::types::CachedResponse;

/// In-process LRU store with TTL support. Least recently used entries are
/// dropped once `capacity` is reached; expired entries are dropped on read.
pub struct MemoryStore {
    entries: RwLock<LruCache<String, CachedResponse>>,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Number of entries currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn capacity(&self) -> usize {
        self.entries.read().await.cap().get()
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // LruCache::get updates recency, so even reads need the write lock
        let mut entries = self.entries.write().await;

        let Some(entry) = entries.get(key) else {
            debug!("Cache miss: key={}", key);
            return Ok(None);
        };

        if entry.is_expired() {
            warn!(
                "Removing expired cache entry: key={}, age={:?}, ttl={:?}",
                key,
                entry.cached_at.elapsed(),
                entry.ttl()
            );
            entries.pop(key);
            return Ok(None);
        }

        debug!(
            "Cache hit: key={}, data_size={}, expires_in={:?}",
            key,
            entry.data.len(),
            entry.time_until_expiry()
        );
        Ok(Some(entry.data.clone()))
    }

    #[instrument(skip(self, value), fields(data_size = value.len()))]
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        entries.put(key.to_string(), CachedResponse::new(value, ttl_seconds));
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.entries.write().await.clear();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new(10);
        store
            .set("vsports:teams/1:null", r#"{"name":"Benfica"}"#.to_string(), 60)
            .await
            .unwrap();

        let value = store.get("vsports:teams/1:null").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"name":"Benfica"}"#));
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = MemoryStore::new(10);
        assert!(store.get("vsports:teams/2:null").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_evicted_on_read() {
        let store = MemoryStore::new(10);
        store.set("key", "[]".to_string(), 1).await.unwrap();
        assert_eq!(store.len().await, 1);

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(store.get("key").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_least_recently_used_entry_is_dropped() {
        let store = MemoryStore::new(2);
        store.set("a", "1".to_string(), 60).await.unwrap();
        store.set("b", "2".to_string(), 60).await.unwrap();

        // Touch "a" so "b" becomes the eviction candidate
        assert!(store.get("a").await.unwrap().is_some());
        store.set("c", "3".to_string(), 60).await.unwrap();

        assert!(store.get("a").await.unwrap().is_some());
        assert!(store.get("b").await.unwrap().is_none());
        assert!(store.get("c").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let store = MemoryStore::new(0);
        assert_eq!(store.capacity().await, 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryStore::new(10);
        store.set("a", "1".to_string(), 60).await.unwrap();
        store.set("b", "2".to_string(), 60).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }
}
