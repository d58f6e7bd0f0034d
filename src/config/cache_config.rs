use crate::constants::cache;
use serde::{Deserialize, Serialize};

/// Which store backs the read-through cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// External Redis server addressed by host, port and db index
    #[default]
    Redis,
    /// In-process LRU map, lost when the process exits
    Memory,
}

/// Optional cache settings. When a client is built without one, caching is
/// disabled and every `usecache` flag is ignored.
///
/// Every field has a default, so an empty `[cache]` table enables a Redis
/// cache on `localhost:6379`, db 0, with a five minute TTL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db")]
    pub db: i64,
    /// Seconds until a cached response expires
    #[serde(default = "default_ttl")]
    pub ttl: u64,
    /// Entry limit, only used by the memory backend
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_host() -> String {
    cache::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    cache::DEFAULT_PORT
}

fn default_db() -> i64 {
    cache::DEFAULT_DB
}

fn default_ttl() -> u64 {
    cache::DEFAULT_TTL_SECONDS
}

fn default_capacity() -> usize {
    cache::DEFAULT_MEMORY_CAPACITY
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            backend: CacheBackend::default(),
            host: default_host(),
            port: default_port(),
            db: default_db(),
            ttl: default_ttl(),
            capacity: default_capacity(),
        }
    }
}

impl CacheConfig {
    /// Redis settings for the given address, default TTL
    pub fn redis(host: impl Into<String>, port: u16, db: i64) -> Self {
        CacheConfig {
            host: host.into(),
            port,
            db,
            ..Default::default()
        }
    }

    /// In-process cache with the given TTL
    pub fn memory(ttl: u64) -> Self {
        CacheConfig {
            backend: CacheBackend::Memory,
            ttl,
            ..Default::default()
        }
    }

    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = ttl;
        self
    }

    /// Connection URL in the form `redis://host:port/db`
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}
