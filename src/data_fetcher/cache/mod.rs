pub mod error;
pub mod fingerprint;
pub mod memory_store;
pub mod redis_store;
pub mod store;
pub mod types;

pub use error::CacheError;
pub use fingerprint::fingerprint;
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use store::ResponseStore;
pub use types::CachedResponse;

use crate::config::{CacheBackend, CacheConfig};

/// Creates the store selected by the cache configuration.
pub fn create_store(config: &CacheConfig) -> Result<Box<dyn ResponseStore>, CacheError> {
    Ok(match config.backend {
        CacheBackend::Redis => Box::new(RedisStore::new(config)?),
        CacheBackend::Memory => Box::new(MemoryStore::new(config.capacity)),
    })
}
