//! Redis-backed response store.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::error::CacheError;
use super::store::ResponseStore;
use crate::config::CacheConfig;
use crate::constants::cache::{KEY_NAMESPACE, REDIS_CONNECT_TIMEOUT_MS};

/// Redis store over a single multiplexed connection.
///
/// The connection is opened on first use rather than at construction, and
/// dropped again after a connection-level failure so the next call retries.
pub struct RedisStore {
    client: Client,
    url: String,
    connection: Mutex<Option<MultiplexedConnection>>,
    connect_timeout: Duration,
}

impl RedisStore {
    pub fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        let url = config.redis_url();
        let client = Client::open(url.as_str()).map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            url,
            connection: Mutex::new(None),
            connect_timeout: Duration::from_millis(REDIS_CONNECT_TIMEOUT_MS),
        })
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        let mut guard = self.connection.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        debug!("Opening Redis connection to {}", self.url);
        let conn = tokio::time::timeout(
            self.connect_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| {
            CacheError::Connection(format!(
                "timed out after {:?} connecting to {}",
                self.connect_timeout, self.url
            ))
        })??;

        info!("Connected to Redis at {}", self.url);
        *guard = Some(conn.clone());
        Ok(conn)
    }

    /// Forgets the cached connection after a connection-level failure.
    async fn reset_on_connection_error(&self, error: &CacheError) {
        if matches!(error, CacheError::Connection(_)) {
            warn!("Dropping Redis connection to {}: {}", self.url, error);
            self.connection.lock().await.take();
        }
    }
}

async fn clear_namespace(conn: &mut MultiplexedConnection) -> Result<(), CacheError> {
    let pattern = format!("{KEY_NAMESPACE}:*");
    let keys: Vec<String> = redis::cmd("KEYS").arg(&pattern).query_async(conn).await?;

    if !keys.is_empty() {
        info!("Removing {} cached responses from Redis", keys.len());
        conn.del::<_, ()>(keys).await?;
    }

    Ok(())
}

#[async_trait]
impl ResponseStore for RedisStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let result = conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(CacheError::from);
        if let Err(e) = &result {
            self.reset_on_connection_error(e).await;
        }
        result
    }

    #[instrument(skip(self, value), fields(data_size = value.len()))]
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let result = conn
            .set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(CacheError::from);
        if let Err(e) = &result {
            self.reset_on_connection_error(e).await;
        }
        result
    }

    /// Deletes every key in the `vsports:` namespace of the configured db.
    async fn clear(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let result = clear_namespace(&mut conn).await;
        if let Err(e) = &result {
            self.reset_on_connection_error(e).await;
        }
        result
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
