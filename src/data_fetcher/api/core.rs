use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::fetch_utils::{RemoteResponse, fetch_remote};
use super::http_client::create_http_client;
use super::request::ApiRequest;
use super::urls::build_url;
use crate::config::{CacheConfig, Config, validation::validate_base_url};
use crate::constants::{DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECONDS, cache::DEFAULT_TTL_SECONDS};
use crate::data_fetcher::cache::{CacheError, ResponseStore, create_store};
use crate::error::AppError;

/// Client for the Vsports API with an optional read-through cache.
///
/// The API key is fixed at construction and sent as a bearer token on every
/// request. Every lookup takes a `usecache` flag; it only has an effect when
/// the client was built with a cache, and a cache that fails at runtime is
/// bypassed rather than reported.
///
/// # Example
/// ```rust,no_run
/// use vsports::{CacheConfig, VsportsClient};
///
/// # async fn run() -> Result<(), vsports::AppError> {
/// let client = VsportsClient::new("your_token_here", Some(CacheConfig::default()))?;
///
/// let events = client.events_by_date("2025-01-24", true).await?;
/// println!("{}", serde_json::to_string_pretty(&events)?);
///
/// let teams = client.teams_by_tournament(118, true).await?;
/// for team in teams.as_array().into_iter().flatten() {
///     println!("{}", team["name"]);
/// }
/// # Ok(())
/// # }
/// ```
pub struct VsportsClient {
    http: Client,
    base_url: String,
    api_key: String,
    store: Option<Arc<dyn ResponseStore>>,
    ttl_seconds: u64,
}

impl fmt::Debug for VsportsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VsportsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &mask_api_key(&self.api_key))
            .field("cache", &self.store.as_ref().map(|s| s.name()))
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

/// Shows only the last four characters of a key
pub fn mask_api_key(api_key: &str) -> String {
    let count = api_key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = api_key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

impl VsportsClient {
    /// Creates a client against the production API with the default timeout.
    /// Passing `None` for `cache` disables caching.
    pub fn new(api_key: impl Into<String>, cache: Option<CacheConfig>) -> Result<Self, AppError> {
        let mut builder = Self::builder(api_key);
        if let Some(cache) = cache {
            builder = builder.cache(cache);
        }
        builder.build()
    }

    pub fn builder(api_key: impl Into<String>) -> VsportsClientBuilder {
        VsportsClientBuilder::new(api_key)
    }

    /// Creates a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let mut builder = Self::builder(config.api_key.clone())
            .base_url(config.base_url.clone())
            .timeout_seconds(config.http_timeout_seconds);
        if let Some(cache) = &config.cache {
            builder = builder.cache(cache.clone());
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub fn cache_ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Runs a request through the read-through cache.
    ///
    /// With `usecache` set and a cache configured, a stored response for the
    /// request fingerprint is returned without contacting the API. Otherwise
    /// the API is called once; a 200 response is stored (when `usecache` is
    /// set) and returned, any other 2xx yields `Value::Null`.
    ///
    /// With `usecache` unset the cache is neither read nor written.
    #[instrument(skip(self, request), fields(endpoint = %request.endpoint))]
    pub async fn fetch(&self, request: &ApiRequest, usecache: bool) -> Result<Value, AppError> {
        let cache = match (&self.store, usecache) {
            (Some(store), true) => Some((store.as_ref(), request.fingerprint())),
            _ => None,
        };

        if let Some((store, key)) = &cache
            && let Some(cached) = self.read_cached(*store, key).await
        {
            return Ok(cached);
        }

        let url = build_url(&self.base_url, &request.endpoint);
        match fetch_remote(&self.http, &url, &request.query_pairs()).await? {
            RemoteResponse::Json { value, body } => {
                if let Some((store, key)) = &cache {
                    self.write_cached(*store, key, body).await;
                }
                Ok(value)
            }
            RemoteResponse::Empty(status) => {
                info!("{} returned {status} with no payload", request.endpoint);
                Ok(Value::Null)
            }
        }
    }

    /// Reads a cached response directly. Returns `None` when caching is
    /// disabled, the key is absent, or the store fails.
    pub async fn get_cache(&self, key: &str) -> Option<Value> {
        let store = self.store.as_deref()?;
        self.read_cached(store, key).await
    }

    /// Writes a response directly under `key` with the configured TTL.
    /// A no-op when caching is disabled; store failures are logged.
    pub async fn set_cache(&self, key: &str, value: &Value) {
        let Some(store) = self.store.as_deref() else {
            return;
        };
        match serde_json::to_string(value) {
            Ok(body) => self.write_cached(store, key, body).await,
            Err(e) => warn!("Failed to serialize value for cache key {}: {}", key, e),
        }
    }

    /// Removes every cached response. Unlike lookups, this reports store
    /// failures since clearing is an explicit request.
    pub async fn clear_cache(&self) -> Result<(), CacheError> {
        match &self.store {
            Some(store) => store.clear().await,
            None => Ok(()),
        }
    }

    async fn read_cached(&self, store: &dyn ResponseStore, key: &str) -> Option<Value> {
        match store.get(key).await {
            Ok(Some(cached)) => match serde_json::from_str::<Value>(&cached) {
                Ok(value) => {
                    debug!("Using cached response for key: {key}");
                    Some(value)
                }
                Err(e) => {
                    warn!("Failed to parse cached response for key {}: {}", key, e);
                    None
                }
            },
            Ok(None) => {
                debug!("Cache miss for key: {key}");
                None
            }
            Err(e) => {
                warn!(
                    "{} cache unavailable, fetching from API instead: {}",
                    store.name(),
                    e
                );
                None
            }
        }
    }

    async fn write_cached(&self, store: &dyn ResponseStore, key: &str, body: String) {
        let size = body.len();
        match store.set(key, body, self.ttl_seconds).await {
            Ok(()) => debug!(
                "Cached response: key={}, data_size={}, ttl={}s",
                key, size, self.ttl_seconds
            ),
            Err(e) => warn!("Failed to cache response for key {}: {}", key, e),
        }
    }
}

/// A zero TTL would expire every entry on write.
fn validate_ttl(ttl_seconds: u64) -> Result<u64, AppError> {
    if ttl_seconds == 0 {
        return Err(AppError::invalid_input(
            "ttl",
            "cache TTL must be at least one second",
        ));
    }
    Ok(ttl_seconds)
}

/// Builder for [`VsportsClient`].
pub struct VsportsClientBuilder {
    api_key: String,
    base_url: String,
    timeout_seconds: u64,
    cache: Option<CacheConfig>,
    store: Option<(Arc<dyn ResponseStore>, u64)>,
}

impl VsportsClientBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            cache: None,
            store: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Enables caching with a store created from `config`
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = Some(config);
        self
    }

    /// Enables caching with a caller-provided store. Takes precedence over
    /// [`cache`](Self::cache).
    pub fn store(mut self, store: Arc<dyn ResponseStore>, ttl_seconds: u64) -> Self {
        self.store = Some((store, ttl_seconds));
        self
    }

    pub fn build(self) -> Result<VsportsClient, AppError> {
        let api_key = self.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(AppError::invalid_input("api_key", "API key cannot be empty"));
        }
        validate_base_url(&self.base_url)?;
        if self.timeout_seconds == 0 {
            return Err(AppError::invalid_input(
                "timeout_seconds",
                "timeout must be at least one second",
            ));
        }

        let http = create_http_client(&api_key, self.timeout_seconds)?;

        let (store, ttl_seconds) = match (self.store, self.cache) {
            (Some((store, ttl)), _) => (Some(store), validate_ttl(ttl)?),
            (None, Some(config)) => {
                if config.host.trim().is_empty() {
                    return Err(AppError::invalid_input("host", "cache host cannot be empty"));
                }
                validate_ttl(config.ttl)?;
                let store = create_store(&config).map_err(|e| {
                    AppError::config_error(format!("Invalid cache configuration: {e}"))
                })?;
                info!(
                    "Response cache enabled: backend={}, ttl={}s",
                    store.name(),
                    config.ttl
                );
                (Some(Arc::from(store)), config.ttl)
            }
            (None, None) => (None, DEFAULT_TTL_SECONDS),
        };

        Ok(VsportsClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key,
            store,
            ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::MemoryStore;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn memory_client(base_url: &str, store: Arc<MemoryStore>) -> VsportsClient {
        VsportsClient::builder("test_api_key")
            .base_url(base_url)
            .store(store, 60)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_rejects_empty_key() {
        let result = VsportsClient::new("   ", None);
        assert!(matches!(result, Err(AppError::InvalidInput { .. })));
    }

    #[test]
    fn test_builder_rejects_bad_base_url_and_timeout() {
        assert!(
            VsportsClient::builder("key")
                .base_url("ftp://example.com")
                .build()
                .is_err()
        );
        assert!(
            VsportsClient::builder("key")
                .timeout_seconds(0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_builder_rejects_zero_ttl_and_empty_cache_host() {
        let result = VsportsClient::new("key", Some(CacheConfig::memory(0)));
        assert!(matches!(result, Err(AppError::InvalidInput { .. })));

        let result = VsportsClient::builder("key")
            .cache(CacheConfig::default().with_ttl(0))
            .build();
        assert!(matches!(result, Err(AppError::InvalidInput { .. })));

        let result = VsportsClient::builder("key")
            .store(Arc::new(MemoryStore::new(4)), 0)
            .build();
        assert!(matches!(result, Err(AppError::InvalidInput { .. })));

        let result = VsportsClient::builder("key")
            .cache(CacheConfig::redis("  ", 6379, 0))
            .build();
        assert!(matches!(result, Err(AppError::InvalidInput { .. })));

        assert!(VsportsClient::new("key", Some(CacheConfig::memory(1))).is_ok());
    }

    #[test]
    fn test_new_without_cache_disables_caching() {
        let client = VsportsClient::new("key", None).unwrap();
        assert!(!client.is_cache_enabled());
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_new_with_cache_does_not_contact_store() {
        let client = VsportsClient::new("key", Some(CacheConfig::redis("127.0.0.1", 1, 0))).unwrap();
        assert!(client.is_cache_enabled());
        assert_eq!(client.cache_ttl_seconds(), 300);
    }

    #[test]
    fn test_debug_masks_api_key() {
        let client = VsportsClient::new("supersecretkey", None).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("supersecretkey"));
        assert!(debug.contains("tkey"));
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("abcdefgh"), "****efgh");
        assert_eq!(mask_api_key("abc"), "***");
        assert_eq!(mask_api_key(""), "");
    }

    #[tokio::test]
    async fn test_fetch_populates_cache_under_fingerprint() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Benfica"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemoryStore::new(10));
        let client = memory_client(&mock_server.uri(), store.clone());
        let request = ApiRequest::new("teams/6");

        let first = client.fetch(&request, true).await.unwrap();
        let second = client.fetch(&request, true).await.unwrap();

        assert_eq!(first, json!({"name": "Benfica"}));
        assert_eq!(first, second);
        assert_eq!(
            store.get("vsports:teams/6:null").await.unwrap().as_deref(),
            Some(r#"{"name":"Benfica"}"#)
        );
    }

    #[tokio::test]
    async fn test_fetch_without_usecache_skips_store() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Benfica"})))
            .expect(2)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemoryStore::new(10));
        let client = memory_client(&mock_server.uri(), store.clone());
        let request = ApiRequest::new("teams/6");

        client.fetch(&request, false).await.unwrap();
        client.fetch(&request, false).await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_falls_back_to_api() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/persons/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemoryStore::new(10));
        store
            .set("vsports:persons/9:null", "not json".to_string(), 60)
            .await
            .unwrap();
        let client = memory_client(&mock_server.uri(), store.clone());

        let value = client.fetch(&ApiRequest::new("persons/9"), true).await.unwrap();
        assert_eq!(value, json!({"id": 9}));
        // The fresh response replaced the corrupt entry
        assert_eq!(
            client.get_cache("vsports:persons/9:null").await,
            Some(json!({"id": 9}))
        );
    }

    #[tokio::test]
    async fn test_no_content_returns_null_and_is_not_cached() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/detailed"))
            .respond_with(ResponseTemplate::new(204))
            .expect(2)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemoryStore::new(10));
        let client = memory_client(&mock_server.uri(), store.clone());
        let request = ApiRequest::new("events/detailed");

        assert_eq!(client.fetch(&request, true).await.unwrap(), Value::Null);
        assert_eq!(client.fetch(&request, true).await.unwrap(), Value::Null);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_http_errors_are_not_cached() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/venues/3"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemoryStore::new(10));
        let client = memory_client(&mock_server.uri(), store.clone());
        let request = ApiRequest::new("venues/3");

        assert!(client.fetch(&request, true).await.is_err());
        assert!(client.fetch(&request, true).await.is_err());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_direct_cache_access() {
        let store = Arc::new(MemoryStore::new(10));
        let client = memory_client("http://127.0.0.1:1", store);

        assert_eq!(client.get_cache("vsports:custom:null").await, None);
        client
            .set_cache("vsports:custom:null", &json!([1, 2, 3]))
            .await;
        assert_eq!(
            client.get_cache("vsports:custom:null").await,
            Some(json!([1, 2, 3]))
        );

        client.clear_cache().await.unwrap();
        assert_eq!(client.get_cache("vsports:custom:null").await, None);
    }

    #[tokio::test]
    async fn test_direct_cache_access_without_cache() {
        let client = VsportsClient::new("key", None).unwrap();
        client.set_cache("vsports:custom:null", &json!({})).await;
        assert_eq!(client.get_cache("vsports:custom:null").await, None);
        assert!(client.clear_cache().await.is_ok());
    }
}
