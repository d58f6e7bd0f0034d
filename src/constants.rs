//! Library-wide constants and default configuration values

/// Production base URL of the Vsports API
pub const DEFAULT_BASE_URL: &str = "https://extended.vsports.pt/api";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default cache settings, applied to fields omitted from the `[cache]` table
pub mod cache {
    /// Redis host
    pub const DEFAULT_HOST: &str = "localhost";

    /// Redis port
    pub const DEFAULT_PORT: u16 = 6379;

    /// Redis logical database index
    pub const DEFAULT_DB: i64 = 0;

    /// Entry lifetime (5 minutes)
    pub const DEFAULT_TTL_SECONDS: u64 = 300;

    /// Entry limit of the in-process store
    pub const DEFAULT_MEMORY_CAPACITY: usize = 100;

    /// Prefix shared by every fingerprint so keys do not collide with
    /// other data kept in the same Redis database
    pub const KEY_NAMESPACE: &str = "vsports";

    /// Upper bound on opening a Redis connection. Kept short so an
    /// unreachable store falls through to the remote API quickly.
    pub const REDIS_CONNECT_TIMEOUT_MS: u64 = 2000;
}

/// Environment variables that override config file values
pub mod env_vars {
    pub const API_KEY: &str = "VSPORTS_API_KEY";
    pub const BASE_URL: &str = "VSPORTS_BASE_URL";
    pub const HTTP_TIMEOUT: &str = "VSPORTS_HTTP_TIMEOUT";
    pub const LOG_FILE: &str = "VSPORTS_LOG_FILE";
}

/// Default log file name inside the log directory
pub const LOG_FILE_NAME: &str = "vsports.log";
