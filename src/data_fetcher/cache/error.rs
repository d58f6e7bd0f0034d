//! Cache error types.

use thiserror::Error;

/// Errors raised by a response store. The client logs these and falls back
/// to the remote API; they never reach library callers.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    Connection(String),

    #[error("Cache operation failed: {0}")]
    Operation(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout() {
            CacheError::Connection(e.to_string())
        } else {
            CacheError::Operation(e.to_string())
        }
    }
}
