//! HTTP client creation and configuration utilities

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;

use crate::error::AppError;

/// Creates the HTTP client shared by every request of a `VsportsClient`.
///
/// The API key is installed as a default `Authorization: Bearer` header, so
/// it is attached to each outgoing request without being passed around.
/// The header is marked sensitive to keep it out of debug output.
///
/// # Errors
/// * `AppError::InvalidInput` - the key contains characters not allowed in a header
/// * `AppError::ApiFetch` - the underlying client could not be built
pub fn create_http_client(api_key: &str, timeout_seconds: u64) -> Result<Client, AppError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| AppError::invalid_input("api_key", "contains characters not allowed in an HTTP header"))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
