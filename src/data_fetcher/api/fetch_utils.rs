//! Remote GET with status mapping and JSON body parsing

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::error::AppError;

/// Outcome of a successful remote call
#[derive(Debug)]
pub(crate) enum RemoteResponse {
    /// 200 with a JSON body. `body` is the raw text, kept for caching.
    Json { value: Value, body: String },
    /// Any other 2xx status. Nothing to parse or cache.
    Empty(StatusCode),
}

/// Issues one GET request and parses the JSON body.
///
/// No retries are attempted: a timeout, a connection failure or a non-2xx
/// status is returned to the caller as the matching `AppError`.
///
/// # Arguments
/// * `client` - HTTP client carrying the credential header
/// * `url` - Endpoint URL without query string
/// * `query` - Query parameters appended by reqwest
#[instrument(skip(client, query))]
pub(crate) async fn fetch_remote(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<RemoteResponse, AppError> {
    let request = client.get(url).query(query).build()?;
    let full_url = request.url().to_string();
    info!("Fetching data from URL: {full_url}");

    let response = client.execute(request).await.map_err(|e| {
        error!("Request failed for URL {}: {}", full_url, e);
        if e.is_timeout() {
            AppError::network_timeout(&full_url)
        } else if e.is_connect() {
            AppError::network_connection(&full_url, e.to_string())
        } else {
            AppError::ApiFetch(e)
        }
    })?;

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        error!("HTTP {} - {} (URL: {})", status.as_u16(), reason, full_url);
        return Err(AppError::from_status(status.as_u16(), reason, &full_url));
    }

    if status != StatusCode::OK {
        debug!("Success status {status} without a payload to return");
        return Ok(RemoteResponse::Empty(status));
    }

    let body = response.text().await.map_err(|e| {
        error!("Failed to read response text from URL {}: {}", full_url, e);
        if e.is_timeout() {
            AppError::network_timeout(&full_url)
        } else {
            AppError::ApiFetch(e)
        }
    })?;

    debug!("Response length: {} bytes", body.len());

    match serde_json::from_str::<Value>(&body) {
        Ok(value) => Ok(RemoteResponse::Json { value, body }),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, full_url);
            error!(
                "Response text (first 200 chars): {}",
                body.chars().take(200).collect::<String>()
            );

            if body.trim().is_empty() {
                Err(AppError::api_no_data("Response body is empty", full_url))
            } else {
                Err(AppError::api_malformed_json(e.to_string(), full_url))
            }
        }
    }
}
