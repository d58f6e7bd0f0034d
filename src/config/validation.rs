use crate::config::CacheConfig;
use crate::error::AppError;
use std::path::Path;

/// Checks that the base URL carries an http(s) scheme and a host.
pub fn validate_base_url(base_url: &str) -> Result<(), AppError> {
    if base_url.trim().is_empty() {
        return Err(AppError::config_error("Base URL cannot be empty"));
    }

    let host = base_url
        .strip_prefix("https://")
        .or_else(|| base_url.strip_prefix("http://"))
        .ok_or_else(|| {
            AppError::config_error(format!(
                "Base URL must start with http:// or https://, got '{base_url}'"
            ))
        })?;

    if host.trim_matches('/').is_empty() {
        return Err(AppError::config_error("Base URL has no host"));
    }

    Ok(())
}

/// Validates the configuration settings
///
/// # Validation Rules
/// - API key cannot be empty
/// - Base URL must be an http(s) URL
/// - HTTP timeout must be at least one second
/// - If log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
/// - If caching is configured, host cannot be empty and TTL must be positive
pub fn validate_config(
    api_key: &str,
    base_url: &str,
    http_timeout_seconds: u64,
    log_file_path: &Option<String>,
    cache: &Option<CacheConfig>,
) -> Result<(), AppError> {
    if api_key.trim().is_empty() {
        return Err(AppError::config_error("API key cannot be empty"));
    }

    validate_base_url(base_url)?;

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least one second",
        ));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    if let Some(cache) = cache {
        if cache.host.trim().is_empty() {
            return Err(AppError::config_error("Cache host cannot be empty"));
        }
        if cache.ttl == 0 {
            return Err(AppError::config_error("Cache TTL must be at least one second"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://extended.vsports.pt/api").is_ok());
        assert!(validate_base_url("http://localhost:8080").is_ok());

        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("extended.vsports.pt/api").is_err());
        assert!(validate_base_url("ftp://extended.vsports.pt").is_err());
        assert!(validate_base_url("https://").is_err());
    }

    #[test]
    fn test_validate_config_cache_rules() {
        let url = "https://extended.vsports.pt/api";

        assert!(validate_config("key", url, 10, &None, &Some(CacheConfig::default())).is_ok());

        let zero_ttl = CacheConfig::default().with_ttl(0);
        assert!(validate_config("key", url, 10, &None, &Some(zero_ttl)).is_err());

        let no_host = CacheConfig::redis("", 6379, 0);
        assert!(validate_config("key", url, 10, &None, &Some(no_host)).is_err());
    }

    #[test]
    fn test_validate_config_creates_log_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("nested").join("vsports.log");
        let log_path = Some(log_path.to_string_lossy().to_string());

        assert!(validate_config("key", "https://api.example.com", 10, &log_path, &None).is_ok());
        assert!(temp_dir.path().join("nested").exists());
    }
}
