use crate::constants::{DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECONDS, LOG_FILE_NAME, env_vars};
use crate::data_fetcher::api::mask_api_key;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod cache_config;
pub mod paths;
pub mod validation;

pub use cache_config::{CacheBackend, CacheConfig};
use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the `vsports` binary and for
/// [`VsportsClient::from_config`](crate::VsportsClient::from_config).
///
/// ```toml
/// api_key = "your_token_here"
/// base_url = "https://extended.vsports.pt/api"
/// http_timeout_seconds = 10
///
/// [cache]
/// host = "localhost"
/// port = 6379
/// db = 0
/// ttl = 300
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Token sent as `Authorization: Bearer <api_key>`.
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the API, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP timeout in seconds for API requests. Defaults to 10 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// Response cache. Caching is disabled when the table is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            base_url: default_base_url(),
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
            cache: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `VSPORTS_API_KEY` - Override API key
    /// - `VSPORTS_BASE_URL` - Override base URL
    /// - `VSPORTS_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 10)
    /// - `VSPORTS_LOG_FILE` - Override log file path
    ///
    /// # Notes
    /// - Config file is stored in platform-specific config directory
    /// - Without a config file, `VSPORTS_API_KEY` alone is enough
    /// - Environment variables take precedence over config file
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(&get_config_path()).await
    }

    /// Loads configuration from `path`, applies environment overrides and
    /// validates the result.
    pub async fn load_with_overrides(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else if std::env::var(env_vars::API_KEY).is_ok() {
            Config::default()
        } else {
            return Err(AppError::config_error(format!(
                "No configuration file found at {path}. Set {} or run `vsports --set-api-key <KEY>`",
                env_vars::API_KEY
            )));
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Overrides fields with values from the environment, when set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var(env_vars::API_KEY) {
            self.api_key = api_key;
        }

        if let Ok(base_url) = std::env::var(env_vars::BASE_URL) {
            self.base_url = base_url;
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.api_key,
            &self.base_url,
            self.http_timeout_seconds,
            &self.log_file_path,
            &self.cache,
        )
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to_path(&get_config_path()).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - The API key is masked
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if !Path::new(&config_path).exists() {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            return Ok(());
        }

        let config = Config::load().await?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("API Key:");
        println!("{}", mask_api_key(&config.api_key));
        println!("────────────────────────────────────");
        println!("Base URL:");
        println!("{}", config.base_url);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Cache:");
        match &config.cache {
            Some(cache) if cache.backend == CacheBackend::Memory => {
                println!("in-process, {} entries, ttl {}s", cache.capacity, cache.ttl);
            }
            Some(cache) => println!("{} (ttl {}s)", cache.redis_url(), cache.ttl),
            None => println!("disabled"),
        }
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{LOG_FILE_NAME}");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and strips any
    /// trailing slash from the base URL.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(&Config {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without environment
    /// overrides or validation.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
