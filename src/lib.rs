//! Client library for the Vsports sports-data API
//!
//! Wraps the Vsports HTTP API in one async method per resource (events by
//! date, teams by tournament, squads, standings, ...) and optionally puts a
//! read-through cache in front of it, backed by Redis or an in-process LRU.
//! Responses are returned as untyped [`serde_json::Value`]s.
//!
//! # Examples
//!
//! ```rust,no_run
//! use vsports::{CacheConfig, VsportsClient};
//! use vsports::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let cache = CacheConfig {
//!         host: "localhost".to_string(),
//!         port: 6379,
//!         db: 0,
//!         ttl: 300,
//!         ..Default::default()
//!     };
//!     let client = VsportsClient::new("your_token_here", Some(cache))?;
//!
//!     // First call goes to the API, the second one within five minutes
//!     // is served from Redis
//!     let events = client.events_by_date("2025-01-24", true).await?;
//!     let again = client.events_by_date("2025-01-24", true).await?;
//!     assert_eq!(events, again);
//!
//!     let squad = client.squads(6, true).await?;
//!     for member in squad["squad"].as_array().into_iter().flatten() {
//!         if member["type"] == "player" {
//!             println!("{} {}", member["first_name"], member["last_name"]);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;

// Re-export commonly used types for convenience
pub use config::{CacheBackend, CacheConfig, Config};
pub use data_fetcher::api::{ApiRequest, EventsQuery, VsportsClient, VsportsClientBuilder};
pub use data_fetcher::cache::{CacheError, MemoryStore, RedisStore, ResponseStore};
pub use error::AppError;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
