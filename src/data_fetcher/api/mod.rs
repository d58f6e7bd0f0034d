pub mod http_client;
pub mod request;
pub mod urls;
pub mod validation;
mod core;
mod endpoints;
mod fetch_utils;

// Re-export URL utilities
pub use urls::*;
// Re-export request types
pub use request::{ApiRequest, EventsQuery};
// Re-export the client
pub use self::core::{VsportsClient, VsportsClientBuilder, mask_api_key};
