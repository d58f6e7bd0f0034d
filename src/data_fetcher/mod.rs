pub mod api;
pub mod cache;

pub use api::{ApiRequest, EventsQuery, VsportsClient};
pub use cache::{ResponseStore, create_store};
