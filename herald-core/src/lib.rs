use std::sync::Arc;

use herald_database::Database;

/// Narrow capability surface over the Discord REST API.
pub mod api;
/// Typed failures of outbound Discord calls.
pub mod error;
/// `DiscordApi` backed by the twilight HTTP client.
pub mod http;
/// Plain view models handed to command handlers.
pub mod model;

pub use api::DiscordApi;
pub use error::ApiError;
pub use http::HttpApi;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub api: Arc<dyn DiscordApi>,
    pub db: Database,
}

impl Context {
    /// Create a new application context.
    pub fn new(api: Arc<dyn DiscordApi>, db: Database) -> Self {
        Self { api, db }
    }
}
