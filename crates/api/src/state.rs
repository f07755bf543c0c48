use std::sync::Arc;

use devdocs_ai::AiClient;

use crate::config::ServerConfig;
use crate::settings_cache::SettingsCache;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: devdocs_db::DbPool,
    /// Server configuration (accessed by auth middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// AI provider client. `None` when `AI_API_KEY` is absent, in which
    /// case the AI endpoints answer 503 instead of the server refusing
    /// to boot.
    pub ai: Option<Arc<AiClient>>,
    /// TTL cache over the assembled site settings document.
    pub settings_cache: Arc<SettingsCache>,
}
