// core/gateway-service/src/state.rs
// Shared application state injected into handlers

use cachegate_common::CacheManager;
use std::sync::Arc;
use std::time::SystemTime;

use crate::origin::{GamesRepository, PageRequest};
use crate::resolver::Resolver;

/// Built once at startup and shared by every worker through `web::Data`.
pub struct AppState {
    pub resolver: Resolver,
    pub cache: CacheManager,
    pub games: Arc<dyn GamesRepository>,
    /// Used when `limit`/`offset` are absent or unparseable
    pub default_page: PageRequest,
    pub start_time: SystemTime,
}
