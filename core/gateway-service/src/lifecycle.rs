// core/gateway-service/src/lifecycle.rs
// Startup connections, shutdown signal and connection release

use anyhow::Context;
use cachegate_common::{redact_url, CacheManager, CacheMode, CacheStore, MemoryCache, RedisCache, ServiceConfig};
use std::sync::Arc;

use crate::origin::{GamesRepository, PgGamesRepository};

/// Connect the configured cache backend. Redis must answer before this returns.
pub async fn connect_cache(config: &ServiceConfig) -> anyhow::Result<CacheManager> {
    let store: Arc<dyn CacheStore> = match config.cache_mode {
        CacheMode::Redis => {
            let redis = RedisCache::connect(&config.redis_url)
                .await
                .with_context(|| format!("failed to connect to Redis at {}", redact_url(&config.redis_url)))?;
            tracing::info!("Redis client connected");
            Arc::new(redis)
        }
        CacheMode::Local => {
            tracing::warn!("CACHE_MODE=local: using in-process cache, entries are not shared between instances");
            Arc::new(MemoryCache::new())
        }
    };

    Ok(CacheManager::new(store))
}

pub async fn connect_database(config: &ServiceConfig) -> anyhow::Result<PgGamesRepository> {
    let games = PgGamesRepository::connect(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("failed to connect to PostgreSQL at {}", redact_url(&config.database_url)))?;
    tracing::info!("Connected to PostgreSQL database");
    Ok(games)
}

/// Advisory only: the outcome is logged and never blocks startup.
pub async fn check_games_table(games: &dyn GamesRepository) {
    match games.games_table_exists().await {
        Ok(true) => tracing::info!("games table found"),
        Ok(false) => tracing::warn!("games table not found; /games will fail until it is created"),
        Err(e) => tracing::warn!(error = %e, "Could not check for games table"),
    }
}

/// Resolves on SIGINT or SIGTERM, returning the signal name
pub async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}

/// Close the cache connection, then the database pool.
///
/// The pool is closed even when `QUIT` fails; the cache error is still returned.
pub async fn release_connections(cache: &CacheManager, games: &dyn GamesRepository) -> anyhow::Result<()> {
    let quit = cache.quit().await;
    if quit.is_ok() {
        tracing::info!("Cache connection closed");
    }

    games.close().await;
    tracing::info!("PostgreSQL connection closed");

    quit.context("failed to close cache connection")
}

/// Release connections once serving has ended, however it ended.
///
/// A serving error takes precedence; a release failure behind it is only logged.
pub async fn release_after(
    outcome: anyhow::Result<()>,
    cache: &CacheManager,
    games: &dyn GamesRepository,
) -> anyhow::Result<()> {
    let released = release_connections(cache, games).await;
    match (outcome, released) {
        (Ok(()), released) => released,
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(release_err)) => {
            tracing::warn!(error = %format!("{:#}", release_err), "Failed to release connections");
            Err(e)
        }
    }
}
