// core/gateway-service/src/main.rs
// CacheGate - cache-aside HTTP gateway over PostgreSQL and PokeAPI

mod cache_key;
mod handlers;
mod lifecycle;
mod origin;
mod resolver;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use anyhow::Context;
use cachegate_common::{
    init_console_logging, init_logging, CacheManager, CacheMetrics, MetricsMiddleware, ServiceConfig,
    ServiceMetrics,
};
use dotenv::dotenv;
use prometheus::Registry;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::SystemTime;

use crate::origin::{GamesRepository, HttpPokemonClient, PageRequest};
use crate::resolver::{Resolver, TtlPolicy};
use crate::state::AppState;

pub(crate) const SERVICE_NAME: &str = "cachegate";

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let config = ServiceConfig::from_env();
    if config.environment.uses_json_logs() {
        init_logging(SERVICE_NAME);
    } else {
        init_console_logging(SERVICE_NAME);
    }

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "CacheGate stopped with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    tracing::info!(environment = ?config.environment, cache_mode = ?config.cache_mode, "Starting CacheGate");

    // Both connections must be up before accepting traffic
    let cache = lifecycle::connect_cache(&config).await?;
    let games: Arc<dyn GamesRepository> = match lifecycle::connect_database(&config).await {
        Ok(games) => Arc::new(games),
        Err(e) => {
            if let Err(quit_err) = cache.quit().await {
                tracing::warn!(error = %quit_err, "Failed to close cache connection after startup failure");
            }
            return Err(e);
        }
    };
    lifecycle::check_games_table(games.as_ref()).await;

    let outcome = serve(config, cache.clone(), games.clone()).await;
    lifecycle::release_after(outcome, &cache, games.as_ref()).await
}

/// Build the app over open connections and serve until a shutdown signal
async fn serve(config: ServiceConfig, cache: CacheManager, games: Arc<dyn GamesRepository>) -> anyhow::Result<()> {
    let pokemon = HttpPokemonClient::new(config.pokemon_api_base_url.clone(), config.upstream_timeout)
        .context("failed to build PokeAPI client")?;

    let registry = Registry::new();
    let service_metrics =
        ServiceMetrics::new(&registry, SERVICE_NAME).context("failed to register service metrics")?;
    let cache_metrics =
        CacheMetrics::new(&registry, SERVICE_NAME).context("failed to register cache metrics")?;

    let ttl = TtlPolicy {
        games: config.games_cache_ttl,
        pokemon: config.pokemon_cache_ttl,
    };
    let resolver = Resolver::new(cache.clone(), games.clone(), Arc::new(pokemon), ttl, cache_metrics);

    let state = web::Data::new(AppState {
        resolver,
        cache,
        games,
        default_page: PageRequest {
            limit: config.default_page_limit,
            offset: config.default_page_offset,
        },
        start_time: SystemTime::now(),
    });
    let registry = web::Data::new(registry);
    let cors_origins = config.cors_allowed_origins.clone();

    let (host, port) = config.bind_address();
    let bound = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_origins))
            .wrap(MetricsMiddleware::new(service_metrics.clone()))
            // Security headers
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Frame-Options", "DENY"))
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Content-Security-Policy", "default-src 'self'")),
            )
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(registry.clone())
            .configure(routes::configure_routes)
    })
    .disable_signals()
    .shutdown_timeout(config.shutdown_timeout_secs)
    .bind((host.clone(), port));

    let server = bound
        .with_context(|| format!("failed to bind {}:{}", host, port))?
        .run();

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        let signal = lifecycle::shutdown_signal().await;
        tracing::info!(signal, "Shutdown signal received, draining in-flight requests");
        handle.stop(true).await;
    });

    tracing::info!("Server is running on http://{}:{}", host, port);
    tracing::info!("  GET    /games?genre=Action");
    tracing::info!("  GET    /pokemon?limit=10&offset=0");
    tracing::info!("  GET    /cache/keys");
    tracing::info!("  DELETE /cache");

    server.await.context("HTTP server failed")
}

/// Permissive when no origins are configured
fn build_cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }

    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}
