// core/gateway-service/src/routes.rs
// Route table

use actix_web::web;
use cachegate_common::ServiceError;

use crate::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ServiceError::MalformedQuery(err.to_string()).into()
    }))
    .route("/", web::get().to(handlers::status))
    // Health and metrics
    .route("/health", web::get().to(handlers::health::health_check))
    .route("/readiness", web::get().to(handlers::health::readiness_probe))
    .route("/metrics", web::get().to(handlers::metrics::metrics_handler))
    // Cache-aside queries
    .route("/games", web::get().to(handlers::games::get_games))
    .route("/pokemon", web::get().to(handlers::pokemon::get_pokemon))
    // Cache administration
    .route("/cache/keys", web::get().to(handlers::cache_admin::list_keys))
    .route("/cache", web::delete().to(handlers::cache_admin::flush_cache));
}
