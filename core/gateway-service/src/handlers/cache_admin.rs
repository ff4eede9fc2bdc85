// core/gateway-service/src/handlers/cache_admin.rs
// Cache administration: list keys and flush everything

use actix_web::{web, HttpRequest, HttpResponse};
use cachegate_common::{log_failure, ServiceError};
use serde::Serialize;

use super::request_context;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CacheKeysResponse {
    pub success: bool,
    pub count: usize,
    pub keys: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FlushResponse {
    pub success: bool,
    pub message: String,
}

/// `GET /cache/keys`, unfiltered and in no particular order
pub async fn list_keys(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let ctx = request_context(&req, "/cache/keys");

    let keys = state.cache.keys().await.map_err(|e| {
        log_failure(&ctx, "list cache keys", &e.to_string());
        ServiceError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(CacheKeysResponse {
        success: true,
        count: keys.len(),
        keys,
    }))
}

/// `DELETE /cache`
pub async fn flush_cache(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let ctx = request_context(&req, "/cache");

    state.cache.flush_all().await.map_err(|e| {
        log_failure(&ctx, "flush cache", &e.to_string());
        ServiceError::from(e)
    })?;

    tracing::info!(request_id = %ctx.request_id, "All cache entries cleared");

    Ok(HttpResponse::Ok().json(FlushResponse {
        success: true,
        message: "All cache entries cleared".to_string(),
    }))
}
