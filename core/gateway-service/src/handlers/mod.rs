// core/gateway-service/src/handlers/mod.rs
// HTTP handlers: parameter validation and response shaping only

pub mod cache_admin;
pub mod games;
pub mod health;
pub mod metrics;
pub mod pokemon;

use actix_web::{HttpRequest, HttpResponse};
use cachegate_common::{generate_request_id, LogContext};
use serde_json::json;

/// Per-request log context carrying a fresh request id and the peer address
pub(crate) fn request_context(req: &HttpRequest, route: &str) -> LogContext {
    let ctx = LogContext::new(generate_request_id(), route);
    match req.peer_addr() {
        Some(addr) => ctx.with_ip(addr.ip().to_string()),
        None => ctx,
    }
}

/// `GET /` liveness check
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}
