// core/gateway-service/src/handlers/health.rs
// Health check endpoints

use actix_web::{http::StatusCode, web, HttpResponse};
use cachegate_common::{check_cache_health, HealthResponse, ReadinessProbe};

use crate::state::AppState;
use crate::SERVICE_NAME;

/// Health check endpoint - per-dependency status, worst one wins
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let mut health = HealthResponse::new(
        SERVICE_NAME.to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
        state.start_time,
    );

    health.add_dependency(state.games.health().await);
    health.add_dependency(check_cache_health(&state.cache).await);

    HttpResponse::Ok().json(health)
}

/// Readiness probe - is the service ready to accept traffic?
pub async fn readiness_probe(state: web::Data<AppState>) -> HttpResponse {
    let probe = ReadinessProbe::from_dependencies(vec![
        state.games.health().await,
        check_cache_health(&state.cache).await,
    ]);

    let status = if probe.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status).json(probe)
}

#[cfg(test)]
mod tests {
    use crate::routes::configure_routes;
    use crate::test_support::{app_state, memory_cache, FailingCache, FakeGames, FakePokemon};
    use actix_web::{test, App};
    use cachegate_common::CacheManager;
    use serde_json::Value;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_status_root() {
        let state = app_state(memory_cache(), Arc::new(FakeGames::default()), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({"status": "OK"}));
    }

    #[actix_web::test]
    async fn test_health_reports_dependencies() {
        let state = app_state(memory_cache(), Arc::new(FakeGames::default()), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["service"], "cachegate");
        assert_eq!(body["status"], "healthy");

        let names: Vec<&str> = body["dependencies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["database", "cache (local)"]);
    }

    #[actix_web::test]
    async fn test_readiness_fails_when_cache_is_down() {
        let cache = CacheManager::new(Arc::new(FailingCache));
        let state = app_state(cache, Arc::new(FakeGames::default()), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/readiness").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["ready"], false);
    }

    #[actix_web::test]
    async fn test_readiness_ok_when_dependencies_healthy() {
        let state = app_state(memory_cache(), Arc::new(FakeGames::default()), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/readiness").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }
}
