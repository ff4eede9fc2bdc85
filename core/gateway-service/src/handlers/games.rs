// core/gateway-service/src/handlers/games.rs
// GET /games?genre=<genre>

use actix_web::{web, HttpRequest, HttpResponse};
use cachegate_common::{log_cache_outcome, log_failure, log_validation_error, require_param, ServiceError};
use serde::{Deserialize, Serialize};

use super::request_context;
use crate::origin::GameRecord;
use crate::resolver::{ResolveError, Source};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GamesQuery {
    pub genre: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GamesResponse {
    pub source: Source,
    pub genre: String,
    pub duration: u64,
    /// Present only when the rows came from the database
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: Vec<GameRecord>,
}

pub async fn get_games(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<GamesQuery>,
) -> Result<HttpResponse, ServiceError> {
    let ctx = request_context(&req, "/games");

    let genre = require_param("genre", query.genre.as_deref(), "Action").map_err(|e| {
        log_validation_error(&ctx, "genre", &e.to_string());
        ServiceError::from(e)
    })?;

    let resolved = state.resolver.games_by_genre(genre).await.map_err(|e| match e {
        ResolveError::NotFound(_) => ServiceError::NotFound(format!("No games found for genre: {}", genre)),
        other => {
            log_failure(&ctx, "resolve games", &other.to_string());
            other.into()
        }
    })?;

    log_cache_outcome(&ctx, resolved.key.as_str(), resolved.source.as_str(), resolved.duration_ms());

    let count = (resolved.source == Source::Origin).then(|| resolved.data.len());
    Ok(HttpResponse::Ok().json(GamesResponse {
        source: resolved.source,
        genre: genre.to_string(),
        duration: resolved.duration_ms(),
        count,
        data: resolved.data,
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::configure_routes;
    use crate::test_support::{app_state, game, memory_cache, FailingCache, FakeGames, FakePokemon, WriteFailingCache};
    use actix_web::{test, App};
    use cachegate_common::CacheManager;
    use serde_json::Value;
    use std::sync::Arc;

    fn action_games() -> Arc<FakeGames> {
        Arc::new(FakeGames::with_rows(
            "Action",
            vec![game("Half-Life 2", "Action", 2004), game("Doom", "Action", 1993)],
        ))
    }

    #[actix_web::test]
    async fn test_missing_genre_is_rejected_before_resolving() {
        let games = action_games();
        let cache = memory_cache();
        let state = app_state(cache.clone(), games.clone(), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        for uri in ["/games", "/games?genre="] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "Missing required parameter");
            assert_eq!(body["message"], "Please provide a genre (e.g., ?genre=Action)");
        }

        assert_eq!(games.calls(), 0);
        assert!(cache.keys().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_second_request_is_served_from_cache() {
        let games = action_games();
        let state = app_state(memory_cache(), games.clone(), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/games?genre=Action").to_request();
        let first: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(first["source"], "origin");
        assert_eq!(first["genre"], "Action");
        assert_eq!(first["count"], 2);
        assert!(first["duration"].is_u64());

        let req = test::TestRequest::get().uri("/games?genre=Action").to_request();
        let second: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(second["source"], "cache");
        assert!(second.get("count").is_none());
        assert_eq!(second["data"], first["data"]);
        assert_eq!(first["data"][0]["name"], "Half-Life 2");

        assert_eq!(games.calls(), 1);
    }

    #[actix_web::test]
    async fn test_unknown_genre_is_404_and_not_cached() {
        let games = action_games();
        let cache = memory_cache();
        let state = app_state(cache.clone(), games.clone(), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        for _ in 0..2 {
            let req = test::TestRequest::get().uri("/games?genre=NonexistentGenre").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 404);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "No games found for genre: NonexistentGenre");
        }

        assert_eq!(games.calls(), 2);
        assert!(cache.keys().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_database_failure_is_500() {
        let state = app_state(memory_cache(), Arc::new(FakeGames::failing()), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/games?genre=Action").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body["message"].is_string());
    }

    #[actix_web::test]
    async fn test_cache_failure_is_500_without_origin_call() {
        let games = action_games();
        let cache = CacheManager::new(Arc::new(FailingCache));
        let state = app_state(cache, games.clone(), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/games?genre=Action").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);
        assert_eq!(games.calls(), 0);
    }

    #[actix_web::test]
    async fn test_cache_write_failure_is_500_after_origin_call() {
        let games = action_games();
        let cache = CacheManager::new(Arc::new(WriteFailingCache::default()));
        let state = app_state(cache, games.clone(), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/games?genre=Action").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error_code"], "cache_error");
        assert_eq!(games.calls(), 1);
    }

    #[actix_web::test]
    async fn test_long_genre_reaches_the_database() {
        let games = action_games();
        let state = app_state(memory_cache(), games.clone(), Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let genre = "A".repeat(300);
        let req = test::TestRequest::get().uri(&format!("/games?genre={}", genre)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], format!("No games found for genre: {}", genre));
        assert_eq!(games.calls(), 1);
    }

    #[actix_web::test]
    async fn test_genre_is_case_sensitive() {
        let games = action_games();
        let cache = memory_cache();
        let state = app_state(cache.clone(), games, Arc::new(FakePokemon::default()));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/games?genre=action").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
