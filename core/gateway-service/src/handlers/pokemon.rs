// core/gateway-service/src/handlers/pokemon.rs
// GET /pokemon?limit=<n>&offset=<n>

use actix_web::{web, HttpRequest, HttpResponse};
use cachegate_common::{log_cache_outcome, log_failure, parse_numeric_or, ServiceError};
use serde::Serialize;

use super::request_context;
use crate::origin::{PageRequest, PaginatedResponse};
use crate::resolver::{ResolveError, Source};
use crate::state::AppState;

/// Raw query values; parsing is lenient so these stay strings until normalized
#[derive(Debug, Default)]
pub struct PokemonQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PokemonQuery {
    /// First occurrence of each parameter wins; unknown keys are ignored.
    pub fn from_query_string(query: &str) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
            .map(web::Query::into_inner)
            .unwrap_or_default();

        let mut parsed = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut parsed.limit,
                "offset" => &mut parsed.offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        parsed
    }

    pub fn page(&self, defaults: PageRequest) -> PageRequest {
        PageRequest {
            limit: parse_numeric_or(self.limit.as_deref(), defaults.limit),
            offset: parse_numeric_or(self.offset.as_deref(), defaults.offset),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PokemonResponse {
    pub source: Source,
    pub limit: u32,
    pub offset: u32,
    pub duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_available: Option<u64>,
    pub data: PaginatedResponse,
}

pub async fn get_pokemon(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let ctx = request_context(&req, "/pokemon");
    let page = PokemonQuery::from_query_string(req.query_string()).page(state.default_page);

    let resolved = state.resolver.pokemon_page(page).await.map_err(|e| match e {
        ResolveError::NotFound(_) => ServiceError::NotFound(format!(
            "No pokemon found for limit: {} and offset: {}",
            page.limit, page.offset
        )),
        other => {
            log_failure(&ctx, "resolve pokemon", &other.to_string());
            other.into()
        }
    })?;

    log_cache_outcome(&ctx, resolved.key.as_str(), resolved.source.as_str(), resolved.duration_ms());

    let (count, total_available) = match resolved.source {
        Source::Origin => (Some(resolved.data.result_count()), resolved.data.count),
        Source::Cache => (None, None),
    };

    Ok(HttpResponse::Ok().json(PokemonResponse {
        source: resolved.source,
        limit: page.limit,
        offset: page.offset,
        duration: resolved.duration_ms(),
        count,
        total_available,
        data: resolved.data,
    }))
}
