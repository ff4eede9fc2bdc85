// core/gateway-service/src/origin/mod.rs
// Authoritative data sources queried on cache miss

pub mod games;
pub mod pokemon;

pub use games::{GameRecord, GamesRepository, PgGamesRepository};
pub use pokemon::{HttpPokemonClient, PageRequest, PaginatedResponse, PokemonApi};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OriginError {
    #[error("database query failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("upstream request timed out after {0} ms")]
    Timeout(u64),
    #[error("upstream request failed: {0}")]
    Upstream(String),
}
