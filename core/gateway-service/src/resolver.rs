// core/gateway-service/src/resolver.rs
// Cache-aside resolution: cache first, origin on miss, populate with a fixed TTL

use cachegate_common::{CacheError, CacheManager, CacheMetrics, MetricsTimer, ServiceError};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::cache_key::CacheKey;
use crate::origin::{GameRecord, GamesRepository, OriginError, PageRequest, PaginatedResponse, PokemonApi};

const GAMES_QUERY: &str = "games";
const POKEMON_QUERY: &str = "pokemon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Origin,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Cache => "cache",
            Source::Origin => "origin",
        }
    }
}

#[derive(Debug)]
pub struct Resolved<T> {
    pub source: Source,
    pub key: CacheKey,
    pub data: T,
    /// Measured from the start of the resolver call
    pub elapsed: Duration,
}

impl<T> Resolved<T> {
    pub fn duration_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("origin returned no results for {0}")]
    NotFound(CacheKey),
    #[error(transparent)]
    Origin(#[from] OriginError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl From<ResolveError> for ServiceError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(key) => ServiceError::NotFound(format!("No data found for {}", key)),
            ResolveError::Origin(OriginError::Timeout(ms)) => {
                ServiceError::UpstreamTimeout(format!("public API did not respond within {} ms", ms))
            }
            ResolveError::Origin(OriginError::Database(e)) => ServiceError::DatabaseError(e.to_string()),
            ResolveError::Origin(OriginError::Upstream(msg)) => ServiceError::ExternalServiceError(msg),
            ResolveError::Cache(e) => e.into(),
        }
    }
}

/// Fixed time-to-live per query type
#[derive(Debug, Clone, Copy)]
pub struct TtlPolicy {
    pub games: Duration,
    pub pokemon: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            games: Duration::from_secs(1200),
            pokemon: Duration::from_secs(3600),
        }
    }
}

/// Cache-aside resolver over both origins.
///
/// There is no single-flight: concurrent misses on one key each hit the origin
/// and each write the cache, the last write's TTL winning.
#[derive(Clone)]
pub struct Resolver {
    cache: CacheManager,
    games: Arc<dyn GamesRepository>,
    pokemon: Arc<dyn PokemonApi>,
    ttl: TtlPolicy,
    metrics: CacheMetrics,
}

impl Resolver {
    pub fn new(
        cache: CacheManager,
        games: Arc<dyn GamesRepository>,
        pokemon: Arc<dyn PokemonApi>,
        ttl: TtlPolicy,
        metrics: CacheMetrics,
    ) -> Self {
        Self {
            cache,
            games,
            pokemon,
            ttl,
            metrics,
        }
    }

    pub async fn games_by_genre(&self, genre: &str) -> Result<Resolved<Vec<GameRecord>>, ResolveError> {
        let games = &self.games;
        self.resolve(GAMES_QUERY, CacheKey::genre(genre), self.ttl.games, || async move {
            let rows = games.find_by_genre(genre).await?;
            Ok((!rows.is_empty()).then_some(rows))
        })
        .await
    }

    pub async fn pokemon_page(&self, page: PageRequest) -> Result<Resolved<PaginatedResponse>, ResolveError> {
        let pokemon = &self.pokemon;
        let key = CacheKey::pokemon_page(page.limit, page.offset);
        self.resolve(POKEMON_QUERY, key, self.ttl.pokemon, || async move {
            let response = pokemon.fetch_page(page).await?;
            Ok((!response.is_empty()).then_some(response))
        })
        .await
    }

    /// `fetch` yields `None` when the origin has nothing; that outcome is not cached.
    async fn resolve<T, F, Fut>(
        &self,
        query: &'static str,
        key: CacheKey,
        ttl: Duration,
        fetch: F,
    ) -> Result<Resolved<T>, ResolveError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, OriginError>>,
    {
        let timer = MetricsTimer::new();

        match self.cache.get::<T>(key.as_str()).await {
            Ok(Some(data)) => {
                self.metrics.record_hit(query);
                tracing::debug!(cache_key = %key, "Cache HIT");
                return Ok(Resolved {
                    source: Source::Cache,
                    key,
                    data,
                    elapsed: timer.elapsed(),
                });
            }
            Ok(None) => {
                self.metrics.record_miss(query);
                tracing::debug!(cache_key = %key, "Cache MISS, querying origin");
            }
            Err(e) => {
                self.metrics.record_error(query, "cache");
                return Err(e.into());
            }
        }

        let fetch_timer = MetricsTimer::new();
        let fetched = fetch().await;
        self.metrics.observe_origin_fetch(query, fetch_timer.elapsed_seconds());

        let data = match fetched {
            Ok(Some(data)) => data,
            Ok(None) => {
                self.metrics.record_not_found(query);
                return Err(ResolveError::NotFound(key));
            }
            Err(e) => {
                self.metrics.record_error(query, "origin");
                return Err(e.into());
            }
        };

        if let Err(e) = self.cache.set(key.as_str(), &data, ttl).await {
            self.metrics.record_error(query, "cache");
            return Err(e.into());
        }
        tracing::info!(cache_key = %key, ttl_secs = ttl.as_secs(), "Stored origin payload in cache");

        Ok(Resolved {
            source: Source::Origin,
            key,
            data,
            elapsed: timer.elapsed(),
        })
    }
}
