// core/gateway-service/src/test_support.rs
// In-memory origins and cache doubles for handler and resolver tests

use actix_web::web;
use async_trait::async_trait;
use cachegate_common::{
    CacheError, CacheManager, CacheMetrics, CacheStore, DependencyHealth, HealthStatus, MemoryCache,
};
use prometheus::Registry;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::origin::{GameRecord, GamesRepository, OriginError, PageRequest, PaginatedResponse, PokemonApi};
use crate::resolver::{Resolver, TtlPolicy};
use crate::state::AppState;

pub fn memory_cache() -> CacheManager {
    CacheManager::new(Arc::new(MemoryCache::new()))
}

/// Handler state over the given cache and fake origins, default page 10/0
pub fn app_state(cache: CacheManager, games: Arc<FakeGames>, pokemon: Arc<FakePokemon>) -> web::Data<AppState> {
    let metrics = CacheMetrics::new(&Registry::new(), "test").unwrap();
    let resolver = Resolver::new(cache.clone(), games.clone(), pokemon, TtlPolicy::default(), metrics);

    web::Data::new(AppState {
        resolver,
        cache,
        games,
        default_page: PageRequest { limit: 10, offset: 0 },
        start_time: SystemTime::now(),
    })
}

pub fn game(name: &str, genre: &str, release_year: i64) -> GameRecord {
    let mut columns = Map::new();
    columns.insert("name".to_string(), json!(name));
    columns.insert("genre".to_string(), json!(genre));
    columns.insert("release_year".to_string(), json!(release_year));
    GameRecord(columns)
}

#[derive(Default)]
pub struct FakeGames {
    rows: HashMap<String, Vec<GameRecord>>,
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
    closed: AtomicBool,
}

impl FakeGames {
    pub fn with_rows(genre: &str, rows: Vec<GameRecord>) -> Self {
        let mut map = HashMap::new();
        map.insert(genre.to_string(), rows);
        Self {
            rows: map,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GamesRepository for FakeGames {
    async fn find_by_genre(&self, genre: &str) -> Result<Vec<GameRecord>, OriginError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(OriginError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.rows.get(genre).cloned().unwrap_or_default())
    }

    async fn games_table_exists(&self) -> Result<bool, OriginError> {
        if self.fail {
            return Err(OriginError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(true)
    }

    async fn health(&self) -> DependencyHealth {
        let status = if self.fail {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        };
        DependencyHealth::new("database".to_string(), status)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum PokemonMode {
    #[default]
    Pages,
    Timeout,
    Failure,
}

/// Serves `total` numbered items; pages past the end come back empty.
pub struct FakePokemon {
    total: u32,
    mode: PokemonMode,
    calls: AtomicUsize,
    requests: std::sync::Mutex<Vec<PageRequest>>,
}

impl Default for FakePokemon {
    fn default() -> Self {
        Self {
            total: 1302,
            mode: PokemonMode::Pages,
            calls: AtomicUsize::new(0),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl FakePokemon {
    pub fn timing_out() -> Self {
        Self {
            mode: PokemonMode::Timeout,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            mode: PokemonMode::Failure,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PokemonApi for FakePokemon {
    async fn fetch_page(&self, page: PageRequest) -> Result<PaginatedResponse, OriginError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(page);

        match self.mode {
            PokemonMode::Timeout => return Err(OriginError::Timeout(5000)),
            PokemonMode::Failure => return Err(OriginError::Upstream("HTTP 502".to_string())),
            PokemonMode::Pages => {}
        }

        let end = page.offset.saturating_add(page.limit).min(self.total);
        let results: Vec<Value> = (page.offset..end)
            .map(|i| json!({"name": format!("pokemon-{}", i + 1)}))
            .collect();

        let mut extra = Map::new();
        extra.insert("previous".to_string(), Value::Null);

        Ok(PaginatedResponse {
            count: Some(self.total as u64),
            results: Some(results),
            extra,
        })
    }
}

/// Cache that serves reads from memory but rejects every write
#[derive(Default)]
pub struct WriteFailingCache {
    inner: MemoryCache,
}

#[async_trait]
impl CacheStore for WriteFailingCache {
    fn backend(&self) -> &'static str {
        "write-failing"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key).await
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Command("READONLY You can't write against a read only replica".to_string()))
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.inner.keys().await
    }

    async fn flush_all(&self) -> Result<(), CacheError> {
        self.inner.flush_all().await
    }

    async fn ping(&self) -> Result<(), CacheError> {
        self.inner.ping().await
    }

    async fn quit(&self) -> Result<(), CacheError> {
        self.inner.quit().await
    }
}

/// Cache whose every command fails as if the server were down
pub struct FailingCache;

#[async_trait]
impl CacheStore for FailingCache {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn flush_all(&self) -> Result<(), CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn quit(&self) -> Result<(), CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }
}
