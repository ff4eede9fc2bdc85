// core/common/src/cache.rs
// Key-value cache with expiring entries: Redis in production, an in-process map for local runs

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::logging::redact_url;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection failed: {0}")]
    Connection(String),
    #[error("cache command failed: {0}")]
    Command(String),
    #[error("cached payload is not valid JSON: {0}")]
    Serialization(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
            CacheError::Connection(err.to_string())
        } else {
            CacheError::Command(err.to_string())
        }
    }
}

/// Exact-match key-value store with per-entry expiry.
///
/// Every write is a complete key/value/TTL triple, so concurrent writers to the
/// same key only race on which TTL countdown survives.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Short backend name used in logs and health output.
    fn backend(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// All live keys, unfiltered. No ordering guarantee.
    async fn keys(&self) -> Result<Vec<String>, CacheError>;

    async fn flush_all(&self) -> Result<(), CacheError>;

    async fn ping(&self) -> Result<(), CacheError>;

    /// Release the underlying connection.
    async fn quit(&self) -> Result<(), CacheError>;
}

// ============================================================================
// REDIS
// ============================================================================

#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    redis_url: String,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("redis_url", &redact_url(&self.redis_url))
            .field("conn", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCache {
    /// Open a managed connection. Fails if the server cannot be reached.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        tracing::info!(redis_url = %redact_url(redis_url), "Connecting to Redis");

        let client = redis::Client::open(redis_url)
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        tracing::info!("Redis client ready to use");
        Ok(Self {
            conn,
            redis_url: redis_url.to_string(),
        })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        Ok(conn.get::<_, Option<String>>(key).await?)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        redis::cmd("SETEX")
            .arg(key)
            .arg(ttl.as_secs().max(1))
            .arg(value)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut conn = self.conn.clone();
        Ok(conn.keys::<_, Vec<String>>("*").await?)
    }

    async fn flush_all(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        redis::cmd("FLUSHALL")
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await?;
        Ok(())
    }

    async fn quit(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        redis::cmd("QUIT")
            .query_async::<_, ()>(&mut conn)
            .await?;
        tracing::info!("Redis client disconnected");
        Ok(())
    }
}

// ============================================================================
// IN-PROCESS
// ============================================================================

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Single-instance cache backed by a map. Expired entries are dropped lazily.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, MemoryEntry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let entry = MemoryEntry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok(entries.keys().cloned().collect())
    }

    async fn flush_all(&self) -> Result<(), CacheError> {
        self.entries.write().await.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn quit(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

// ============================================================================
// TYPED ACCESS
// ============================================================================

/// Shared handle over a [`CacheStore`] adding JSON (de)serialization.
#[derive(Clone)]
pub struct CacheManager {
    store: Arc<dyn CacheStore>,
}

impl fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheManager")
            .field("backend", &self.store.backend())
            .finish()
    }
}

impl CacheManager {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| CacheError::Serialization(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| CacheError::Serialization(format!("{}: {}", key, e)))?;
        self.store.set_ex(key, &raw, ttl).await
    }

    pub async fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys().await
    }

    pub async fn flush_all(&self) -> Result<(), CacheError> {
        self.store.flush_all().await
    }

    pub async fn ping(&self) -> Result<(), CacheError> {
        self.store.ping().await
    }

    pub async fn quit(&self) -> Result<(), CacheError> {
        self.store.quit().await
    }
}
