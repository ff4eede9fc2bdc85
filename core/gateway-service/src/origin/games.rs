// core/gateway-service/src/origin/games.rs
// Games repository backed by PostgreSQL

use async_trait::async_trait;
use cachegate_common::{check_database_health, log_database_operation, DependencyHealth, MetricsTimer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use std::time::Duration;

use super::OriginError;

/// A row of the `games` table as `row_to_json` renders it.
///
/// Columns are never interpreted here, so any column type round-trips untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameRecord(pub Map<String, Value>);

#[async_trait]
pub trait GamesRepository: Send + Sync {
    /// Games of one genre, newest first
    async fn find_by_genre(&self, genre: &str) -> Result<Vec<GameRecord>, OriginError>;

    async fn games_table_exists(&self) -> Result<bool, OriginError>;

    async fn health(&self) -> DependencyHealth;

    /// Release all pooled connections
    async fn close(&self);
}

#[derive(Debug, Clone)]
pub struct PgGamesRepository {
    pool: PgPool,
}

impl PgGamesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the pool and establish a first connection. Fails if the database is unreachable.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl GamesRepository for PgGamesRepository {
    async fn find_by_genre(&self, genre: &str) -> Result<Vec<GameRecord>, OriginError> {
        let timer = MetricsTimer::new();

        let result = sqlx::query_scalar::<_, Json<GameRecord>>(
            r#"
            SELECT row_to_json(g)
            FROM games g
            WHERE g.genre = $1
            ORDER BY g.release_year DESC
            "#,
        )
        .bind(genre)
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(rows) => {
                log_database_operation("select", "games", rows.len(), timer.elapsed_millis(), true);
                Ok(rows.into_iter().map(|Json(game)| game).collect())
            }
            Err(e) => {
                log_database_operation("select", "games", 0, timer.elapsed_millis(), false);
                Err(e.into())
            }
        }
    }

    async fn games_table_exists(&self) -> Result<bool, OriginError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = 'games'
            )
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn health(&self) -> DependencyHealth {
        check_database_health(&self.pool).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
