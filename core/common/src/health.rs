// core/common/src/health.rs
// Health check system for services

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::time::{Duration, Instant, SystemTime};

use crate::cache::CacheManager;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
    pub dependencies: Vec<DependencyHealth>,
}

impl HealthResponse {
    pub fn new(service: String, version: String, start_time: SystemTime) -> Self {
        let uptime = SystemTime::now()
            .duration_since(start_time)
            .unwrap_or(Duration::from_secs(0))
            .as_secs();

        Self {
            status: HealthStatus::Healthy,
            service,
            version,
            uptime_seconds: uptime,
            timestamp: Utc::now(),
            dependencies: Vec::new(),
        }
    }

    pub fn add_dependency(&mut self, dependency: DependencyHealth) {
        self.dependencies.push(dependency);
        self.update_overall_status();
    }

    fn update_overall_status(&mut self) {
        let has_unhealthy = self.dependencies.iter().any(|d| d.status == HealthStatus::Unhealthy);
        let has_degraded = self.dependencies.iter().any(|d| d.status == HealthStatus::Degraded);

        self.status = if has_unhealthy {
            HealthStatus::Unhealthy
        } else if has_degraded {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DependencyHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DependencyHealth {
    pub fn new(name: String, status: HealthStatus) -> Self {
        Self {
            name,
            status,
            latency_ms: None,
            message: None,
        }
    }

    /// Healthy below `degraded_after_ms`, degraded above it.
    pub fn from_latency(name: &str, latency_ms: u64, degraded_after_ms: u64) -> Self {
        let status = if latency_ms > degraded_after_ms {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };
        Self::new(name.to_string(), status).with_latency(latency_ms)
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}

/// Check database health
pub async fn check_database_health(pool: &PgPool) -> DependencyHealth {
    let start = Instant::now();

    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => DependencyHealth::from_latency("database", start.elapsed().as_millis() as u64, 1000),
        Err(e) => DependencyHealth::new("database".to_string(), HealthStatus::Unhealthy)
            .with_message(format!("Database error: {}", e)),
    }
}

/// Check cache health with a PING
pub async fn check_cache_health(cache: &CacheManager) -> DependencyHealth {
    let start = Instant::now();
    let name = format!("cache ({})", cache.backend());

    match cache.ping().await {
        Ok(()) => DependencyHealth::from_latency(&name, start.elapsed().as_millis() as u64, 500),
        Err(e) => DependencyHealth::new(name, HealthStatus::Unhealthy)
            .with_message(format!("Cache error: {}", e)),
    }
}

/// Readiness probe - is the service ready to accept traffic?
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessProbe {
    pub ready: bool,
    pub dependencies: Vec<DependencyHealth>,
}

impl ReadinessProbe {
    /// Ready unless some dependency is unhealthy; degraded still serves traffic.
    pub fn from_dependencies(dependencies: Vec<DependencyHealth>) -> Self {
        let ready = dependencies
            .iter()
            .all(|d| d.status != HealthStatus::Unhealthy);
        Self { ready, dependencies }
    }
}
