// core/common/src/lib.rs
// CacheGate Common Library - cache store, errors, logging, health and metrics

pub mod cache;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod validation;

// Re-export commonly used items
pub use cache::{CacheError, CacheManager, CacheStore, MemoryCache, RedisCache};
pub use config::{CacheMode, Environment, ServiceConfig};
pub use error::{ErrorResponse, ServiceError};
pub use health::{
    check_cache_health, check_database_health, DependencyHealth, HealthResponse, HealthStatus,
    ReadinessProbe,
};
pub use logging::{
    generate_request_id, init_console_logging, init_logging, log_cache_outcome,
    log_database_operation, log_external_api_call, log_failure, log_validation_error,
    redact_url, LogContext,
};
pub use metrics::{CacheMetrics, MetricsTimer, ServiceMetrics};
pub use middleware::MetricsMiddleware;
pub use validation::{parse_numeric_or, require_param, ValidationError};
