// core/common/src/metrics.rs
// Prometheus metrics collection

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry};
use std::time::{Duration, Instant};

/// Service-wide HTTP metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub http_requests_in_progress: IntGaugeVec,
}

impl ServiceMetrics {
    pub fn new(registry: &Registry, service_name: &str) -> Result<Self, prometheus::Error> {
        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests")
                .namespace(service_name),
            &["method", "endpoint", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .namespace(service_name)
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["method", "endpoint"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        let http_requests_in_progress = IntGaugeVec::new(
            Opts::new("http_requests_in_progress", "Number of HTTP requests currently being processed")
                .namespace(service_name),
            &["method", "endpoint"],
        )?;
        registry.register(Box::new(http_requests_in_progress.clone()))?;

        Ok(Self {
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_progress,
        })
    }

    /// Record an HTTP request
    pub fn record_http_request(&self, method: &str, endpoint: &str, status: u16, duration: f64) {
        self.http_requests_total
            .with_label_values(&[method, endpoint, &status.to_string()])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, endpoint])
            .observe(duration);
    }
}

/// Cache-aside metrics, labelled by query type (`games`, `pokemon`)
#[derive(Clone)]
pub struct CacheMetrics {
    pub cache_hits_total: IntCounterVec,
    pub cache_misses_total: IntCounterVec,
    pub origin_not_found_total: IntCounterVec,
    pub resolve_errors_total: IntCounterVec,
    pub origin_fetch_duration_seconds: HistogramVec,
}

impl CacheMetrics {
    pub fn new(registry: &Registry, service_name: &str) -> Result<Self, prometheus::Error> {
        let cache_hits_total = IntCounterVec::new(
            Opts::new("cache_hits_total", "Requests answered from the cache")
                .namespace(service_name),
            &["query"],
        )?;
        registry.register(Box::new(cache_hits_total.clone()))?;

        let cache_misses_total = IntCounterVec::new(
            Opts::new("cache_misses_total", "Requests that went to the origin")
                .namespace(service_name),
            &["query"],
        )?;
        registry.register(Box::new(cache_misses_total.clone()))?;

        let origin_not_found_total = IntCounterVec::new(
            Opts::new("origin_not_found_total", "Origin fetches that returned no results")
                .namespace(service_name),
            &["query"],
        )?;
        registry.register(Box::new(origin_not_found_total.clone()))?;

        let resolve_errors_total = IntCounterVec::new(
            Opts::new("resolve_errors_total", "Failed resolutions by failing layer")
                .namespace(service_name),
            &["query", "layer"],
        )?;
        registry.register(Box::new(resolve_errors_total.clone()))?;

        let origin_fetch_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "origin_fetch_duration_seconds",
                "Origin fetch duration in seconds",
            )
            .namespace(service_name)
            .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["query"],
        )?;
        registry.register(Box::new(origin_fetch_duration_seconds.clone()))?;

        Ok(Self {
            cache_hits_total,
            cache_misses_total,
            origin_not_found_total,
            resolve_errors_total,
            origin_fetch_duration_seconds,
        })
    }

    pub fn record_hit(&self, query: &str) {
        self.cache_hits_total.with_label_values(&[query]).inc();
    }

    pub fn record_miss(&self, query: &str) {
        self.cache_misses_total.with_label_values(&[query]).inc();
    }

    pub fn record_not_found(&self, query: &str) {
        self.origin_not_found_total.with_label_values(&[query]).inc();
    }

    pub fn record_error(&self, query: &str, layer: &str) {
        self.resolve_errors_total.with_label_values(&[query, layer]).inc();
    }

    pub fn observe_origin_fetch(&self, query: &str, seconds: f64) {
        self.origin_fetch_duration_seconds
            .with_label_values(&[query])
            .observe(seconds);
    }
}

/// Timer to measure operation duration
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for MetricsTimer {
    fn default() -> Self {
        Self::new()
    }
}
