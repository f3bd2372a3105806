//! Production-grade metrics with Prometheus
//!
//! Exposes key operational metrics for monitoring and alerting:
//! - Request rates and latencies
//! - Analysis throughput and verdict distribution
//! - Validation rejection rates
//!
//! NOTE: Labels are limited to low-cardinality values (method, endpoint,
//! status, verdict) to prevent a cardinality explosion in Prometheus.

use lazy_static::lazy_static;
use prometheus::{
    Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
};

lazy_static! {
    /// Global metrics registry
    pub static ref METRICS_REGISTRY: Registry = Registry::new();

    // ============================================================================
    // Request Metrics
    // ============================================================================

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "testready_http_request_duration_seconds",
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        &["method", "endpoint", "status"]
    ).unwrap();

    /// Total HTTP requests
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("testready_http_requests_total", "Total HTTP requests"),
        &["method", "endpoint", "status"]
    ).unwrap();

    // ============================================================================
    // Analysis Metrics
    // ============================================================================

    /// Completed analyses by readiness verdict
    pub static ref ANALYSES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("testready_analyses_total", "Completed analyses by verdict"),
        &["status"]  // status: "READY", "NEEDS_WORK", "NOT_READY"
    ).unwrap();

    /// End-to-end analysis duration (validation through aggregation)
    pub static ref ANALYSIS_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "testready_analysis_duration_seconds",
            "Analysis pipeline duration"
        )
        .buckets(vec![0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05])
    ).unwrap();

    /// Proposals rejected by input validation
    pub static ref VALIDATION_REJECTIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("testready_validation_rejections_total", "Proposals rejected by validation"),
        &["field"]
    ).unwrap();
}

/// Register all metrics with the global registry
pub fn register_metrics() -> Result<(), prometheus::Error> {
    METRICS_REGISTRY.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    METRICS_REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    METRICS_REGISTRY.register(Box::new(ANALYSES_TOTAL.clone()))?;
    METRICS_REGISTRY.register(Box::new(ANALYSIS_DURATION.clone()))?;
    METRICS_REGISTRY.register(Box::new(VALIDATION_REJECTIONS.clone()))?;

    Ok(())
}

/// Helper to time operations with histogram (RAII pattern)
/// Usage: let _timer = Timer::new(ANALYSIS_DURATION.clone());
pub struct Timer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl Timer {
    /// Create timer that records duration to histogram on drop
    pub fn new(histogram: Histogram) -> Self {
        Self {
            histogram,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
