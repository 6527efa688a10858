//! Prometheus metrics for monitoring and alerting.
//!
//! Session ids never appear in labels; persona/mode/consent labels are
//! small fixed sets, so cardinality stays bounded.

use lazy_static::lazy_static;
use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// HTTP request counts by method, normalized path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("synthsara_http_requests_total", "Total HTTP requests"),
        &["method", "endpoint", "status"]
    ).unwrap();

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "synthsara_http_request_duration_seconds",
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        &["method", "endpoint"]
    ).unwrap();

    /// Chat replies by persona and response mode
    pub static ref CHAT_RESPONSES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("synthsara_chat_responses_total", "Chat replies generated"),
        &["persona", "mode"]
    ).unwrap();

    /// Conversations archived, by consent level
    pub static ref CONVERSATIONS_STORED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "synthsara_conversations_stored_total",
            "Conversations archived"
        ),
        &["consent_level"]
    ).unwrap();

    /// Insights materialized by the synthesizer
    pub static ref INSIGHTS_SYNTHESIZED_TOTAL: IntCounter = IntCounter::new(
        "synthsara_insights_synthesized_total",
        "Collective insights created"
    ).unwrap();

    /// Conversations removed by retention sweeps
    pub static ref RETENTION_DELETED_TOTAL: IntCounter = IntCounter::new(
        "synthsara_retention_deleted_total",
        "Conversations deleted by retention sweeps"
    ).unwrap();
}

/// Register all metrics with the global registry. Call once at startup.
pub fn register_metrics() -> prometheus::Result<()> {
    REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    REGISTRY.register(Box::new(CHAT_RESPONSES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(CONVERSATIONS_STORED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(INSIGHTS_SYNTHESIZED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RETENTION_DELETED_TOTAL.clone()))?;
    Ok(())
}

/// Render the registry in Prometheus text exposition format.
pub fn render() -> prometheus::Result<String> {
    let encoder = TextEncoder::new();
    encoder.encode_to_string(&REGISTRY.gather())
}
