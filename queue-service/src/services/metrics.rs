//! Prometheus metrics for queue-service.

use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec};

/// Record operations by kind, operation and outcome.
pub static RECORD_OPERATIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "queue_record_operations_total",
        "Total number of record operations",
        &["kind", "operation", "outcome"] // outcome: ok, not_found, error
    )
    .expect("Failed to register record_operations_total")
});

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "queue_db_query_duration_seconds",
        "Database query duration in seconds",
        &["kind", "operation"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Suggestion requests by type and outcome.
pub static SUGGESTIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "queue_suggestions_total",
        "Total number of AI suggestion requests",
        &["type", "outcome"]
    )
    .expect("Failed to register suggestions_total")
});

/// Upstream generation latency.
pub static SUGGESTION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "queue_suggestion_duration_seconds",
        "AI suggestion upstream latency in seconds",
        &["type"],
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("Failed to register suggestion_duration")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&RECORD_OPERATIONS_TOTAL);
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&SUGGESTIONS_TOTAL);
    Lazy::force(&SUGGESTION_DURATION);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    service_core::middleware::metrics::gather_metrics()
}
