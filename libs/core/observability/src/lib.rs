//! Observability utilities for the event intake service.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Custom metrics for the event publish pipeline
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, EventMetrics};
//!
//! // Initialize metrics recorder
//! init_metrics();
//!
//! // Record pipeline operations
//! EventMetrics::record_batch("web", 2, 2);
//!
//! // Add metrics endpoint to router
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

pub mod events;
pub mod middleware;

pub use events::EventMetrics;
pub use middleware::metrics_middleware;

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// This should be called once at application startup.
/// Returns the PrometheusHandle for rendering metrics.
pub fn init_metrics() -> &'static PrometheusHandle {
    METRICS_HANDLE.get_or_init(|| {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("Failed to install Prometheus recorder");

        info!("Prometheus metrics recorder initialized");

        register_metric_descriptions();

        handle
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

/// Register metric descriptions for documentation
fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_histogram;

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Event pipeline metrics
    describe_counter!(
        "events_received_total",
        "Events received in intake batches, by source"
    );
    describe_counter!(
        "events_published_total",
        "Events accepted by the message bus, by source"
    );
    describe_counter!(
        "events_failed_total",
        "Events the bus rejected after bounded retries, by source"
    );
    describe_counter!(
        "event_batches_total",
        "Intake batches processed, by outcome"
    );
    describe_histogram!(
        "event_batch_duration_seconds",
        "End-to-end batch processing duration in seconds"
    );
}
