use axum::routing::get;
use axum::{middleware, Router};
use axum_helpers::{create_app, not_found};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_events::{
    events_router, EventService, EventsState, LoggingMiddleware, MetricsMiddleware,
    RedisStreamPublisher,
};
use observability::{init_metrics, metrics_handler, metrics_middleware};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn, Level};

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing and the Prometheus recorder
    init_tracing(&config.environment);
    init_metrics();

    // Connect to the message bus. A failed connection is not fatal:
    // the service starts without a publisher handle, /health reports
    // the bus as ERROR, and batches fail through normal classification.
    let publisher = match RedisStreamPublisher::connect(&config.bus).await {
        Ok(publisher) => Some(Arc::new(publisher) as Arc<dyn domain_events::EventPublisher>),
        Err(e) => {
            warn!(error = %e, "Failed to connect to message bus, starting degraded");
            None
        }
    };

    // Service domain: the intake pipeline wrapped in its decorators
    let service = EventService::new(publisher, config.bus.topic.clone());
    let ingest: EventsState =
        Arc::new(LoggingMiddleware::new(MetricsMiddleware::new(service)));

    let app = Router::new()
        .merge(events_router(ingest))
        .route("/metrics", get(metrics_handler))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(metrics_middleware));

    info!(topic = %config.bus.topic, "Starting events API");

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Events API shutdown complete");
    Ok(())
}
