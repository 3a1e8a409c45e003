//! Decorators over [`EventIngest`].
//!
//! Each wrapper implements the same capability trait around an inner
//! implementation and never alters return values, so they stack in any
//! order without depending on one another.

use crate::error::EventError;
use crate::models::{Event, EventsReceived, HealthStatus};
use crate::service::EventIngest;
use async_trait::async_trait;
use observability::EventMetrics;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Logs every call with its input summary, result, and elapsed time.
pub struct LoggingMiddleware<S> {
    inner: S,
}

impl<S: EventIngest> LoggingMiddleware<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: EventIngest> EventIngest for LoggingMiddleware<S> {
    async fn post_events(
        &self,
        source: &str,
        track: &str,
        events: Vec<Event>,
    ) -> Result<EventsReceived, EventError> {
        let started = Instant::now();
        info!(
            method = "post_events",
            source,
            track,
            length = events.len(),
            "Handling call"
        );

        let result = self.inner.post_events(source, track, events).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(received) => info!(
                method = "post_events",
                success = received.success,
                length = received.length,
                elapsed_ms,
                "Call completed"
            ),
            Err(e) => warn!(
                method = "post_events",
                error = %e,
                elapsed_ms,
                "Call completed with error"
            ),
        }

        result
    }

    fn health(&self) -> Vec<HealthStatus> {
        let started = Instant::now();
        let statuses = self.inner.health();
        debug!(
            method = "health",
            entries = statuses.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Call completed"
        );
        statuses
    }
}

/// Records batch counters and durations for every call.
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S: EventIngest> MetricsMiddleware<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: EventIngest> EventIngest for MetricsMiddleware<S> {
    async fn post_events(
        &self,
        source: &str,
        track: &str,
        events: Vec<Event>,
    ) -> Result<EventsReceived, EventError> {
        let started = Instant::now();
        let length = events.len();

        let result = self.inner.post_events(source, track, events).await;

        let delivered = match &result {
            Ok(received) => received.length,
            Err(EventError::PartialFailure { delivered, .. }) => *delivered,
            Err(_) => 0,
        };
        EventMetrics::record_batch(source, length, delivered);
        EventMetrics::record_batch_duration(started.elapsed());

        result
    }

    fn health(&self) -> Vec<HealthStatus> {
        self.inner.health()
    }
}
