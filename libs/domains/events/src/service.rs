//! Event intake service: batch validation, provenance enrichment,
//! per-message publishing, and aggregate health.

use crate::error::EventError;
use crate::models::{Event, EventRecord, EventsReceived, HealthStatus, ServiceStatus};
use crate::publisher::{encode_record, EventPublisher};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Name reported for the service itself in health output.
pub const SERVICE_NAME: &str = "events";

/// Capability set of the intake pipeline.
///
/// Decorators implement this same trait around an inner implementation,
/// so logging, metrics, and the service itself compose freely.
#[async_trait]
pub trait EventIngest: Send + Sync {
    /// Accept one batch of events and publish each to the bus.
    ///
    /// `Ok` means every submitted message was accepted. Partial and
    /// total delivery failures come back as [`EventError`] variants
    /// that still carry the batch outcome.
    async fn post_events(
        &self,
        source: &str,
        track: &str,
        events: Vec<Event>,
    ) -> Result<EventsReceived, EventError>;

    /// Aggregate health: the service itself, then the bus dependency.
    ///
    /// Cheap and non-blocking; reports handle presence only, never a
    /// live bus round-trip.
    fn health(&self) -> Vec<HealthStatus>;
}

/// Production implementation of [`EventIngest`].
///
/// Holds an explicitly injected, shared publisher handle. The handle is
/// optional: a service wired without a bus connection still answers
/// requests, reports the bus as unhealthy, and fails batches through
/// normal classification.
pub struct EventService {
    publisher: Option<Arc<dyn EventPublisher>>,
    topic: String,
}

impl EventService {
    pub fn new(publisher: Option<Arc<dyn EventPublisher>>, topic: impl Into<String>) -> Self {
        Self {
            publisher,
            topic: topic.into(),
        }
    }
}

#[async_trait]
impl EventIngest for EventService {
    #[instrument(skip(self, events), fields(length = events.len()))]
    async fn post_events(
        &self,
        source: &str,
        track: &str,
        events: Vec<Event>,
    ) -> Result<EventsReceived, EventError> {
        let length = events.len();
        info!(source, track, length, "Received events batch");

        if length == 0 {
            return Err(EventError::NoEvents);
        }

        // Enrich each event with the batch provenance and serialize.
        // A payload that fails to serialize is dropped from the
        // outgoing set; a malformed event must not abort the batch.
        let mut payloads = Vec::with_capacity(length);
        for event in events {
            let record = EventRecord {
                event,
                source: source.to_string(),
                track: track.to_string(),
            };

            match encode_record(&record) {
                Ok(payload) => payloads.push(payload),
                Err(e) => warn!(error = %e, "Dropping event that failed to serialize"),
            }
        }

        // Submit sequentially, preserving within-batch order. Send
        // failure is terminal for that message; no retries here beyond
        // the adapter's own bounded budget.
        let mut delivered = 0usize;
        match &self.publisher {
            Some(publisher) => {
                for payload in &payloads {
                    match publisher.send(payload).await {
                        Ok(receipt) => {
                            debug!(entry_id = %receipt.entry_id, "Message accepted by bus");
                            delivered += 1;
                        }
                        Err(e) => warn!(error = %e, "Failed to send message"),
                    }
                }
            }
            None => warn!(length, "No bus connection, batch cannot be delivered"),
        }

        if delivered == payloads.len() {
            Ok(EventsReceived {
                success: true,
                length,
            })
        } else if delivered > 0 {
            Err(EventError::PartialFailure { delivered, length })
        } else {
            Err(EventError::AllFailed { length })
        }
    }

    fn health(&self) -> Vec<HealthStatus> {
        let now = Utc::now().to_rfc3339();

        let bus_status = if self.publisher.is_some() {
            ServiceStatus::Ok
        } else {
            ServiceStatus::Error
        };

        vec![
            HealthStatus {
                service: SERVICE_NAME.to_string(),
                status: ServiceStatus::Ok,
                time: now.clone(),
            },
            HealthStatus {
                service: format!("stream:{}", self.topic),
                status: bus_status,
                time: now,
            },
        ]
    }
}
