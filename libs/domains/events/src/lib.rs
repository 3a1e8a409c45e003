//! Events Domain
//!
//! Event intake and publish pipeline: accepts batches of
//! client-supplied events over HTTP and publishes each as a JSON
//! message to a Redis Stream, with per-batch and per-message
//! success/failure accounting.
//!
//! # Architecture
//!
//! ```text
//! HTTP POST /events
//!        │
//!        ▼
//! LoggingMiddleware ─► MetricsMiddleware ─► EventService
//!                                               │ enrich + serialize
//!                                               ▼
//!                                        EventPublisher (trait)
//!                                               │ XADD, bounded retries
//!                                               ▼
//!                                          Redis Stream
//! ```
//!
//! The batch outcome is aggregate only: callers learn how many events
//! they submitted and whether all, some, or none were accepted, never
//! which individual events were lost.

mod error;
mod handlers;
mod middleware;
mod models;
mod publisher;
mod service;

pub use error::EventError;
pub use handlers::{events_router, EventsState};
pub use middleware::{LoggingMiddleware, MetricsMiddleware};
pub use models::{
    Event, EventRecord, EventsReceived, HealthStatus, PostEventsRequest, ServiceStatus,
};
pub use publisher::{
    encode_record, EventPublisher, PublishError, PublishReceipt, RedisStreamPublisher,
};
pub use service::{EventIngest, EventService, SERVICE_NAME};
