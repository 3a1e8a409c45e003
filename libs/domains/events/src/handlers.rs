//! HTTP handlers for the events API

use crate::error::EventError;
use crate::models::{EventsReceived, HealthStatus, PostEventsRequest};
use crate::service::EventIngest;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

/// Router state: the (possibly decorated) intake pipeline.
pub type EventsState = Arc<dyn EventIngest>;

/// Create the events router.
pub fn events_router(state: EventsState) -> Router {
    Router::new()
        .route("/events", post(post_events))
        .route("/health", get(health))
        .with_state(state)
}

/// Accept a batch of events and publish each to the bus.
async fn post_events(
    State(state): State<EventsState>,
    Json(request): Json<PostEventsRequest>,
) -> Result<Json<EventsReceived>, EventError> {
    let received = state
        .post_events(&request.source, &request.track, request.events)
        .await?;
    Ok(Json(received))
}

/// Liveness of the service and its bus dependency.
async fn health(State(state): State<EventsState>) -> Json<Vec<HealthStatus>> {
    Json(state.health())
}
