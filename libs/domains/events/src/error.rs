//! Event domain error types

use crate::models::EventsReceived;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Batch-level errors surfaced to callers.
///
/// Per-event serialization skips and per-message send failures are
/// recovered locally (logged and excluded); only the aggregate outcome
/// is reported. The failure variants carry the submitted batch size so
/// the exact `EventsReceived` can be reconstructed alongside the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// Empty batch, rejected before any send attempt
    #[error("no events received")]
    NoEvents,

    /// Some but not all messages were accepted by the bus. The batch
    /// still counts as accepted overall; callers inspect this error to
    /// detect degradation.
    #[error("some messages failed to send")]
    PartialFailure { delivered: usize, length: usize },

    /// No message was accepted by the bus
    #[error("all messages failed to send")]
    AllFailed { length: usize },
}

impl EventError {
    /// The batch outcome this error corresponds to. `length` is always
    /// the original submitted count.
    pub fn receipt(&self) -> EventsReceived {
        match *self {
            EventError::NoEvents => EventsReceived {
                success: false,
                length: 0,
            },
            EventError::PartialFailure { length, .. } => EventsReceived {
                success: true,
                length,
            },
            EventError::AllFailed { length } => EventsReceived {
                success: false,
                length,
            },
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let status = match self {
            EventError::NoEvents => StatusCode::BAD_REQUEST,
            EventError::PartialFailure { .. } => StatusCode::MULTI_STATUS,
            EventError::AllFailed { .. } => StatusCode::BAD_GATEWAY,
        };

        let receipt = self.receipt();
        let body = json!({
            "success": receipt.success,
            "events": receipt.length,
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
