//! Event domain models

use serde::{Deserialize, Serialize};

/// One client-supplied event.
///
/// `time` is an opaque caller timestamp and `detail` an arbitrary
/// structured payload; neither is inspected or validated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Caller-supplied timestamp, passed through verbatim
    pub time: String,

    /// Event type label
    #[serde(rename = "type")]
    pub kind: String,

    /// Opaque structured payload
    #[serde(default)]
    pub detail: serde_json::Value,
}

/// An event enriched with batch provenance, as published to the bus.
///
/// Constructed per event during intake, serialized to JSON, then
/// discarded. `source` and `track` come from the request, so they are
/// identical across all records of one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(flatten)]
    pub event: Event,
    pub source: String,
    pub track: String,
}

/// Batch-level outcome returned to the caller.
///
/// `length` is always the submitted batch size, regardless of how many
/// messages the bus accepted. It serializes under the key `events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsReceived {
    pub success: bool,
    #[serde(rename = "events")]
    pub length: usize,
}

/// Status of one monitored dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Ok,
    Error,
}

/// One entry of the aggregate health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub service: String,
    pub status: ServiceStatus,
    pub time: String,
}

/// Wire shape of `POST /events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEventsRequest {
    pub source: String,
    pub track: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_deserializes_wire_shape() {
        let event: Event = serde_json::from_value(json!({
            "time": "t1",
            "type": "login",
            "detail": {"user": "u-17", "nested": [1, 2, 3]}
        }))
        .unwrap();

        assert_eq!(event.time, "t1");
        assert_eq!(event.kind, "login");
        assert_eq!(event.detail["user"], "u-17");
    }

    #[test]
    fn test_event_detail_defaults_to_null() {
        let event: Event =
            serde_json::from_value(json!({"time": "t1", "type": "click"})).unwrap();
        assert!(event.detail.is_null());
    }

    #[test]
    fn test_event_detail_round_trips_opaquely() {
        let detail = json!({"a": [1, {"b": "c"}], "d": null, "e": 1.5});
        let event = Event {
            time: "t1".to_string(),
            kind: "custom".to_string(),
            detail: detail.clone(),
        };

        let back: Event =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(back.detail, detail);
    }

    #[test]
    fn test_event_record_flattens_event_fields() {
        let record = EventRecord {
            event: Event {
                time: "t1".to_string(),
                kind: "login".to_string(),
                detail: json!({}),
            },
            source: "web".to_string(),
            track: "abc".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["time"], "t1");
        assert_eq!(value["type"], "login");
        assert_eq!(value["source"], "web");
        assert_eq!(value["track"], "abc");
    }

    #[test]
    fn test_events_received_length_serializes_as_events() {
        let received = EventsReceived {
            success: true,
            length: 2,
        };

        let value = serde_json::to_value(received).unwrap();
        assert_eq!(value, json!({"success": true, "events": 2}));
    }

    #[test]
    fn test_service_status_wire_values() {
        assert_eq!(serde_json::to_value(ServiceStatus::Ok).unwrap(), "OK");
        assert_eq!(serde_json::to_value(ServiceStatus::Error).unwrap(), "ERROR");
    }

    #[test]
    fn test_post_events_request_events_default_empty() {
        let request: PostEventsRequest =
            serde_json::from_value(json!({"source": "web", "track": "abc"})).unwrap();
        assert!(request.events.is_empty());
    }
}
