//! Metrics for the event publish pipeline.

use metrics::{counter, histogram};
use std::time::Duration;

/// Recorder for event pipeline metrics.
///
/// All methods are cheap and fire-and-forget; they delegate to the
/// global metrics recorder installed by `init_metrics`.
pub struct EventMetrics;

impl EventMetrics {
    /// Record the outcome of one intake batch.
    ///
    /// `received` is the submitted batch size, `published` the number of
    /// messages the bus accepted.
    pub fn record_batch(source: &str, received: usize, published: usize) {
        counter!("events_received_total", "source" => source.to_string())
            .increment(received as u64);
        counter!("events_published_total", "source" => source.to_string())
            .increment(published as u64);

        let failed = received.saturating_sub(published);
        if failed > 0 {
            counter!("events_failed_total", "source" => source.to_string())
                .increment(failed as u64);
        }

        let outcome = if received == 0 {
            "empty"
        } else if published == received {
            "ok"
        } else if published > 0 {
            "partial"
        } else {
            "failed"
        };
        counter!("event_batches_total", "outcome" => outcome).increment(1);
    }

    /// Record how long one batch took end to end.
    pub fn record_batch_duration(duration: Duration) {
        histogram!("event_batch_duration_seconds").record(duration.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_batch_without_recorder() {
        // With no global recorder installed these are no-ops; they must
        // not panic.
        EventMetrics::record_batch("web", 3, 2);
        EventMetrics::record_batch("web", 0, 0);
        EventMetrics::record_batch_duration(Duration::from_millis(5));
    }
}
