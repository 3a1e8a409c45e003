//! Publisher adapter over the message bus.
//!
//! The bus is a Redis Stream; one `send` call appends one encoded
//! message. The adapter owns transport only: bounded retries per
//! message, no batching assumptions, opaque error propagation. Batch
//! policy lives in the ingestion service.

use crate::models::EventRecord;
use async_trait::async_trait;
use core_config::bus::BusConfig;
use redis::aio::ConnectionManager;
use thiserror::Error;
use tracing::{debug, info};

/// Broker acknowledgment for one accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Stream the message was appended to
    pub topic: String,
    /// Broker-assigned entry id within the stream
    pub entry_id: String,
}

/// Transport errors from the bus client, propagated as-is.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Bus error: {0}")]
    Bus(#[from] redis::RedisError),
}

/// Capability boundary: send one encoded message to the bus.
///
/// Implementations must be safe for concurrent use; multiple batches
/// may submit through one shared handle at the same time.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Send one message. Success means the broker acknowledged the
    /// append; failure surfaces after the implementation's bounded
    /// retry budget is spent.
    async fn send(&self, payload: &[u8]) -> Result<PublishReceipt, PublishError>;

    /// Name of the topic this publisher writes to.
    fn topic(&self) -> &str;
}

/// Redis Streams implementation of [`EventPublisher`].
///
/// One shared `ConnectionManager` multiplexes all callers; cloning the
/// manager per call is cheap and reconnects are handled internally.
pub struct RedisStreamPublisher {
    redis: ConnectionManager,
    topic: String,
    retry_limit: u32,
    max_stream_length: i64,
}

impl RedisStreamPublisher {
    /// Create a publisher over an existing connection.
    pub fn new(redis: ConnectionManager, config: &BusConfig) -> Self {
        Self {
            redis,
            topic: config.topic.clone(),
            retry_limit: config.retry_limit.max(1),
            max_stream_length: config.max_stream_length,
        }
    }

    /// Connect to the bus and verify the connection with a PING.
    pub async fn connect(config: &BusConfig) -> Result<Self, PublishError> {
        info!(url = %config.url, topic = %config.topic, "Connecting to message bus");

        let client = redis::Client::open(config.url.as_str())?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        info!(topic = %config.topic, "Connected to message bus");
        Ok(Self::new(manager, config))
    }
}

#[async_trait]
impl EventPublisher for RedisStreamPublisher {
    async fn send(&self, payload: &[u8]) -> Result<PublishReceipt, PublishError> {
        let mut conn = self.redis.clone();
        let mut attempt = 0;

        // XADD with MAXLEN ~ for approximate trimming; the reply is the
        // broker acknowledgment required before declaring success.
        loop {
            attempt += 1;

            let result: Result<String, redis::RedisError> = redis::cmd("XADD")
                .arg(&self.topic)
                .arg("MAXLEN")
                .arg("~")
                .arg(self.max_stream_length)
                .arg("*")
                .arg("event")
                .arg(payload)
                .query_async(&mut conn)
                .await;

            match result {
                Ok(entry_id) => {
                    debug!(topic = %self.topic, entry_id = %entry_id, "Appended message");
                    return Ok(PublishReceipt {
                        topic: self.topic.clone(),
                        entry_id,
                    });
                }
                Err(e) if attempt < self.retry_limit => {
                    debug!(topic = %self.topic, attempt, error = %e, "XADD failed, retrying");
                }
                Err(e) => return Err(PublishError::Bus(e)),
            }
        }
    }

    fn topic(&self) -> &str {
        &self.topic
    }
}

/// Encode one record the way it goes onto the wire.
pub fn encode_record(record: &EventRecord) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(record)
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub EventPublisher {}

        #[async_trait]
        impl EventPublisher for EventPublisher {
            async fn send(&self, payload: &[u8]) -> Result<PublishReceipt, PublishError>;
            fn topic(&self) -> &str;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;
    use serde_json::json;

    #[test]
    fn test_encode_record_wire_shape() {
        let record = EventRecord {
            event: Event {
                time: "t1".to_string(),
                kind: "login".to_string(),
                detail: json!({"user": "u-1"}),
            },
            source: "web".to_string(),
            track: "abc".to_string(),
        };

        let bytes = encode_record(&record).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["source"], "web");
        assert_eq!(value["track"], "abc");
        assert_eq!(value["type"], "login");
        assert_eq!(value["detail"]["user"], "u-1");
    }
}
