use crate::{env_or_default, env_required, ConfigError, FromEnv};

/// Message bus configuration for the event publish pipeline.
///
/// The bus is a Redis Streams instance: `url` points at the broker,
/// `topic` is the stream events are appended to. Each XADD gets a
/// synchronous broker acknowledgment, so per-message success is only
/// declared once the broker has accepted the entry.
#[derive(Clone, Debug)]
pub struct BusConfig {
    /// Broker connection string, e.g. "redis://localhost:6379"
    pub url: String,
    /// Stream name events are published to
    pub topic: String,
    /// Send attempts per message before surfacing failure
    pub retry_limit: u32,
    /// Approximate stream length cap (XADD MAXLEN ~)
    pub max_stream_length: i64,
}

impl BusConfig {
    pub fn new(url: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            topic: topic.into(),
            retry_limit: 3,
            max_stream_length: 100_000,
        }
    }
}

impl FromEnv for BusConfig {
    /// Requires BUS_URL to be set (no default). Optional:
    /// - EVENTS_TOPIC: defaults to "events"
    /// - BUS_RETRY_LIMIT: defaults to 3
    /// - BUS_MAX_STREAM_LENGTH: defaults to 100000
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("BUS_URL")?;
        let topic = env_or_default("EVENTS_TOPIC", "events");

        let retry_limit = env_or_default("BUS_RETRY_LIMIT", "3")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "BUS_RETRY_LIMIT".to_string(),
                details: format!("{}", e),
            })?;

        let max_stream_length = env_or_default("BUS_MAX_STREAM_LENGTH", "100000")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "BUS_MAX_STREAM_LENGTH".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            url,
            topic,
            retry_limit,
            max_stream_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_config_from_env_success() {
        temp_env::with_vars(
            [
                ("BUS_URL", Some("redis://localhost:6379")),
                ("EVENTS_TOPIC", None),
                ("BUS_RETRY_LIMIT", None),
                ("BUS_MAX_STREAM_LENGTH", None),
            ],
            || {
                let config = BusConfig::from_env().unwrap();
                assert_eq!(config.url, "redis://localhost:6379");
                assert_eq!(config.topic, "events");
                assert_eq!(config.retry_limit, 3);
                assert_eq!(config.max_stream_length, 100_000);
            },
        );
    }

    #[test]
    fn test_bus_config_from_env_missing_url() {
        temp_env::with_var_unset("BUS_URL", || {
            let result = BusConfig::from_env();
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("BUS_URL"));
        });
    }

    #[test]
    fn test_bus_config_from_env_overrides() {
        temp_env::with_vars(
            [
                ("BUS_URL", Some("redis://bus:6379")),
                ("EVENTS_TOPIC", Some("shop-events")),
                ("BUS_RETRY_LIMIT", Some("5")),
                ("BUS_MAX_STREAM_LENGTH", Some("5000")),
            ],
            || {
                let config = BusConfig::from_env().unwrap();
                assert_eq!(config.topic, "shop-events");
                assert_eq!(config.retry_limit, 5);
                assert_eq!(config.max_stream_length, 5000);
            },
        );
    }

    #[test]
    fn test_bus_config_from_env_invalid_retry_limit() {
        temp_env::with_vars(
            [
                ("BUS_URL", Some("redis://localhost:6379")),
                ("BUS_RETRY_LIMIT", Some("lots")),
            ],
            || {
                let result = BusConfig::from_env();
                assert!(result.is_err());
                assert!(result.unwrap_err().to_string().contains("BUS_RETRY_LIMIT"));
            },
        );
    }

    #[test]
    fn test_bus_config_new_defaults() {
        let config = BusConfig::new("redis://localhost:6379", "events");
        assert_eq!(config.retry_limit, 3);
        assert_eq!(config.max_stream_length, 100_000);
    }
}
