use crate::config::relay::RelayConfig;
use crate::core::{
    ForecastSource, InvocationResponse, PublishReceipt, RecordSink, StreamRecord,
};
use crate::utils::error::{RelayError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// What a failed publish does to the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishPolicy {
    /// Log the failure and still report success.
    #[default]
    FireAndForget,
    /// Fail the invocation with `PublishError`.
    Strict,
}

impl FromStr for PublishPolicy {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fire-and-forget" | "fire_and_forget" => Ok(Self::FireAndForget),
            "strict" => Ok(Self::Strict),
            other => Err(RelayError::InvalidConfigValueError {
                field: "publish_policy".to_string(),
                value: other.to_string(),
                reason: "Expected 'fire-and-forget' or 'strict'".to_string(),
            }),
        }
    }
}

impl fmt::Display for PublishPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FireAndForget => write!(f, "fire-and-forget"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStatus {
    Published(PublishReceipt),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RelayOutcome {
    pub fetched_at: DateTime<Utc>,
    pub record_bytes: usize,
    pub publish: PublishStatus,
}

/// Fetches one forecast and publishes it as one stream record.
pub struct ForecastRelay<F: ForecastSource, S: RecordSink> {
    source: F,
    sink: S,
    stream_name: String,
    partition_key: String,
    policy: PublishPolicy,
}

impl<F: ForecastSource, S: RecordSink> ForecastRelay<F, S> {
    pub fn new(source: F, sink: S, config: &RelayConfig) -> Self {
        Self {
            source,
            sink,
            stream_name: config.stream_name.clone(),
            partition_key: config.partition_key.clone(),
            policy: config.publish_policy,
        }
    }

    pub async fn run(&self) -> Result<RelayOutcome> {
        tracing::info!("Fetching forecast...");
        let payload = self.source.fetch().await?;
        let fetched_at = Utc::now();

        let record = StreamRecord {
            stream_name: self.stream_name.clone(),
            partition_key: self.partition_key.clone(),
            data: payload.to_record_data()?,
        };
        let record_bytes = record.data.len();

        tracing::info!(
            "Publishing {} bytes to stream '{}' (partition key '{}')",
            record_bytes,
            record.stream_name,
            record.partition_key
        );

        let publish = match self.sink.put_record(&record).await {
            Ok(receipt) => {
                tracing::info!(
                    "✅ Record published: shard {}, sequence {}",
                    receipt.shard_id,
                    receipt.sequence_number
                );
                PublishStatus::Published(receipt)
            }
            Err(e) => match self.policy {
                PublishPolicy::Strict => return Err(e),
                PublishPolicy::FireAndForget => {
                    tracing::error!("❌ Publish failed, ignored by {} policy: {}", self.policy, e);
                    PublishStatus::Failed(e.to_string())
                }
            },
        };

        Ok(RelayOutcome {
            fetched_at,
            record_bytes,
            publish,
        })
    }
}

/// One function invocation. The trigger event is accepted but never read.
pub async fn handle_invocation<F, S>(
    relay: &ForecastRelay<F, S>,
    _event: &serde_json::Value,
) -> Result<InvocationResponse>
where
    F: ForecastSource,
    S: RecordSink,
{
    let outcome = relay.run().await?;
    match &outcome.publish {
        PublishStatus::Published(receipt) => tracing::info!(
            "Forecast fetched at {} relayed as {} bytes (sequence {})",
            outcome.fetched_at.to_rfc3339(),
            outcome.record_bytes,
            receipt.sequence_number
        ),
        PublishStatus::Failed(reason) => tracing::warn!(
            "Forecast fetched at {} was not published: {}",
            outcome.fetched_at.to_rfc3339(),
            reason
        ),
    }
    Ok(InvocationResponse::greeting())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forecast::TomorrowClient;
    use httpmock::prelude::*;
    use reqwest::Client;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockSink {
        records: Arc<Mutex<Vec<StreamRecord>>>,
        fail: bool,
    }

    impl MockSink {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        async fn records(&self) -> Vec<StreamRecord> {
            self.records.lock().await.clone()
        }
    }

    impl RecordSink for MockSink {
        async fn put_record(&self, record: &StreamRecord) -> Result<PublishReceipt> {
            let mut records = self.records.lock().await;
            records.push(record.clone());
            if self.fail {
                return Err(RelayError::PublishError {
                    message: "ResourceNotFoundException: stream broker not found".to_string(),
                });
            }
            Ok(PublishReceipt {
                shard_id: "shardId-000000000000".to_string(),
                sequence_number: records.len().to_string(),
            })
        }
    }

    fn relay_for(
        server: &MockServer,
        sink: MockSink,
        policy: PublishPolicy,
    ) -> ForecastRelay<TomorrowClient, MockSink> {
        let config = RelayConfig {
            forecast_base_url: server.base_url(),
            api_key: Some("test-key".to_string()),
            publish_policy: policy,
            ..RelayConfig::default()
        };
        let source = TomorrowClient::new(Client::new(), &config);
        ForecastRelay::new(source, sink, &config)
    }

    #[tokio::test]
    async fn test_run_publishes_spaced_record_to_broker() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/v4/weather/forecast");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"{"data":{"temperature":21.5}}"#);
        });

        let sink = MockSink::default();
        let relay = relay_for(&server, sink.clone(), PublishPolicy::FireAndForget);

        let before = Utc::now();
        let outcome = relay.run().await.unwrap();
        let after = Utc::now();

        api_mock.assert();
        let records = sink.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, r#"{"data": {"temperature": 21.5}}"#);
        assert_eq!(records[0].partition_key, "partition_key");
        assert_eq!(records[0].stream_name, "broker");
        assert_eq!(outcome.record_bytes, records[0].data.len());
        assert!(matches!(outcome.publish, PublishStatus::Published(_)));
        assert!(before <= outcome.fetched_at && outcome.fetched_at <= after);
    }

    #[tokio::test]
    async fn test_run_parse_failure_skips_publish() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/v4/weather/forecast");
            then.status(200).body("not json at all");
        });

        let sink = MockSink::default();
        let relay = relay_for(&server, sink.clone(), PublishPolicy::FireAndForget);

        let result = relay.run().await;

        api_mock.assert();
        assert!(matches!(result, Err(RelayError::ParseError { .. })));
        assert!(sink.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_fire_and_forget_ignores_publish_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v4/weather/forecast");
            then.status(200).json_body(serde_json::json!({"data": {}}));
        });

        let sink = MockSink::failing();
        let relay = relay_for(&server, sink.clone(), PublishPolicy::FireAndForget);

        let response = handle_invocation(&relay, &serde_json::json!({})).await.unwrap();

        assert_eq!(response, InvocationResponse::greeting());
        assert_eq!(sink.records().await.len(), 1);
    }

    #[tokio::test]
    async fn test_strict_policy_surfaces_publish_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v4/weather/forecast");
            then.status(200).json_body(serde_json::json!({"data": {}}));
        });

        let relay = relay_for(&server, MockSink::failing(), PublishPolicy::Strict);

        let result = handle_invocation(&relay, &serde_json::json!({})).await;

        assert!(matches!(result, Err(RelayError::PublishError { .. })));
    }

    #[tokio::test]
    async fn test_event_payload_does_not_change_outbound_calls() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v4/weather/forecast")
                .query_param("location", "-15.31227249,-49.11664409")
                .query_param("apikey", "test-key");
            then.status(200).json_body(serde_json::json!({"data": {"temperature": 18}}));
        });

        let sink = MockSink::default();
        let relay = relay_for(&server, sink.clone(), PublishPolicy::FireAndForget);

        let scheduled = serde_json::json!({"source": "aws.events", "detail-type": "Scheduled Event"});
        let hostile = serde_json::json!({
            "location": "0,0",
            "apikey": "other",
            "stream_name": "elsewhere",
            "partition_key": "shard-7"
        });

        handle_invocation(&relay, &scheduled).await.unwrap();
        handle_invocation(&relay, &hostile).await.unwrap();

        api_mock.assert_hits(2);
        let records = sink.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
        assert_eq!(records[1].stream_name, "broker");
        assert_eq!(records[1].partition_key, "partition_key");
    }

    #[test]
    fn test_publish_policy_parsing() {
        assert_eq!("strict".parse::<PublishPolicy>().unwrap(), PublishPolicy::Strict);
        assert_eq!(
            " Fire-And-Forget ".parse::<PublishPolicy>().unwrap(),
            PublishPolicy::FireAndForget
        );
        assert!("sometimes".parse::<PublishPolicy>().is_err());
        assert_eq!(PublishPolicy::default().to_string(), "fire-and-forget");
    }
}
