use crate::core::encoding::encode_record;
use crate::utils::error::Result;
use serde::Serialize;

/// Forecast document exactly as the weather service returned it.
///
/// The schema is never inspected; the value is carried through to the stream
/// with object keys kept in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPayload(pub serde_json::Value);

impl ForecastPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn to_record_data(&self) -> Result<String> {
        encode_record(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRecord {
    pub stream_name: String,
    pub partition_key: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub shard_id: String,
    pub sequence_number: String,
}

/// Value handed back to the function runtime after every completed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub const GREETING: &'static str = "Hello from Lambda!";

    /// `{"statusCode": 200, "body": "\"Hello from Lambda!\""}`, the body being a JSON string literal.
    pub fn greeting() -> Self {
        Self {
            status_code: 200,
            body: format!("\"{}\"", Self::GREETING),
        }
    }
}
