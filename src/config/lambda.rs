#[cfg(feature = "lambda")]
use crate::core::{PublishReceipt, RecordSink, StreamRecord};
#[cfg(feature = "lambda")]
use crate::utils::error::{RelayError, Result};
#[cfg(feature = "lambda")]
use aws_sdk_kinesis::operation::put_record::PutRecordError;
#[cfg(feature = "lambda")]
use aws_sdk_kinesis::primitives::Blob;
#[cfg(feature = "lambda")]
use aws_sdk_kinesis::Client as KinesisClient;

/// Publishes records to Kinesis Data Streams through a client built once per process.
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct KinesisSink {
    client: KinesisClient,
}

#[cfg(feature = "lambda")]
impl KinesisSink {
    pub fn new(client: KinesisClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "lambda")]
impl RecordSink for KinesisSink {
    async fn put_record(&self, record: &StreamRecord) -> Result<PublishReceipt> {
        let result = self
            .client
            .put_record()
            .stream_name(&record.stream_name)
            .partition_key(&record.partition_key)
            .data(Blob::new(record.data.as_bytes()))
            .send()
            .await;

        match result {
            Ok(output) => Ok(PublishReceipt {
                shard_id: output.shard_id().to_string(),
                sequence_number: output.sequence_number().to_string(),
            }),
            Err(err) => {
                let message = match err.into_service_error() {
                    PutRecordError::ResourceNotFoundException(e) => {
                        format!("stream '{}' not found: {}", record.stream_name, e)
                    }
                    PutRecordError::ProvisionedThroughputExceededException(e) => {
                        format!("provisioned throughput exceeded: {}", e)
                    }
                    PutRecordError::AccessDeniedException(e) => format!("access denied: {}", e),
                    PutRecordError::InvalidArgumentException(e) => {
                        format!("invalid argument: {}", e)
                    }
                    err => format!("{}", err),
                };
                tracing::warn!("Kinesis put_record rejected: {}", message);
                Err(RelayError::PublishError { message })
            }
        }
    }
}
