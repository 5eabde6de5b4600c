use crate::domain::model::{ForecastPayload, PublishReceipt, StreamRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self) -> Result<ForecastPayload>;
}

pub trait RecordSink: Send + Sync {
    fn put_record(
        &self,
        record: &StreamRecord,
    ) -> impl std::future::Future<Output = Result<PublishReceipt>> + Send;
}
