use crate::core::{PublishReceipt, RecordSink, StreamRecord};
use crate::utils::error::Result;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Stand-in for the stream when running locally: one JSON line per record in
/// `{base_path}/{stream_name}.jsonl`.
#[derive(Debug, Clone)]
pub struct LocalSink {
    base_path: String,
}

impl LocalSink {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn stream_file(&self, stream_name: &str) -> PathBuf {
        Path::new(&self.base_path).join(format!("{}.jsonl", stream_name))
    }
}

impl RecordSink for LocalSink {
    async fn put_record(&self, record: &StreamRecord) -> Result<PublishReceipt> {
        let full_path = self.stream_file(&record.stream_name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full_path)?;
        writeln!(file, "{}", record.data)?;

        tracing::debug!("Appended record to {}", full_path.display());
        Ok(PublishReceipt {
            shard_id: format!("local-{}", record.partition_key),
            sequence_number: Utc::now().timestamp_micros().to_string(),
        })
    }
}
