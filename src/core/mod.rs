pub mod encoding;
pub mod forecast;
pub mod relay;

pub use crate::domain::model::{ForecastPayload, InvocationResponse, PublishReceipt, StreamRecord};
pub use crate::domain::ports::{ForecastSource, RecordSink};
pub use crate::utils::error::Result;
