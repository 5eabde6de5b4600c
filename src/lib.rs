pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalSink, CliConfig};

#[cfg(feature = "lambda")]
pub use config::lambda::KinesisSink;

pub use config::relay::RelayConfig;
pub use crate::core::{
    forecast::TomorrowClient,
    relay::{handle_invocation, ForecastRelay, PublishPolicy, PublishStatus, RelayOutcome},
};
pub use domain::model::{ForecastPayload, InvocationResponse, PublishReceipt, StreamRecord};
pub use utils::error::{RelayError, Result};
