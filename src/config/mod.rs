#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod relay;

#[cfg(feature = "cli")]
use crate::config::relay::{RelayConfig, DEFAULT_FORECAST_BASE_URL, DEFAULT_STREAM_NAME};
#[cfg(feature = "cli")]
use crate::core::relay::PublishPolicy;
#[cfg(feature = "cli")]
use clap::Parser;

// Local runs publish into a `LocalSink`, so there is no region flag.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "forecast-relay")]
#[command(about = "Fetch the weather forecast once and relay it to a local stream file")]
pub struct CliConfig {
    #[arg(long, env = "TOMORROW_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "TOMORROW_API_BASE_URL", default_value = DEFAULT_FORECAST_BASE_URL)]
    pub forecast_base_url: String,

    #[arg(long, env = "STREAM_NAME", default_value = DEFAULT_STREAM_NAME)]
    pub stream_name: String,

    #[arg(long, env = "RELAY_PUBLISH_POLICY", default_value = "fire-and-forget")]
    pub publish_policy: PublishPolicy,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            forecast_base_url: self.forecast_base_url.clone(),
            api_key: self.api_key.clone(),
            stream_name: self.stream_name.clone(),
            publish_policy: self.publish_policy,
            ..RelayConfig::default()
        }
    }
}
