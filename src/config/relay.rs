use crate::core::relay::PublishPolicy;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_aws_region, validate_length, validate_range, validate_stream_name, validate_url,
    Validate,
};
use std::env;

pub const DEFAULT_FORECAST_BASE_URL: &str = "https://api.tomorrow.io";
pub const FORECAST_LATITUDE: f64 = -15.31227249;
pub const FORECAST_LONGITUDE: f64 = -49.11664409;
pub const DEFAULT_STREAM_NAME: &str = "broker";
pub const DEFAULT_STREAM_REGION: &str = "us-east-1";
pub const PARTITION_KEY: &str = "partition_key";

/// Settings resolved once at startup and shared by every invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub forecast_base_url: String,
    /// Sent as-is; an absent key still produces a request.
    pub api_key: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub stream_name: String,
    pub stream_region: String,
    pub partition_key: String,
    pub publish_policy: PublishPolicy,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            forecast_base_url: DEFAULT_FORECAST_BASE_URL.to_string(),
            api_key: None,
            latitude: FORECAST_LATITUDE,
            longitude: FORECAST_LONGITUDE,
            stream_name: DEFAULT_STREAM_NAME.to_string(),
            stream_region: DEFAULT_STREAM_REGION.to_string(),
            partition_key: PARTITION_KEY.to_string(),
            publish_policy: PublishPolicy::default(),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let publish_policy = match lookup("RELAY_PUBLISH_POLICY") {
            Some(raw) => raw.parse()?,
            None => defaults.publish_policy,
        };

        Ok(Self {
            forecast_base_url: lookup("TOMORROW_API_BASE_URL")
                .unwrap_or(defaults.forecast_base_url),
            api_key: lookup("TOMORROW_API_KEY"),
            stream_name: lookup("STREAM_NAME").unwrap_or(defaults.stream_name),
            stream_region: lookup("STREAM_REGION").unwrap_or(defaults.stream_region),
            publish_policy,
            ..defaults
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_url("forecast_base_url", &self.forecast_base_url)?;
        validate_range("latitude", self.latitude, -90.0, 90.0)?;
        validate_range("longitude", self.longitude, -180.0, 180.0)?;
        validate_stream_name("stream_name", &self.stream_name)?;
        validate_length("partition_key", &self.partition_key, 1, 256)?;
        validate_aws_region("stream_region", &self.stream_region)?;

        if !self.has_api_key() {
            tracing::warn!("⚠️ TOMORROW_API_KEY is not set, forecast requests will carry an empty key");
        }

        tracing::info!("✅ Relay configuration validation passed");
        Ok(())
    }
}
