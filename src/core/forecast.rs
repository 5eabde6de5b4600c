use crate::config::relay::RelayConfig;
use crate::core::{ForecastPayload, ForecastSource};
use crate::utils::error::{RelayError, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

const JSON_CONTENT: &str = "application/json";
const FORECAST_PATH: &str = "/v4/weather/forecast";

/// Tomorrow.io forecast endpoint for one fixed location.
#[derive(Debug, Clone)]
pub struct TomorrowClient {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
    api_key: Option<String>,
}

impl TomorrowClient {
    pub fn new(client: Client, config: &RelayConfig) -> Self {
        Self {
            client,
            base_url: config.forecast_base_url.trim_end_matches('/').to_string(),
            latitude: config.latitude,
            longitude: config.longitude,
            api_key: config.api_key.clone(),
        }
    }

    pub fn location(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    pub fn request_url(&self) -> String {
        format!(
            "{}{}?location={}&apikey={}",
            self.base_url,
            FORECAST_PATH,
            self.location(),
            self.api_key.as_deref().unwrap_or_default()
        )
    }

    /// Request URL safe to put in logs.
    fn redacted_url(&self) -> String {
        format!(
            "{}{}?location={}&apikey=***",
            self.base_url,
            FORECAST_PATH,
            self.location()
        )
    }
}

#[async_trait::async_trait]
impl ForecastSource for TomorrowClient {
    async fn fetch(&self) -> Result<ForecastPayload> {
        tracing::debug!("Making forecast request to: {}", self.redacted_url());
        let response = self
            .client
            .get(self.request_url())
            .header(ACCEPT, JSON_CONTENT)
            .header(CONTENT_TYPE, JSON_CONTENT)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Forecast response status: {}", status);
        if !status.is_success() {
            // 錯誤回應也是 JSON，照樣轉發
            tracing::warn!("Forecast API answered with status {}", status);
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|source| RelayError::ParseError {
                status: status.as_u16(),
                source,
            })?;

        tracing::debug!("Received forecast payload ({} bytes)", body.len());
        Ok(ForecastPayload::new(value))
    }
}
