use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{config::ForecastConfig, error::FetchError, model::Coordinates};

use super::{ForecastProvider, truncate_body};

/// Fields requested from the `current` block.
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
                                  weather_code,wind_speed_10m,wind_direction_10m";

/// Open-Meteo forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.base_url.clone(), config.timeout())
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn current(&self, coords: Coordinates) -> Result<Value, FetchError> {
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();

        debug!(%latitude, %longitude, "requesting Open-Meteo current conditions");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("temperature_unit", "celsius"),
                ("wind_speed_unit", "ms"),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "Open-Meteo request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
