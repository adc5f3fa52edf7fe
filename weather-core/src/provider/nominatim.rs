use async_trait::async_trait;
use reqwest::{Client, header::USER_AGENT};
use std::time::Duration;
use tracing::debug;

use crate::{
    config::GeocodingConfig,
    error::FetchError,
    model::{Coordinates, Place},
};

use super::{ReverseGeocoder, truncate_body};

/// City/town granularity.
const ZOOM: &str = "10";

/// OpenStreetMap Nominatim reverse geocoder.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: user_agent.into(),
            timeout,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &GeocodingConfig) -> Self {
        Self::new(config.base_url.clone(), config.user_agent.clone(), config.timeout())
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, coords: Coordinates) -> Result<Place, FetchError> {
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();

        let res = self
            .http
            .get(&self.base_url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("format", "json"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("zoom", ZOOM),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "Nominatim request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
