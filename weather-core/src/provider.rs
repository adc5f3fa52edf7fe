use crate::{
    Config,
    error::FetchError,
    model::{Coordinates, Place},
    provider::{nominatim::NominatimGeocoder, open_meteo::OpenMeteoProvider},
};
use async_trait::async_trait;
use serde_json::Value;
use std::{fmt::Debug, sync::Arc};

pub mod nominatim;
pub mod open_meteo;

/// Source of current atmospheric conditions.
///
/// Returns the decoded body as-is so the caller can echo it back when it
/// lacks the expected shape.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn current(&self, coords: Coordinates) -> Result<Value, FetchError>;
}

/// Maps a coordinate to a place description.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync + Debug {
    async fn reverse(&self, coords: Coordinates) -> Result<Place, FetchError>;
}

/// Construct the forecast provider from config.
pub fn forecast_from_config(config: &Config) -> Arc<dyn ForecastProvider> {
    Arc::new(OpenMeteoProvider::from_config(&config.forecast))
}

/// Construct the reverse geocoder from config.
pub fn geocoder_from_config(config: &Config) -> Arc<dyn ReverseGeocoder> {
    Arc::new(NominatimGeocoder::from_config(&config.geocoding))
}

/// Shortens an upstream body for log output.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
