use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    Config,
    codes,
    error::LookupError,
    location::LocationResolver,
    model::{Coordinates, CurrentConditions, WeatherReport},
    provider::{ForecastProvider, ReverseGeocoder, forecast_from_config, geocoder_from_config},
};

/// Current conditions for a coordinate, enriched with a place name.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    forecast: Arc<dyn ForecastProvider>,
    locations: LocationResolver,
}

impl WeatherLookup {
    pub fn new(forecast: Arc<dyn ForecastProvider>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self {
            forecast,
            locations: LocationResolver::new(geocoder),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(forecast_from_config(config), geocoder_from_config(config))
    }

    /// Fetches current conditions, then resolves the location name.
    ///
    /// The place name is only looked up once the forecast has been decoded;
    /// any forecast failure returns early without touching the geocoder.
    #[instrument(skip(self, coords), fields(lat = coords.latitude, lon = coords.longitude))]
    pub async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherReport, LookupError> {
        let mut body = self.forecast.current(coords).await?;

        let Some(current) = body.get_mut("current").map(serde_json::Value::take) else {
            return Err(LookupError::InvalidResponse(body));
        };

        let current: CurrentConditions =
            serde_json::from_value(current).map_err(LookupError::server)?;

        let weather = codes::describe(current.weather_code.as_ref());
        let location = self.locations.resolve_location(coords).await;

        debug!(%location, weather, "assembled weather report");

        Ok(WeatherReport {
            location,
            feels_like: current.feels_like(),
            lat: coords.latitude,
            lon: coords.longitude,
            temperature: current.temperature_2m,
            humidity: current.relative_humidity_2m,
            weather: weather.to_string(),
            wind_speed: current.wind_speed_10m,
            wind_direction: current.wind_direction_10m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::FetchError,
        model::{Address, Place},
    };
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    enum Canned {
        Body(Value),
        Timeout,
        Status(u16),
    }

    #[derive(Debug)]
    struct CannedForecast(Canned);

    #[async_trait]
    impl ForecastProvider for CannedForecast {
        async fn current(&self, _coords: Coordinates) -> Result<Value, FetchError> {
            match &self.0 {
                Canned::Body(body) => Ok(body.clone()),
                Canned::Timeout => Err(FetchError::Timeout),
                Canned::Status(status) => Err(FetchError::Status(*status)),
            }
        }
    }

    #[derive(Debug, Default)]
    struct CountingGeocoder {
        address: Option<Address>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ReverseGeocoder for CountingGeocoder {
        async fn reverse(&self, _coords: Coordinates) -> Result<Place, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Place {
                address: self.address.clone(),
            })
        }
    }

    fn springfield() -> Arc<CountingGeocoder> {
        Arc::new(CountingGeocoder {
            address: Some(Address {
                city: Some("Springfield".into()),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    fn lookup(forecast: Canned, geocoder: Arc<CountingGeocoder>) -> WeatherLookup {
        WeatherLookup::new(Arc::new(CannedForecast(forecast)), geocoder)
    }

    #[tokio::test]
    async fn assembles_full_report() {
        let body = json!({
            "latitude": 39.78,
            "longitude": -89.65,
            "current": {
                "temperature_2m": 18.2,
                "relative_humidity_2m": 64,
                "apparent_temperature": 16.9,
                "weather_code": 3,
                "wind_speed_10m": 4.1,
                "wind_direction_10m": 230
            }
        });

        let report = lookup(Canned::Body(body), springfield())
            .fetch_weather(Coordinates::new(39.7817, -89.6501))
            .await
            .unwrap();

        assert_eq!(
            report,
            WeatherReport {
                location: "Springfield".into(),
                feels_like: Some(16.9),
                lat: 39.7817,
                lon: -89.6501,
                temperature: Some(18.2),
                humidity: Some(64.0),
                weather: "Overcast".into(),
                wind_speed: Some(4.1),
                wind_direction: Some(230.0),
            }
        );
    }

    #[tokio::test]
    async fn sparse_current_block_uses_defaults() {
        let body = json!({ "current": { "temperature_2m": 7.5 } });

        let report = lookup(Canned::Body(body), springfield())
            .fetch_weather(Coordinates::new(1.0, 2.0))
            .await
            .unwrap();

        assert_eq!(report.weather, "Clear sky");
        assert_eq!(report.feels_like, Some(7.5));
        assert_eq!(report.humidity, None);
        assert_eq!(report.wind_speed, None);
    }

    #[tokio::test]
    async fn unmapped_or_null_code_is_unknown() {
        for code in [json!(200), Value::Null] {
            let body = json!({ "current": { "weather_code": code } });
            let report = lookup(Canned::Body(body), springfield())
                .fetch_weather(Coordinates::new(1.0, 2.0))
                .await
                .unwrap();
            assert_eq!(report.weather, "Unknown");
        }
    }

    #[tokio::test]
    async fn non_integer_codes_still_produce_report() {
        let cases = [
            (json!(3.0), "Overcast"),
            (json!("3"), "Unknown"),
            (json!(3.5), "Unknown"),
        ];

        for (code, expected) in cases {
            let body = json!({ "current": { "temperature_2m": 18.2, "weather_code": code } });
            let report = lookup(Canned::Body(body), springfield())
                .fetch_weather(Coordinates::new(1.0, 2.0))
                .await
                .unwrap();

            assert_eq!(report.weather, expected);
            assert_eq!(report.temperature, Some(18.2));
            assert_eq!(report.location, "Springfield");
        }
    }

    #[tokio::test]
    async fn missing_current_echoes_body() {
        let body = json!({ "reason": "Latitude must be in range of -90 to 90°", "error": true });
        let geocoder = springfield();

        let err = lookup(Canned::Body(body.clone()), geocoder.clone())
            .fetch_weather(Coordinates::new(120.0, 0.0))
            .await
            .unwrap_err();

        match err {
            LookupError::InvalidResponse(echoed) => assert_eq!(echoed, body),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn timeout_yields_timeout_error_only() {
        let geocoder = springfield();

        let err = lookup(Canned::Timeout, geocoder.clone())
            .fetch_weather(Coordinates::new(1.0, 2.0))
            .await
            .unwrap_err();

        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "error": "Request timeout",
                "message": "The weather service took too long to respond"
            })
        );
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upstream_status_is_reported() {
        let err = lookup(Canned::Status(429), springfield())
            .fetch_weather(Coordinates::new(1.0, 2.0))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::UpstreamStatus(429)));
        assert_eq!(err.to_string(), "Weather API error: 429");
    }

    #[tokio::test]
    async fn malformed_current_block_is_a_server_error() {
        let body = json!({ "current": { "temperature_2m": "warm" } });

        let err = lookup(Canned::Body(body), springfield())
            .fetch_weather(Coordinates::new(1.0, 2.0))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Server(_)));
        assert!(err.message().unwrap().starts_with("An error occurred: "));
    }

    #[tokio::test]
    async fn geocoder_called_once_per_lookup() {
        let geocoder = springfield();
        let body = json!({ "current": { "weather_code": 61 } });

        let report = lookup(Canned::Body(body), geocoder.clone())
            .fetch_weather(Coordinates::new(1.0, 2.0))
            .await
            .unwrap();

        assert_eq!(report.weather, "Slight rain");
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }
}
