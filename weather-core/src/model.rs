use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A latitude/longitude pair, forwarded verbatim to both providers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `"{lat:.2}, {lon:.2}"`, used when no place name is available.
    pub fn label(&self) -> String {
        format!("{:.2}, {:.2}", self.latitude, self.longitude)
    }
}

/// Flattened current conditions returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub feels_like: Option<f64>,
    pub lat: f64,
    pub lon: f64,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub weather: String,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
}

/// The `current` section of an Open-Meteo forecast response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    /// Kept as sent; see [`crate::codes::describe`]. Missing means clear
    /// sky (0); an explicit `null` stays `None`.
    #[serde(default = "clear_sky_code")]
    pub weather_code: Option<Value>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
}

fn clear_sky_code() -> Option<Value> {
    Some(Value::from(0))
}

impl CurrentConditions {
    pub fn feels_like(&self) -> Option<f64> {
        self.apparent_temperature.or(self.temperature_2m)
    }
}

/// Nominatim reverse-geocoding response; only the address is used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Place {
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
}

impl Address {
    /// First non-empty of city, town, village, county, state.
    pub fn best_name(&self) -> Option<&str> {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.county,
            &self.state,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .find(|name| !name.is_empty())
    }
}
