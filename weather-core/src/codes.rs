//! WMO weather code descriptions.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

use serde_json::Value;
use std::{collections::HashMap, sync::LazyLock};

pub const UNKNOWN: &str = "Unknown";

static WEATHER_CODES: LazyLock<HashMap<i64, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (0, "Clear sky"),
        (1, "Mainly clear"),
        (2, "Partly cloudy"),
        (3, "Overcast"),
        (45, "Foggy"),
        (48, "Depositing rime fog"),
        (51, "Light drizzle"),
        (53, "Moderate drizzle"),
        (55, "Dense drizzle"),
        (61, "Slight rain"),
        (63, "Moderate rain"),
        (65, "Heavy rain"),
        (71, "Slight snow"),
        (73, "Moderate snow"),
        (75, "Heavy snow"),
        (77, "Snow grains"),
        (80, "Slight rain showers"),
        (81, "Moderate rain showers"),
        (82, "Violent rain showers"),
        (85, "Slight snow showers"),
        (86, "Heavy snow showers"),
        (95, "Thunderstorm"),
        (96, "Thunderstorm with slight hail"),
        (99, "Thunderstorm with heavy hail"),
    ])
});

/// Description for a WMO code, or [`UNKNOWN`] for codes outside the table.
pub fn lookup(code: i64) -> &'static str {
    WEATHER_CODES.get(&code).copied().unwrap_or(UNKNOWN)
}

/// Describes a code as the provider sent it.
///
/// Integers and whole floats are looked up; anything else (absent, null,
/// strings, fractional numbers) is [`UNKNOWN`].
pub fn describe(code: Option<&Value>) -> &'static str {
    code.and_then(as_code).map_or(UNKNOWN, lookup)
}

fn as_code(value: &Value) -> Option<i64> {
    if let Some(code) = value.as_i64() {
        return Some(code);
    }

    let float = value.as_f64()?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float <= i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}
