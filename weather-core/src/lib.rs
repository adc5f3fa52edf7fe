//! Core library for the weather relay.
//!
//! This crate defines:
//! - Configuration handling
//! - Forecast and reverse-geocoding providers
//! - The WMO weather code table
//! - Weather lookup and its error boundary
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod codes;
pub mod config;
pub mod error;
pub mod location;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::{Config, ForecastConfig, GeocodingConfig, ServerConfig};
pub use error::{FetchError, LookupError};
pub use location::LocationResolver;
pub use lookup::WeatherLookup;
pub use model::{Address, Coordinates, CurrentConditions, Place, WeatherReport};
pub use provider::{ForecastProvider, ReverseGeocoder};
