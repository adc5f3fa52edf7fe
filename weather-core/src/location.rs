//! Best-effort place names for a coordinate.

use std::sync::Arc;

use tracing::debug;

use crate::{
    model::{Address, Coordinates},
    provider::ReverseGeocoder,
};

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Resolves coordinates to a display name. Never fails: any geocoding problem
/// degrades to the coordinate label.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn resolve_location(&self, coords: Coordinates) -> String {
        match self.geocoder.reverse(coords).await {
            Ok(place) => place_name(place.address.as_ref(), coords),
            Err(err) => {
                debug!(error = %err, "reverse geocoding failed, using coordinates as name");
                coords.label()
            }
        }
    }
}

/// Picks the display name from an address section.
///
/// No address at all gives the coordinate label; an address with none of
/// the known fields gives [`UNKNOWN_LOCATION`].
pub fn place_name(address: Option<&Address>, coords: Coordinates) -> String {
    match address {
        Some(address) => address.best_name().unwrap_or(UNKNOWN_LOCATION).to_string(),
        None => coords.label(),
    }
}
