//! Places entered by the user and their geocoded form.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lat,lng` with six decimals, the form mapping services accept as a place.
    pub fn to_query(&self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lng)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coord: Coordinate) -> Self {
        (coord.lat, coord.lng)
    }
}

/// The area a trip takes place in.
///
/// Every place name is qualified with these parts before geocoding so that
/// "Castle" resolves to the one in the chosen city rather than anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TripArea {
    pub country: String,
    pub region: String,
    pub city: Option<String>,
}

impl TripArea {
    pub fn new(country: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            region: region.into(),
            city: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Geocoding query for a place name: `name, city, region, country`,
    /// skipping blank parts.
    pub fn query_for(&self, name: &str) -> String {
        [
            Some(name),
            self.city.as_deref(),
            Some(self.region.as_str()),
            Some(self.country.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Best match returned by a geocoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// Normalized address as reported by the service.
    pub address: String,
    pub coordinate: Coordinate,
    /// The service could only match part of the query.
    pub partial_match: bool,
}

/// A user-entered location that resolved to an address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    /// Name as the user typed it.
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
}

impl Place {
    pub fn new(name: impl Into<String>, address: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            coordinate,
        }
    }
}
