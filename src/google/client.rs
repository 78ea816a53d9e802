use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ConfigError, ProviderError};
use crate::location::{Coordinate, GeocodedAddress, Place};
use crate::polyline::Polyline;
use crate::traits::{
    Directions, DirectionsProvider, DistanceMatrixProvider, Geocoder, MatrixBlock, MatrixElement,
    TravelMode,
};

use super::config::GoogleMapsConfig;
use super::response::{
    DirectionsResponse, DistanceMatrixResponse, GeocodeResponse, MatrixCell, STATUS_OK,
    STATUS_ZERO_RESULTS,
};

/// Distance Matrix API request limits.
const MAX_MATRIX_DIMENSION: usize = 25;
const MAX_MATRIX_ELEMENTS: usize = 100;

/// Blocking client for the Geocoding, Distance Matrix and Directions APIs.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    config: GoogleMapsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleMapsClient {
    pub fn new(config: GoogleMapsConfig) -> Result<Self, ConfigError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GoogleMapsConfig {
        &self.config
    }

    /// GETs `endpoint` with `params` plus the API key and decodes the body.
    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        query.push(("key", self.config.api_key.as_str()));

        debug!(endpoint, "calling Google Maps");
        let response = self
            .client
            .get(self.config.endpoint_url(endpoint))
            .query(&query)
            .send()
            .and_then(|resp| resp.error_for_status())
            // The URL carries the key; never let it reach error messages.
            .map_err(|err| ProviderError::Http {
                endpoint,
                source: err.without_url(),
            })?;

        response.json::<T>().map_err(|err| ProviderError::Malformed {
            endpoint,
            message: err.without_url().to_string(),
        })
    }
}

fn check_status(
    endpoint: &'static str,
    status: &str,
    message: Option<String>,
) -> Result<(), ProviderError> {
    if status == STATUS_OK {
        Ok(())
    } else {
        Err(ProviderError::Service {
            endpoint,
            status: status.to_string(),
            message,
        })
    }
}

impl Geocoder for GoogleMapsClient {
    fn geocode(&self, query: &str) -> Result<Option<GeocodedAddress>, ProviderError> {
        let body: GeocodeResponse = self.get_json("geocode", &[("address", query.to_string())])?;
        if body.status == STATUS_ZERO_RESULTS {
            return Ok(None);
        }
        check_status("geocode", &body.status, body.error_message)?;

        if body.results.len() > 1 {
            debug!(query, candidates = body.results.len(), "geocode returned several matches; using the first");
        }
        Ok(body.results.into_iter().next().map(|result| GeocodedAddress {
            address: result.formatted_address,
            coordinate: Coordinate::new(result.geometry.location.lat, result.geometry.location.lng),
            partial_match: result.partial_match,
        }))
    }
}

impl DistanceMatrixProvider for GoogleMapsClient {
    fn max_dimension(&self) -> usize {
        MAX_MATRIX_DIMENSION
    }

    fn max_elements(&self) -> usize {
        MAX_MATRIX_ELEMENTS
    }

    fn matrix_block(
        &self,
        origins: &[Place],
        destinations: &[Place],
        mode: TravelMode,
    ) -> Result<MatrixBlock, ProviderError> {
        let join = |places: &[Place]| {
            places
                .iter()
                .map(|place| place.address.as_str())
                .collect::<Vec<_>>()
                .join("|")
        };
        let body: DistanceMatrixResponse = self.get_json(
            "distancematrix",
            &[
                ("origins", join(origins)),
                ("destinations", join(destinations)),
                ("mode", mode.as_str().to_string()),
            ],
        )?;
        check_status("distancematrix", &body.status, body.error_message)?;

        Ok(body
            .rows
            .into_iter()
            .map(|row| row.elements.into_iter().map(matrix_element).collect())
            .collect())
    }
}

fn matrix_element(cell: MatrixCell) -> Option<MatrixElement> {
    if cell.status != STATUS_OK {
        return None;
    }
    match (cell.distance, cell.duration) {
        (Some(distance), Some(duration)) => Some(MatrixElement::new(distance.value, duration.value)),
        _ => None,
    }
}

impl DirectionsProvider for GoogleMapsClient {
    fn directions(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
    ) -> Result<Directions, ProviderError> {
        let body: DirectionsResponse = self.get_json(
            "directions",
            &[
                ("origin", from.to_query()),
                ("destination", to.to_query()),
                ("mode", mode.as_str().to_string()),
            ],
        )?;
        check_status("directions", &body.status, body.error_message)?;

        let route = body.routes.into_iter().next().ok_or_else(|| ProviderError::Malformed {
            endpoint: "directions",
            message: "no routes in an OK response".to_string(),
        })?;
        let leg = route.legs.into_iter().next().ok_or_else(|| ProviderError::Malformed {
            endpoint: "directions",
            message: "route has no legs".to_string(),
        })?;

        let path = Polyline::decode(&route.overview_polyline.points).ok_or_else(|| {
            ProviderError::Malformed {
                endpoint: "directions",
                message: "invalid overview polyline".to_string(),
            }
        })?;
        if path.points().is_empty() {
            warn!("directions returned an empty polyline");
        }
        Ok(Directions {
            path,
            duration_text: leg.duration.text,
            distance_text: leg.distance.text,
        })
    }
}
