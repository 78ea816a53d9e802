//! Straight-line distance estimates (used instead of the routing API).
//!
//! Uses great-circle distance and an assumed speed per travel mode. Less
//! accurate than road routing but needs nothing beyond geocoded coordinates.

use crate::error::ProviderError;
use crate::location::{Coordinate, Place};
use crate::polyline::Polyline;
use crate::traits::{
    Directions, DirectionsProvider, DistanceMatrixProvider, MatrixBlock, MatrixElement, TravelMode,
};
use crate::units::{format_distance, format_duration};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine-based distance matrix and directions provider.
#[derive(Debug, Clone, Default)]
pub struct HaversineMatrix {
    /// Fixed speed in km/h; when unset each travel mode uses its own.
    pub speed_kmh: Option<f64>,
}

impl HaversineMatrix {
    pub fn new(speed_kmh: f64) -> Self {
        Self {
            speed_kmh: Some(speed_kmh),
        }
    }

    /// Calculate haversine distance between two points in kilometers.
    pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    fn speed_for(&self, mode: TravelMode) -> f64 {
        self.speed_kmh.unwrap_or(match mode {
            TravelMode::Driving => 40.0,
            TravelMode::Transit => 25.0,
            TravelMode::Bicycling => 15.0,
            TravelMode::Walking => 5.0,
        })
    }

    /// Straight-line metrics for one pair.
    pub fn estimate(&self, from: Coordinate, to: Coordinate, mode: TravelMode) -> MatrixElement {
        let km = Self::haversine_km(from, to);
        let hours = km / self.speed_for(mode);
        MatrixElement::new((km * 1000.0).round() as u64, (hours * 3600.0).round() as u64)
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_block(
        &self,
        origins: &[Place],
        destinations: &[Place],
        mode: TravelMode,
    ) -> Result<MatrixBlock, ProviderError> {
        Ok(origins
            .iter()
            .map(|from| {
                destinations
                    .iter()
                    .map(|to| Some(self.estimate(from.coordinate, to.coordinate, mode)))
                    .collect()
            })
            .collect())
    }
}

impl DirectionsProvider for HaversineMatrix {
    fn directions(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
    ) -> Result<Directions, ProviderError> {
        let estimate = self.estimate(from, to, mode);
        Ok(Directions {
            path: Polyline::straight(from.into(), to.into()),
            duration_text: format!("~{}", format_duration(estimate.duration_seconds)),
            distance_text: format!("~{}", format_distance(estimate.distance_meters)),
        })
    }
}
