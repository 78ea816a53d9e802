//! In-memory providers backed by the London fixtures.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use trip_planner::error::ProviderError;
use trip_planner::haversine::HaversineMatrix;
use trip_planner::location::{Coordinate, GeocodedAddress, Place};
use trip_planner::polyline::Polyline;
use trip_planner::traits::{
    Directions, DirectionsProvider, DistanceMatrixProvider, Geocoder, MatrixBlock, TravelMode,
};
use trip_planner::units::{format_distance, format_duration};

use super::london_locations::by_name;

fn quota_exceeded(endpoint: &'static str) -> ProviderError {
    ProviderError::Service {
        endpoint,
        status: "OVER_QUERY_LIMIT".to_string(),
        message: Some("You have exceeded your daily request quota.".to_string()),
    }
}

/// Resolves the landmark named by the first part of the query.
#[derive(Debug, Default)]
pub struct FixtureGeocoder {
    calls: AtomicUsize,
    partial: HashSet<&'static str>,
    failing: bool,
}

impl FixtureGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a quota error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn partial_match(mut self, name: &'static str) -> Self {
        self.partial.insert(name);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FixtureGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<GeocodedAddress>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(quota_exceeded("geocode"));
        }
        let name = query.split(',').next().unwrap_or_default().trim();
        Ok(by_name(name).map(|location| GeocodedAddress {
            address: location.address.to_string(),
            coordinate: Coordinate::new(location.lat, location.lng),
            partial_match: self.partial.contains(location.name),
        }))
    }
}

/// Straight-line matrix with configurable block limits and failures.
#[derive(Debug)]
pub struct FixtureMatrix {
    estimator: HaversineMatrix,
    calls: AtomicUsize,
    max_dimension: usize,
    max_elements: usize,
    /// Blocks containing one of these origins fail outright.
    failing_origins: HashSet<&'static str>,
    /// Individual pairs reported as unknown.
    unknown_pairs: HashSet<(&'static str, &'static str)>,
}

impl Default for FixtureMatrix {
    fn default() -> Self {
        Self {
            estimator: HaversineMatrix::default(),
            calls: AtomicUsize::new(0),
            max_dimension: usize::MAX,
            max_elements: usize::MAX,
            failing_origins: HashSet::new(),
            unknown_pairs: HashSet::new(),
        }
    }
}

impl FixtureMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, max_dimension: usize, max_elements: usize) -> Self {
        self.max_dimension = max_dimension;
        self.max_elements = max_elements;
        self
    }

    pub fn failing_origin(mut self, name: &'static str) -> Self {
        self.failing_origins.insert(name);
        self
    }

    pub fn unknown_pair(mut self, from: &'static str, to: &'static str) -> Self {
        self.unknown_pairs.insert((from, to));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DistanceMatrixProvider for FixtureMatrix {
    fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    fn max_elements(&self) -> usize {
        self.max_elements
    }

    fn matrix_block(
        &self,
        origins: &[Place],
        destinations: &[Place],
        mode: TravelMode,
    ) -> Result<MatrixBlock, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if origins
            .iter()
            .any(|origin| self.failing_origins.contains(origin.name.as_str()))
        {
            return Err(quota_exceeded("distancematrix"));
        }

        Ok(origins
            .iter()
            .map(|origin| {
                destinations
                    .iter()
                    .map(|destination| {
                        let masked = self.unknown_pairs.iter().any(|&(from, to)| {
                            from == origin.name && to == destination.name
                        });
                        (!masked).then(|| {
                            self.estimator
                                .estimate(origin.coordinate, destination.coordinate, mode)
                        })
                    })
                    .collect()
            })
            .collect())
    }
}

/// Two-segment paths with estimator texts; can fail legs ending at a point.
#[derive(Debug, Default)]
pub struct FixtureDirections {
    estimator: HaversineMatrix,
    calls: AtomicUsize,
    failing_destination: Option<(f64, f64)>,
}

impl FixtureDirections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Legs arriving at `to` fail.
    pub fn failing_to(to: (f64, f64)) -> Self {
        Self {
            failing_destination: Some(to),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DirectionsProvider for FixtureDirections {
    fn directions(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
    ) -> Result<Directions, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_destination == Some((to.lat, to.lng)) {
            return Err(quota_exceeded("directions"));
        }

        let element = self.estimator.estimate(from, to, mode);
        let corner = (from.lat, to.lng);
        Ok(Directions {
            path: Polyline::new(vec![from.into(), corner, to.into()]),
            duration_text: format_duration(element.duration_seconds),
            distance_text: format_distance(element.distance_meters),
        })
    }
}
