//! Core domain traits for the trip planner.
//!
//! Each external collaborator (geocoding, pairwise distances, turn-by-turn
//! directions) sits behind a trait so the pipeline can run against the
//! Google client, the straight-line estimator, or a test double.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::location::{Coordinate, GeocodedAddress, Place};
use crate::polyline::Polyline;

/// Resolves free-text queries to a single best-match address.
pub trait Geocoder {
    /// `Ok(None)` when the service has no match for the query.
    fn geocode(&self, query: &str) -> Result<Option<GeocodedAddress>, ProviderError>;
}

/// Travel distance and time for one origin/destination pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixElement {
    pub distance_meters: u64,
    pub duration_seconds: u64,
}

impl MatrixElement {
    pub const fn new(distance_meters: u64, duration_seconds: u64) -> Self {
        Self {
            distance_meters,
            duration_seconds,
        }
    }
}

/// Rows follow `origins`, columns follow `destinations`; `None` where the
/// service could not supply the pair.
pub type MatrixBlock = Vec<Vec<Option<MatrixElement>>>;

/// Provides pairwise distances for a set of places.
///
/// Providers answer one rectangular block per call; splitting a full matrix
/// into blocks within the provider's limits is done by
/// [`build_matrix`](crate::matrix::build_matrix).
pub trait DistanceMatrixProvider {
    /// Largest number of origins, or of destinations, in one call.
    fn max_dimension(&self) -> usize {
        usize::MAX
    }

    /// Largest `origins * destinations` in one call.
    fn max_elements(&self) -> usize {
        usize::MAX
    }

    fn matrix_block(
        &self,
        origins: &[Place],
        destinations: &[Place],
        mode: TravelMode,
    ) -> Result<MatrixBlock, ProviderError>;
}

/// Route geometry and human-readable summary for one leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Directions {
    pub path: Polyline,
    pub duration_text: String,
    pub distance_text: String,
}

/// Provides turn-by-turn directions between two points.
pub trait DirectionsProvider {
    fn directions(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
    ) -> Result<Directions, ProviderError>;
}

/// How the trip is travelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Walking,
        TravelMode::Bicycling,
        TravelMode::Transit,
    ];

    /// Name used on the wire and in share links.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TravelMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| {
                format!("unknown travel mode `{s}` (expected driving, walking, bicycling or transit)")
            })
    }
}

/// Which quantity the route minimizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CostMetric {
    #[default]
    Distance,
    Duration,
}

impl fmt::Display for CostMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CostMetric::Distance => "distance",
            CostMetric::Duration => "duration",
        })
    }
}

impl FromStr for CostMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(CostMetric::Distance),
            "duration" | "time" => Ok(CostMetric::Duration),
            _ => Err(format!("unknown metric `{s}` (expected distance or duration)")),
        }
    }
}
