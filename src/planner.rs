//! End-to-end planning: geocode, measure, order, route each leg.

use std::fmt;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::PlanError;
use crate::geocode::{CachedGeocoder, resolve_places};
use crate::input::{MAX_LOCATIONS, check_count, normalize_names};
use crate::location::{Place, TripArea};
use crate::matrix::build_matrix;
use crate::polyline::Polyline;
use crate::share::build_share_url;
use crate::solver::{Route, SolveOptions, solve};
use crate::traits::{CostMetric, DirectionsProvider, DistanceMatrixProvider, Geocoder, TravelMode};

/// What the user asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanRequest {
    /// Place names as entered; the first one that resolves is the start.
    pub names: Vec<String>,
    pub area: TripArea,
    pub mode: TravelMode,
    pub metric: CostMetric,
    pub round_trip: bool,
}

impl PlanRequest {
    pub fn new(names: Vec<String>, area: TripArea) -> Self {
        Self {
            names,
            area,
            ..Default::default()
        }
    }

    /// Identity of the request for caching: blank names and surrounding
    /// whitespace do not change the plan.
    pub fn key(&self) -> PlanKey {
        PlanKey {
            names: normalize_names(&self.names),
            area: self.area.clone(),
            mode: self.mode,
            metric: self.metric,
            round_trip: self.round_trip,
        }
    }
}

/// Cache key for a [`PlanRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanKey {
    names: Vec<String>,
    area: TripArea,
    mode: TravelMode,
    metric: CostMetric,
    round_trip: bool,
}

/// Knobs that are not part of a request.
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    pub max_locations: usize,
    pub local_search_iterations: usize,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            max_locations: MAX_LOCATIONS,
            local_search_iterations: SolveOptions::default().local_search_iterations,
        }
    }
}

/// Something the user should know about a plan that still succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanWarning {
    Unresolved { name: String },
    PartialMatch { name: String },
    UnknownDistances { pairs: usize },
    MaskedLegs { legs: usize },
    DirectionsUnavailable { leg: usize, error: String },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::Unresolved { name } => {
                write!(f, "could not find `{name}`; it was left out of the route")
            }
            PlanWarning::PartialMatch { name } => {
                write!(f, "`{name}` only partially matched an address; check the map")
            }
            PlanWarning::UnknownDistances { pairs } => {
                write!(f, "{pairs} location pairs have no known travel distance")
            }
            PlanWarning::MaskedLegs { legs } => {
                write!(f, "{legs} legs of the route have no known travel distance")
            }
            PlanWarning::DirectionsUnavailable { leg, error } => {
                write!(f, "no directions for leg {leg} ({error}); drawn as a straight line")
            }
        }
    }
}

/// A stop in visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// 1-based position in the trip.
    pub number: usize,
    pub place: Place,
}

/// One leg of the trip with its drawn geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedLeg {
    /// 1-based leg number.
    pub number: usize,
    pub from: String,
    pub to: String,
    pub path: Polyline,
    /// Display texts from the directions service; absent when the leg could
    /// not be routed.
    pub duration_text: Option<String>,
    pub distance_text: Option<String>,
}

/// Result of one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    pub mode: TravelMode,
    /// Resolved places in input order; `route` indexes into this.
    pub places: Vec<Place>,
    pub route: Route,
    pub stops: Vec<Stop>,
    pub legs: Vec<RoutedLeg>,
    /// `None` when any leg's distance is unknown.
    pub total_distance_meters: Option<u64>,
    pub total_duration_seconds: Option<u64>,
    pub share_url: String,
    pub warnings: Vec<PlanWarning>,
}

/// Runs the planning pipeline against a set of providers.
#[derive(Debug)]
pub struct Planner<G, M, D> {
    geocoder: CachedGeocoder<G>,
    matrix: M,
    directions: D,
    options: PlannerOptions,
}

impl<G, M, D> Planner<G, M, D>
where
    G: Geocoder,
    M: DistanceMatrixProvider,
    D: DirectionsProvider + Sync,
{
    pub fn new(geocoder: G, matrix: M, directions: D) -> Self {
        Self {
            geocoder: CachedGeocoder::new(geocoder),
            matrix,
            directions,
            options: PlannerOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PlannerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn geocoder(&self) -> &CachedGeocoder<G> {
        &self.geocoder
    }

    pub fn matrix_provider(&self) -> &M {
        &self.matrix
    }

    pub fn directions_provider(&self) -> &D {
        &self.directions
    }

    pub fn plan(&self, request: &PlanRequest) -> Result<TripPlan, PlanError> {
        let names = normalize_names(&request.names);
        check_count(names.len(), self.options.max_locations)?;

        let resolution =
            resolve_places(&self.geocoder, &request.area, &names).map_err(PlanError::Geocode)?;
        let mut warnings: Vec<PlanWarning> = resolution
            .unresolved
            .into_iter()
            .map(|name| PlanWarning::Unresolved { name })
            .chain(
                resolution
                    .partial
                    .into_iter()
                    .map(|name| PlanWarning::PartialMatch { name }),
            )
            .collect();
        let places = resolution.places;
        if places.is_empty() {
            return Err(PlanError::NoResolvableLocations);
        }

        let matrix = build_matrix(&self.matrix, &places, request.mode).map_err(PlanError::Matrix)?;
        let unknown = matrix.unknown_pairs();
        if unknown > 0 {
            warn!(pairs = unknown, "distance matrix has unknown pairs");
            warnings.push(PlanWarning::UnknownDistances { pairs: unknown });
        }

        let options = SolveOptions {
            round_trip: request.round_trip,
            local_search_iterations: self.options.local_search_iterations,
        };
        let route = solve(&matrix.cost_matrix(request.metric), 0, &options)?;
        if route.masked_legs() > 0 {
            warnings.push(PlanWarning::MaskedLegs {
                legs: route.masked_legs(),
            });
        }

        let legs = self.route_legs(&places, &route, request.mode);
        warnings.extend(legs.iter().filter_map(|(_, warning)| warning.clone()));
        let legs: Vec<RoutedLeg> = legs.into_iter().map(|(leg, _)| leg).collect();

        let pairs = route.legs();
        let total_distance_meters = pairs.iter().map(|&(a, b)| matrix.distance(a, b)).sum();
        let total_duration_seconds = pairs.iter().map(|&(a, b)| matrix.duration(a, b)).sum();

        let names: Vec<&str> = places.iter().map(|place| place.name.as_str()).collect();
        let share_url = build_share_url(&names, &route, request.mode);

        let stops = route
            .stops()
            .into_iter()
            .enumerate()
            .map(|(position, index)| Stop {
                number: position + 1,
                place: places[index].clone(),
            })
            .collect();

        info!(
            stops = places.len(),
            legs = legs.len(),
            mode = %request.mode,
            warnings = warnings.len(),
            "trip planned"
        );

        Ok(TripPlan {
            mode: request.mode,
            places,
            route,
            stops,
            legs,
            total_distance_meters,
            total_duration_seconds,
            share_url,
            warnings,
        })
    }

    /// Fetches directions for every leg. Legs are independent, so the
    /// requests run in parallel; results keep leg order.
    fn route_legs(
        &self,
        places: &[Place],
        route: &Route,
        mode: TravelMode,
    ) -> Vec<(RoutedLeg, Option<PlanWarning>)> {
        let directions = &self.directions;
        route
            .legs()
            .par_iter()
            .enumerate()
            .map(|(k, &(from, to))| {
                let (from, to) = (&places[from], &places[to]);
                let number = k + 1;
                match directions.directions(from.coordinate, to.coordinate, mode) {
                    Ok(found) => (
                        RoutedLeg {
                            number,
                            from: from.name.clone(),
                            to: to.name.clone(),
                            path: found.path,
                            duration_text: Some(found.duration_text),
                            distance_text: Some(found.distance_text),
                        },
                        None,
                    ),
                    Err(err) => {
                        warn!(leg = number, error = %err, "directions failed; drawing a straight line");
                        (
                            RoutedLeg {
                                number,
                                from: from.name.clone(),
                                to: to.name.clone(),
                                path: Polyline::straight(from.coordinate.into(), to.coordinate.into()),
                                duration_text: None,
                                distance_text: None,
                            },
                            Some(PlanWarning::DirectionsUnavailable {
                                leg: number,
                                error: err.to_string(),
                            }),
                        )
                    }
                }
            })
            .collect()
    }
}
