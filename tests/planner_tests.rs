//! Planning pipeline tests
//!
//! Runs the whole pipeline against in-memory providers: geocoding, the
//! distance matrix, ordering, per-leg directions and the session cache.

mod fixtures;

use trip_planner::error::{InputError, PlanError};
use trip_planner::location::TripArea;
use trip_planner::planner::{PlanRequest, PlanWarning, Planner, TripPlan};
use trip_planner::session::Session;
use trip_planner::traits::TravelMode;

use fixtures::london_locations::{self, BIG_BEN, ST_PAULS, TATE_MODERN, TOWER_BRIDGE};
use fixtures::{FixtureDirections, FixtureGeocoder, FixtureMatrix};

type FixturePlanner = Planner<FixtureGeocoder, FixtureMatrix, FixtureDirections>;

fn london() -> TripArea {
    TripArea::new("United Kingdom", "London")
}

fn request(names: &[&str]) -> PlanRequest {
    PlanRequest::new(names.iter().map(|n| n.to_string()).collect(), london())
}

fn day_out_request() -> PlanRequest {
    request(&[BIG_BEN.name, TOWER_BRIDGE.name, ST_PAULS.name, TATE_MODERN.name])
}

fn planner() -> FixturePlanner {
    Planner::new(FixtureGeocoder::new(), FixtureMatrix::new(), FixtureDirections::new())
}

fn stop_names(plan: &TripPlan) -> Vec<&str> {
    plan.stops.iter().map(|stop| stop.place.name.as_str()).collect()
}

// ============================================================================
// Happy path
// ============================================================================

#[test]
fn plans_a_day_out() {
    let planner = planner();
    let plan = planner.plan(&day_out_request()).unwrap();

    assert_eq!(plan.places.len(), 4);
    assert_eq!(plan.stops.len(), 4);
    assert_eq!(plan.stops[0].place.name, BIG_BEN.name);
    assert_eq!(
        plan.stops.iter().map(|s| s.number).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(plan.legs.len(), 3);
    assert!(plan.legs.iter().all(|leg| leg.duration_text.is_some()));
    assert!(plan.warnings.is_empty(), "{:?}", plan.warnings);
    assert!(plan.total_distance_meters.is_some());
    assert!(plan.total_duration_seconds.is_some());
    assert!(
        plan.share_url
            .starts_with("https://www.google.com/maps/dir/?api=1&origin=Big%20Ben&destination=")
    );
    assert!(plan.share_url.ends_with("&travelmode=driving"));

    // Legs chain the stops in order.
    for (leg, pair) in plan.legs.iter().zip(plan.stops.windows(2)) {
        assert_eq!(leg.from, pair[0].place.name);
        assert_eq!(leg.to, pair[1].place.name);
    }

    assert_eq!(planner.geocoder().inner().calls(), 4);
    assert_eq!(planner.matrix_provider().calls(), 1);
    assert_eq!(planner.directions_provider().calls(), 3);
}

#[test]
fn single_location_needs_no_distances() {
    let planner = planner();
    let plan = planner.plan(&request(&[BIG_BEN.name])).unwrap();

    assert_eq!(stop_names(&plan), vec![BIG_BEN.name]);
    assert!(plan.legs.is_empty());
    assert_eq!(plan.total_distance_meters, Some(0));
    assert_eq!(planner.matrix_provider().calls(), 0);
    assert_eq!(planner.directions_provider().calls(), 0);
    assert!(plan.share_url.contains("&origin=Big%20Ben&destination=Big%20Ben&travelmode="));
}

#[test]
fn round_trip_returns_to_the_start() {
    let request = PlanRequest {
        round_trip: true,
        ..day_out_request()
    };
    let plan = planner().plan(&request).unwrap();

    assert_eq!(plan.stops.len(), 5);
    assert_eq!(plan.legs.len(), 4);
    assert_eq!(plan.stops[4].place.name, BIG_BEN.name);
    assert_eq!(plan.stops[4].number, 5);
    assert!(plan.share_url.contains("&origin=Big%20Ben&destination=Big%20Ben&waypoints="));
}

#[test]
fn blocks_respect_provider_limits() {
    let planner = Planner::new(
        FixtureGeocoder::new(),
        FixtureMatrix::new().with_limits(2, 4),
        FixtureDirections::new(),
    );
    let plan = planner.plan(&day_out_request()).unwrap();

    assert!(plan.warnings.is_empty());
    assert_eq!(planner.matrix_provider().calls(), 4);
}

// ============================================================================
// Degraded inputs
// ============================================================================

#[test]
fn unresolved_names_are_left_out() {
    let plan = planner()
        .plan(&request(&[BIG_BEN.name, "Atlantis", TOWER_BRIDGE.name]))
        .unwrap();

    assert_eq!(stop_names(&plan), vec![BIG_BEN.name, TOWER_BRIDGE.name]);
    assert_eq!(
        plan.warnings,
        vec![PlanWarning::Unresolved {
            name: "Atlantis".to_string()
        }]
    );
    assert!(!plan.share_url.contains("Atlantis"));
}

#[test]
fn first_resolvable_name_is_the_start() {
    let plan = planner()
        .plan(&request(&["Atlantis", TOWER_BRIDGE.name, BIG_BEN.name]))
        .unwrap();
    assert_eq!(plan.stops[0].place.name, TOWER_BRIDGE.name);
}

#[test]
fn partial_matches_are_flagged() {
    let planner = Planner::new(
        FixtureGeocoder::new().partial_match(ST_PAULS.name),
        FixtureMatrix::new(),
        FixtureDirections::new(),
    );
    let plan = planner.plan(&day_out_request()).unwrap();
    assert_eq!(
        plan.warnings,
        vec![PlanWarning::PartialMatch {
            name: ST_PAULS.name.to_string()
        }]
    );
}

#[test]
fn failed_matrix_block_only_hides_its_own_pairs() {
    // One origin per block, so only Tower Bridge's outgoing row is lost.
    let planner = Planner::new(
        FixtureGeocoder::new(),
        FixtureMatrix::new().with_limits(1, 4).failing_origin(TOWER_BRIDGE.name),
        FixtureDirections::new(),
    );
    let plan = planner.plan(&day_out_request()).unwrap();

    assert!(plan.warnings.contains(&PlanWarning::UnknownDistances { pairs: 3 }));
    assert_eq!(plan.stops.len(), 4);
    // Leaving Tower Bridge would cost an unknown edge, so it goes last.
    assert_eq!(plan.stops[3].place.name, TOWER_BRIDGE.name);
    assert_eq!(plan.route.masked_legs(), 0);
    assert!(plan.total_distance_meters.is_some());
}

#[test]
fn unavoidable_unknown_leg_is_reported() {
    let planner = Planner::new(
        FixtureGeocoder::new(),
        FixtureMatrix::new().unknown_pair(BIG_BEN.name, TOWER_BRIDGE.name),
        FixtureDirections::new(),
    );
    let plan = planner
        .plan(&request(&[BIG_BEN.name, TOWER_BRIDGE.name]))
        .unwrap();

    assert_eq!(stop_names(&plan), vec![BIG_BEN.name, TOWER_BRIDGE.name]);
    assert!(plan.warnings.contains(&PlanWarning::UnknownDistances { pairs: 1 }));
    assert!(plan.warnings.contains(&PlanWarning::MaskedLegs { legs: 1 }));
    assert_eq!(plan.total_distance_meters, None);
    assert_eq!(plan.total_duration_seconds, None);
}

#[test]
fn failed_directions_fall_back_to_a_straight_line() {
    let planner = Planner::new(
        FixtureGeocoder::new(),
        FixtureMatrix::new(),
        FixtureDirections::failing_to(TOWER_BRIDGE.coords()),
    );
    let plan = planner
        .plan(&request(&[BIG_BEN.name, TOWER_BRIDGE.name]))
        .unwrap();

    let leg = &plan.legs[0];
    assert_eq!(leg.path.points(), &[BIG_BEN.coords(), TOWER_BRIDGE.coords()]);
    assert_eq!(leg.duration_text, None);
    assert_eq!(leg.distance_text, None);
    assert!(matches!(
        plan.warnings.as_slice(),
        [PlanWarning::DirectionsUnavailable { leg: 1, .. }]
    ));
    // The route itself is unaffected.
    assert!(plan.total_distance_meters.is_some());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn too_many_locations_are_rejected_before_any_call() {
    let names: Vec<&str> = london_locations::ALL.iter().map(|l| l.name).collect();
    assert_eq!(names.len(), 11);

    let planner = planner();
    let err = planner.plan(&request(&names)).unwrap_err();
    assert!(matches!(
        err,
        PlanError::Input(InputError::TooManyLocations { count: 11, max: 10 })
    ));
    assert_eq!(planner.geocoder().inner().calls(), 0);
}

#[test]
fn blank_input_is_rejected() {
    let err = planner().plan(&request(&["", "   "])).unwrap_err();
    assert!(matches!(err, PlanError::Input(InputError::NoLocations)));
}

#[test]
fn nothing_resolvable_is_an_error() {
    let err = planner()
        .plan(&request(&["Atlantis", "El Dorado"]))
        .unwrap_err();
    assert!(matches!(err, PlanError::NoResolvableLocations));
}

#[test]
fn geocoding_failure_aborts() {
    let planner = Planner::new(
        FixtureGeocoder::failing(),
        FixtureMatrix::new(),
        FixtureDirections::new(),
    );
    let err = planner.plan(&day_out_request()).unwrap_err();
    assert!(matches!(err, PlanError::Geocode(_)));
    assert!(err.to_string().contains("OVER_QUERY_LIMIT"));
    assert_eq!(planner.matrix_provider().calls(), 0);
}

#[test]
fn matrix_failure_everywhere_aborts() {
    let planner = Planner::new(
        FixtureGeocoder::new(),
        FixtureMatrix::new().failing_origin(BIG_BEN.name),
        FixtureDirections::new(),
    );
    let err = planner
        .plan(&request(&[BIG_BEN.name, TOWER_BRIDGE.name]))
        .unwrap_err();
    assert!(matches!(err, PlanError::Matrix(_)));
    assert_eq!(planner.directions_provider().calls(), 0);
}

// ============================================================================
// Session cache
// ============================================================================

#[test]
fn identical_requests_reuse_the_cached_plan() {
    let mut session = Session::new(planner());
    let first = session.plan(&day_out_request()).unwrap();
    assert!(!first.from_cache);

    let geocodes = session.planner().geocoder().inner().calls();
    let matrices = session.planner().matrix_provider().calls();
    let directions = session.planner().directions_provider().calls();

    let second = session.plan(&day_out_request()).unwrap();
    assert!(second.from_cache);
    assert_eq!(second.plan.share_url, first.plan.share_url);
    assert_eq!(second.plan.route, first.plan.route);

    assert_eq!(session.planner().geocoder().inner().calls(), geocodes);
    assert_eq!(session.planner().matrix_provider().calls(), matrices);
    assert_eq!(session.planner().directions_provider().calls(), directions);
}

#[test]
fn whitespace_changes_still_hit_the_cache() {
    let mut session = Session::new(planner());
    session.plan(&day_out_request()).unwrap();

    let mut padded = day_out_request();
    padded.names.iter_mut().for_each(|name| *name = format!("  {name} "));
    padded.names.push(String::new());
    assert!(session.plan(&padded).unwrap().from_cache);
}

#[test]
fn changing_mode_replans_but_keeps_geocodes() {
    let mut session = Session::new(planner());
    session.plan(&day_out_request()).unwrap();
    let geocodes = session.planner().geocoder().inner().calls();
    let matrices = session.planner().matrix_provider().calls();

    let walking = PlanRequest {
        mode: TravelMode::Walking,
        ..day_out_request()
    };
    let result = session.plan(&walking).unwrap();
    assert!(!result.from_cache);
    assert!(result.plan.share_url.ends_with("&travelmode=walking"));
    assert_eq!(session.planner().geocoder().inner().calls(), geocodes);
    assert_eq!(session.planner().matrix_provider().calls(), matrices + 1);

    // Switching back is a fresh plan: only the latest result is kept.
    assert!(!session.plan(&day_out_request()).unwrap().from_cache);
}

#[test]
fn failed_run_keeps_the_previous_plan() {
    let mut session = Session::new(planner());
    let first = session.plan(&day_out_request()).unwrap();

    assert!(session.plan(&request(&["Atlantis"])).is_err());
    let latest = session.latest().unwrap();
    assert_eq!(latest.share_url, first.plan.share_url);
    assert!(session.plan(&day_out_request()).unwrap().from_cache);
}

#[test]
fn reset_forgets_the_plan_and_the_geocodes() {
    let mut session = Session::new(planner());
    session.plan(&day_out_request()).unwrap();
    let geocodes = session.planner().geocoder().inner().calls();

    session.reset();
    assert!(session.cache().is_empty());
    assert!(session.latest().is_none());
    assert_eq!(session.planner().geocoder().cached_queries(), 0);

    let again = session.plan(&day_out_request()).unwrap();
    assert!(!again.from_cache);
    assert_eq!(session.planner().geocoder().inner().calls(), geocodes * 2);
}
