//! Deep links that open a solved route in Google Maps.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::solver::Route;
use crate::traits::TravelMode;

const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";

/// Everything except RFC 3986 unreserved characters and `/`.
const PLACE_NAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Builds a directions link visiting `names` in the order of `route`.
///
/// `names[i]` is the label for location index `i`. The first stop becomes
/// the origin, the last the destination, and everything between is passed
/// as `|`-separated waypoints.
pub fn build_share_url<S: AsRef<str>>(names: &[S], route: &Route, mode: TravelMode) -> String {
    let stops: Vec<String> = route
        .stops()
        .into_iter()
        .filter_map(|index| names.get(index))
        .map(|name| encode(name.as_ref()))
        .collect();

    let (Some(origin), Some(destination)) = (stops.first(), stops.last()) else {
        return format!("{DIRECTIONS_URL}&travelmode={mode}");
    };

    let mut url = format!("{DIRECTIONS_URL}&origin={origin}&destination={destination}");
    if stops.len() > 2 {
        url.push_str("&waypoints=");
        url.push_str(&stops[1..stops.len() - 1].join("|"));
    }
    url.push_str("&travelmode=");
    url.push_str(mode.as_str());
    url
}

fn encode(name: &str) -> String {
    utf8_percent_encode(name, PLACE_NAME).to_string()
}
