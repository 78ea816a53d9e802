//! trip-planner
//!
//! Geocodes a list of place names, measures travel between them, orders the
//! visits with a greedy cheapest-arc construction and draws the result on a
//! Leaflet map with a Google Maps share link.

pub mod traits;
pub mod error;
pub mod location;
pub mod solver;
pub mod matrix;
pub mod google;
pub mod geocode;
pub mod haversine;
pub mod polyline;
pub mod units;
pub mod input;
pub mod share;
pub mod planner;
pub mod session;
pub mod render;
pub mod itinerary;
pub mod logging;
pub mod cli;
pub mod shell;
