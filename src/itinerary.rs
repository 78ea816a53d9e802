//! Plain-text summary of a plan.

use std::io::{self, Write};

use crate::planner::TripPlan;
use crate::units::{format_distance, format_duration};

/// Writes the stops, legs, totals, warnings and share link of `plan`.
pub fn write_itinerary<W: Write>(out: &mut W, plan: &TripPlan) -> io::Result<()> {
    writeln!(out, "Route ({}):", plan.mode)?;
    for stop in &plan.stops {
        writeln!(out, "  {}. {} ({})", stop.number, stop.place.name, stop.place.address)?;
    }

    if !plan.legs.is_empty() {
        writeln!(out, "Legs:")?;
    }
    for leg in &plan.legs {
        match (&leg.duration_text, &leg.distance_text) {
            (Some(duration), Some(distance)) => writeln!(
                out,
                "  Leg {}: {} -> {} ({duration}, {distance})",
                leg.number, leg.from, leg.to
            )?,
            _ => writeln!(out, "  Leg {}: {} -> {}", leg.number, leg.from, leg.to)?,
        }
    }

    match (plan.total_distance_meters, plan.total_duration_seconds) {
        (Some(distance), Some(duration)) if !plan.legs.is_empty() => writeln!(
            out,
            "Total: {}, {}",
            format_distance(distance),
            format_duration(duration)
        )?,
        (None, _) | (_, None) => writeln!(out, "Total: unknown")?,
        _ => {}
    }

    for warning in &plan.warnings {
        writeln!(out, "warning: {warning}")?;
    }
    writeln!(out, "Google Maps: {}", plan.share_url)
}
