//! Interactive map output.
//!
//! A plan is rendered as a standalone HTML page using Leaflet. The trip is
//! embedded as JSON and drawn by a small script; place names and leg texts are
//! inserted as text nodes, never as markup.

use serde::Serialize;

use crate::planner::TripPlan;

const LEAFLET_VERSION: &str = "1.9.4";

#[derive(Debug, Serialize)]
struct MapData<'a> {
    mode: &'static str,
    /// `[[south, west], [north, east]]` over all stops.
    bounds: [[f64; 2]; 2],
    stops: Vec<MapStop<'a>>,
    legs: Vec<MapLeg<'a>>,
}

#[derive(Debug, Serialize)]
struct MapStop<'a> {
    number: usize,
    name: &'a str,
    address: &'a str,
    position: [f64; 2],
}

#[derive(Debug, Serialize)]
struct MapLeg<'a> {
    number: usize,
    path: &'a [(f64, f64)],
    midpoint: Option<(f64, f64)>,
    duration: Option<&'a str>,
    distance: Option<&'a str>,
}

/// Renders `plan` as a complete HTML document.
pub fn render_map(plan: &TripPlan) -> Result<String, serde_json::Error> {
    let data = map_data(plan);
    // `</script>` inside the JSON would end the data block early.
    let json = serde_json::to_string(&data)?.replace("</", "<\\/");
    Ok(PAGE_TEMPLATE
        .replace("{{LEAFLET_VERSION}}", LEAFLET_VERSION)
        .replace("{{TRIP_DATA}}", &json))
}

fn map_data(plan: &TripPlan) -> MapData<'_> {
    // A round trip repeats the start as its last stop; draw each place once.
    let stops = plan
        .stops
        .iter()
        .take(plan.places.len())
        .map(|stop| MapStop {
            number: stop.number,
            name: &stop.place.name,
            address: &stop.place.address,
            position: [stop.place.coordinate.lat, stop.place.coordinate.lng],
        })
        .collect();

    let legs = plan
        .legs
        .iter()
        .map(|leg| MapLeg {
            number: leg.number,
            path: leg.path.points(),
            midpoint: leg.path.midpoint(),
            duration: leg.duration_text.as_deref(),
            distance: leg.distance_text.as_deref(),
        })
        .collect();

    MapData {
        mode: plan.mode.as_str(),
        bounds: bounds(plan),
        stops,
        legs,
    }
}

fn bounds(plan: &TripPlan) -> [[f64; 2]; 2] {
    let mut south = f64::INFINITY;
    let mut west = f64::INFINITY;
    let mut north = f64::NEG_INFINITY;
    let mut east = f64::NEG_INFINITY;
    for place in &plan.places {
        south = south.min(place.coordinate.lat);
        north = north.max(place.coordinate.lat);
        west = west.min(place.coordinate.lng);
        east = east.max(place.coordinate.lng);
    }
    if plan.places.is_empty() {
        return [[0.0, 0.0], [0.0, 0.0]];
    }
    [[south, west], [north, east]]
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Trip Planner</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{{LEAFLET_VERSION}}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{{LEAFLET_VERSION}}/dist/leaflet.js"></script>
<style>
  html, body, #map { height: 100%; margin: 0; }
  .stop-label {
    font-size: 12pt; color: black; width: 140px; padding: 5px;
    background: linear-gradient(135deg, #72EDF2 10%, #5151E5 100%);
    border-radius: 8px; word-wrap: break-word; text-align: center;
    box-shadow: 2px 2px 12px rgba(0, 0, 0, 0.2);
  }
  .leg-info {
    font-size: 10pt; color: black; width: 140px; padding: 5px;
    background: rgba(255, 255, 255, 0.8); border: 1px solid black;
    border-radius: 5px; word-wrap: break-word; text-align: center;
  }
  .leg-label { font-weight: bold; font-size: 14px; }
</style>
</head>
<body>
<div id="map"></div>
<script type="application/json" id="trip-data">{{TRIP_DATA}}</script>
<script>
  const trip = JSON.parse(document.getElementById("trip-data").textContent);
  const map = L.map("map");
  L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
    maxZoom: 19,
    attribution: "&copy; OpenStreetMap contributors",
  }).addTo(map);

  function box(className, lines) {
    const div = document.createElement("div");
    div.className = className;
    lines.forEach((line, i) => {
      if (i > 0) div.appendChild(document.createElement("br"));
      div.appendChild(document.createTextNode(line));
    });
    return div;
  }

  for (const leg of trip.legs) {
    const line = L.polyline(leg.path, { color: "blue", weight: 5, opacity: 0.8 }).addTo(map);
    line.bindTooltip("Leg " + leg.number, { permanent: true, direction: "center", className: "leg-label" });
    if (leg.midpoint && leg.duration && leg.distance) {
      L.marker(leg.midpoint, {
        icon: L.divIcon({
          className: "",
          iconSize: null,
          html: box("leg-info", ["Time: " + leg.duration, "Distance: " + leg.distance]),
        }),
      }).addTo(map);
    }
  }

  for (const stop of trip.stops) {
    L.marker(stop.position, {
      title: stop.address,
      icon: L.divIcon({
        className: "",
        iconSize: null,
        html: box("stop-label", [stop.number + ". " + stop.name]),
      }),
    }).addTo(map);
  }

  map.fitBounds(trip.bounds, { padding: [40, 40], maxZoom: 15 });
</script>
</body>
</html>
"#;
