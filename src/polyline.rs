//! Polyline representation for route geometries.
//!
//! Directions come back as Google encoded polylines; they are decoded here at
//! the boundary and carried as plain coordinate sequences afterwards.
//! See: <https://developers.google.com/maps/documentation/utilities/polylinealgorithm>

use serde::{Deserialize, Serialize};

/// A polyline representing a route geometry as decoded coordinates.
///
/// Each point is a (latitude, longitude) tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Two-point line, used when no road geometry is available.
    pub fn straight(from: (f64, f64), to: (f64, f64)) -> Self {
        Self::new(vec![from, to])
    }

    /// Decodes a Google encoded polyline (5 decimal places).
    ///
    /// `None` when the input is not a valid polyline: a value is cut off, runs
    /// past 64 bits, or the running coordinates overflow.
    pub fn decode(encoded: &str) -> Option<Self> {
        let bytes = encoded.as_bytes();
        let mut points = Vec::new();
        let mut lat = 0i64;
        let mut lng = 0i64;
        let mut i = 0;

        while i < bytes.len() {
            let (lat_delta, consumed) = decode_value(&bytes[i..])?;
            i += consumed;
            let (lng_delta, consumed) = decode_value(&bytes[i..])?;
            i += consumed;

            lat = lat.checked_add(lat_delta)?;
            lng = lng.checked_add(lng_delta)?;
            points.push((lat as f64 / 1e5, lng as f64 / 1e5));
        }

        Some(Self { points })
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// The point halfway along the sequence, where leg labels are placed.
    pub fn midpoint(&self) -> Option<(f64, f64)> {
        self.points.get(self.points.len() / 2).copied()
    }
}

/// Decodes one signed value, returning it with the number of bytes consumed.
///
/// `None` when the input ends before the value's final chunk or the value
/// needs more than 64 bits.
fn decode_value(bytes: &[u8]) -> Option<(i64, usize)> {
    let mut result = 0i64;
    let mut shift = 0u32;

    for (consumed, &b) in bytes.iter().enumerate() {
        if shift > 60 {
            return None;
        }
        let chunk = i64::from(b) - 63;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            let value = if result & 1 != 0 {
                !(result >> 1)
            } else {
                result >> 1
            };
            return Some((value, consumed + 1));
        }
    }

    None
}
