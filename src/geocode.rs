//! Geocoding with per-session memoization.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::location::{GeocodedAddress, Place, TripArea};
use crate::traits::Geocoder;

/// Geocoding outcomes keyed by the exact query string.
///
/// "Not found" is remembered as well as successful matches; failed calls are
/// not stored so they are retried next time.
#[derive(Debug, Clone, Default)]
pub struct GeocodeCache {
    entries: HashMap<String, Option<GeocodedAddress>>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Some(outcome)` on a hit, `None` when the query has not been seen.
    pub fn get(&self, query: &str) -> Option<Option<GeocodedAddress>> {
        self.entries.get(query).cloned()
    }

    pub fn insert(&mut self, query: impl Into<String>, outcome: Option<GeocodedAddress>) {
        self.entries.insert(query.into(), outcome);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Wraps a [`Geocoder`] so each distinct query reaches it at most once.
#[derive(Debug)]
pub struct CachedGeocoder<G> {
    inner: G,
    cache: Mutex<GeocodeCache>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            cache: Mutex::new(GeocodeCache::new()),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Number of distinct queries remembered.
    pub fn cached_queries(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Forgets every remembered outcome; later queries reach the inner
    /// geocoder again.
    pub fn clear(&self) {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    fn geocode(&self, query: &str) -> Result<Option<GeocodedAddress>, ProviderError> {
        if let Some(outcome) = self.cache.lock().unwrap_or_else(PoisonError::into_inner).get(query) {
            debug!(query, "geocode cache hit");
            return Ok(outcome);
        }

        debug!(query, "geocode cache miss");
        let outcome = self.inner.geocode(query)?;
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(query, outcome.clone());
        Ok(outcome)
    }
}

/// Result of resolving the user's place names.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Places that geocoded, in input order.
    pub places: Vec<Place>,
    /// Names with no match.
    pub unresolved: Vec<String>,
    /// Places the service matched only partially.
    pub partial: Vec<String>,
}

/// Geocodes each name within `area`.
///
/// Names without a match are skipped and listed in
/// [`Resolution::unresolved`]; a service failure aborts the whole call.
pub fn resolve_places<G>(
    geocoder: &G,
    area: &TripArea,
    names: &[String],
) -> Result<Resolution, ProviderError>
where
    G: Geocoder + ?Sized,
{
    let mut resolution = Resolution::default();
    for name in names {
        let query = area.query_for(name);
        match geocoder.geocode(&query)? {
            Some(found) => {
                if found.partial_match {
                    resolution.partial.push(name.clone());
                }
                resolution
                    .places
                    .push(Place::new(name.clone(), found.address, found.coordinate));
            }
            None => {
                warn!(name = %name, "no geocoding match; leaving it out of the route");
                resolution.unresolved.push(name.clone());
            }
        }
    }
    Ok(resolution)
}
