//! One user's planning session and its result cache.

use std::sync::Arc;

use tracing::debug;

use crate::error::PlanError;
use crate::planner::{PlanKey, PlanRequest, Planner, TripPlan};
use crate::traits::{DirectionsProvider, DistanceMatrixProvider, Geocoder};

/// Holds the plan for the most recent request.
///
/// A lookup only hits when the key matches exactly; storing a plan under a
/// new key replaces the old one, so changing the locations or travel mode
/// invalidates the cached result.
#[derive(Debug, Default)]
pub struct PlanCache {
    latest: Option<(PlanKey, Arc<TripPlan>)>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PlanKey) -> Option<Arc<TripPlan>> {
        match &self.latest {
            Some((cached, plan)) if cached == key => Some(Arc::clone(plan)),
            _ => None,
        }
    }

    pub fn store(&mut self, key: PlanKey, plan: TripPlan) -> Arc<TripPlan> {
        let plan = Arc::new(plan);
        self.latest = Some((key, Arc::clone(&plan)));
        plan
    }

    /// The most recent plan regardless of key.
    pub fn latest(&self) -> Option<Arc<TripPlan>> {
        self.latest.as_ref().map(|(_, plan)| Arc::clone(plan))
    }

    pub fn invalidate(&mut self) {
        self.latest = None;
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_none()
    }
}

/// A plan and whether it came from the cache.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub plan: Arc<TripPlan>,
    pub from_cache: bool,
}

/// Planner plus cache: repeated identical requests cost nothing.
#[derive(Debug)]
pub struct Session<G, M, D> {
    planner: Planner<G, M, D>,
    cache: PlanCache,
}

impl<G, M, D> Session<G, M, D>
where
    G: Geocoder,
    M: DistanceMatrixProvider,
    D: DirectionsProvider + Sync,
{
    pub fn new(planner: Planner<G, M, D>) -> Self {
        Self {
            planner,
            cache: PlanCache::new(),
        }
    }

    pub fn planner(&self) -> &Planner<G, M, D> {
        &self.planner
    }

    pub fn cache(&self) -> &PlanCache {
        &self.cache
    }

    /// Returns the cached plan when `request` matches the last one,
    /// otherwise plans afresh and caches the result.
    ///
    /// A failed run leaves the cache untouched.
    pub fn plan(&mut self, request: &PlanRequest) -> Result<SessionPlan, PlanError> {
        let key = request.key();
        if let Some(plan) = self.cache.get(&key) {
            debug!("inputs unchanged; reusing cached plan");
            return Ok(SessionPlan {
                plan,
                from_cache: true,
            });
        }

        let plan = self.planner.plan(request)?;
        Ok(SessionPlan {
            plan: self.cache.store(key, plan),
            from_cache: false,
        })
    }

    /// Last successfully computed plan, if any.
    pub fn latest(&self) -> Option<Arc<TripPlan>> {
        self.cache.latest()
    }

    /// Drops the cached plan and every geocoding outcome, so the next
    /// `plan` queries the providers again.
    pub fn reset(&mut self) {
        self.cache.invalidate();
        self.planner.geocoder().clear();
        debug!("session caches cleared");
    }
}
