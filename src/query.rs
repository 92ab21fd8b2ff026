//! Thin operations that instantiate a scan and format its result: `plan`
//! for point-to-point routes, `times_from` for single-origin isochrones.

use std::collections::HashMap;

use chrono::Duration;
use rayon::prelude::*;

use crate::config::{PlannerConfig, DEFAULT_HORIZON_HOURS};
use crate::error::{PlannerError, PlannerResult};
use crate::reconstruct::{reconstruct, Segment};
use crate::scan::Scan;
use crate::timetable::{StationIndex, TimetableStore, Timestamp};

/// `name -> minutes` mapping produced by `times_from`; `config.unreachable_minutes()`
/// (i.e. `horizon * 60`) marks a station not reached within horizon/tolerance.
pub type TimesMap = HashMap<String, i64>;

pub struct Planner<'a> {
    store: &'a TimetableStore,
    horizon: Duration,
}

impl<'a> Planner<'a> {
    pub fn new(store: &'a TimetableStore) -> Self {
        Self { store, horizon: Duration::hours(DEFAULT_HORIZON_HOURS) }
    }

    pub fn with_horizon(store: &'a TimetableStore, horizon: Duration) -> PlannerResult<Self> {
        if horizon.num_minutes() <= 0 {
            return Err(PlannerError::InvalidHorizon);
        }
        Ok(Self { store, horizon })
    }

    fn resolve(&self, name: &str) -> PlannerResult<StationIndex> {
        self.store.station_of(name).ok_or_else(|| PlannerError::UnknownStation(name.to_string()))
    }

    /// Runs a scan targeting `destination` and returns the reconstructed
    /// route (possibly empty if no path clears the tolerance within the
    /// horizon).
    pub fn plan(&self, origin: &str, destination: &str, t0: Timestamp, tolerance: f64) -> PlannerResult<Vec<Segment>> {
        let config = PlannerConfig::new(tolerance, self.horizon)?;
        let origin = self.resolve(origin)?;
        let destination = self.resolve(destination)?;
        self.plan_by_index(origin, destination, t0, &config)
    }

    /// As `plan`, but takes station indices directly. Useful to callers
    /// (such as `times_from`'s per-station sweep) that already hold
    /// indices and would otherwise re-resolve a name only to look it back
    /// up.
    pub fn plan_by_index(&self, origin: StationIndex, destination: StationIndex, t0: Timestamp, config: &PlannerConfig) -> PlannerResult<Vec<Segment>> {
        if origin as usize >= self.store.n_stations() {
            return Err(PlannerError::UnknownStationIndex(origin));
        }
        if destination as usize >= self.store.n_stations() {
            return Err(PlannerError::UnknownStationIndex(destination));
        }
        if origin == destination {
            return Ok(Vec::new());
        }
        let scan = Scan::run(self.store, origin, t0, config, Some(destination));
        Ok(reconstruct(&scan, self.store, origin, destination, t0))
    }

    /// Runs a scan with no destination target (so no early termination),
    /// then reconstructs to every other station, recording the minutes to
    /// reach it or the horizon-in-minutes sentinel if unreached.
    pub fn times_from(&self, origin: &str, t0: Timestamp, tolerance: f64) -> PlannerResult<TimesMap> {
        let config = PlannerConfig::new(tolerance, self.horizon)?;
        let origin = self.resolve(origin)?;
        self.times_from_index(origin, t0, &config)
    }

    pub fn times_from_index(&self, origin: StationIndex, t0: Timestamp, config: &PlannerConfig) -> PlannerResult<TimesMap> {
        if origin as usize >= self.store.n_stations() {
            return Err(PlannerError::UnknownStationIndex(origin));
        }

        let scan = Scan::run(self.store, origin, t0, config, None);
        let mut times = HashMap::with_capacity(self.store.n_stations());

        for s in 0..self.store.n_stations() as StationIndex {
            if s == origin {
                continue;
            }
            debug_assert!((s as usize) < self.store.n_stations(), "station index in range");
            let name = self.store.name_of(s).unwrap().to_string();
            let route = reconstruct(&scan, self.store, origin, s, t0);
            let minutes = match route.last() {
                Some(segment) => (segment.arrival_timestamp - t0).num_minutes(),
                None => config.unreachable_minutes(),
            };
            times.insert(name, minutes);
        }

        Ok(times)
    }

    /// Runs a batch of independent `plan` queries concurrently on a rayon
    /// thread pool. `TimetableStore` is immutable and each request builds
    /// its own `Scan`, so no synchronization beyond shared-read access is
    /// needed (see the crate's concurrency notes).
    pub fn plan_batch(&self, requests: &[(String, String, Timestamp, f64)]) -> Vec<PlannerResult<Vec<Segment>>> {
        requests
            .par_iter()
            .map(|(origin, destination, t0, tolerance)| self.plan(origin, destination, *t0, *tolerance))
            .collect()
    }
}
