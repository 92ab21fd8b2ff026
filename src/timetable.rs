//! Immutable, time-sorted connection list and the walking-time adjacency.
//!
//! Constructed once from already-prepared artifacts; performs no I/O and
//! does no parsing — timetable ingestion is an external collaborator's
//! job.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A station index into `TimetableStore`'s station tables.
pub type StationIndex = u32;

/// A wall-clock instant. Durations between two timestamps are truncated to
/// whole minutes throughout the scan.
pub type Timestamp = NaiveDateTime;

/// Passed through uninterpreted by the scan except to distinguish
/// synthesized walks from scheduled vehicle connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionKind {
    Scheduled,
    Walk,
}

/// One timetabled edge: a vehicle moving from one station to another
/// within one trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Opaque trip identifier; empty for synthesized walks.
    pub trip_id: Arc<str>,
    pub kind: ConnectionKind,
    pub departure_station: StationIndex,
    pub arrival_station: StationIndex,
    pub departure_timestamp: Timestamp,
    pub arrival_timestamp: Timestamp,
    /// `cdf[k]` is the probability of catching the next departure given a
    /// `k`-minute buffer; nondecreasing, values in [0, 1]. Buffers at or
    /// beyond `cdf.len()` catch with probability 1.
    pub cdf: Vec<f64>,
}

impl Connection {
    /// Catch probability for a buffer of `buffer_minutes` between this
    /// connection's arrival and the next desired departure.
    pub fn catch_probability(&self, buffer_minutes: i64) -> f64 {
        if buffer_minutes < 0 {
            return 0.0;
        }
        match self.cdf.get(buffer_minutes as usize) {
            Some(&p) => p,
            None => 1.0,
        }
    }
}

/// Sparse nonnegative walking-time matrix, stored compressed-sparse-row so
/// that `walk_neighbors(u)` is `O(deg(u))` rather than `O(n_stations)`.
#[derive(Debug, Clone, Default)]
pub struct WalkMatrix {
    // offsets[u]..offsets[u+1] indexes into `edges` for station u's
    // outgoing walks.
    offsets: Vec<u32>,
    edges: Vec<(StationIndex, u32)>,
}

impl WalkMatrix {
    /// Builds the matrix from an unordered edge list `(from, to, minutes)`.
    /// Not assumed symmetric; a diagonal entry is neither required nor
    /// special-cased here (the scan treats the arrival station as an
    /// implicit zero-minute neighbor of itself regardless of whether this
    /// matrix carries a self-loop — see `scan::walk_targets`).
    pub fn from_edges(n_stations: usize, mut edges: Vec<(StationIndex, StationIndex, u32)>) -> Self {
        edges.sort_unstable_by_key(|&(u, _, _)| u);

        let mut offsets = vec![0u32; n_stations + 1];
        for &(u, _, _) in &edges {
            offsets[u as usize + 1] += 1;
        }
        for i in 1..offsets.len() {
            offsets[i] += offsets[i - 1];
        }

        let flat = edges.into_iter().map(|(_, v, mins)| (v, mins)).collect();
        Self { offsets, edges: flat }
    }

    pub fn neighbors(&self, u: StationIndex) -> impl Iterator<Item = (StationIndex, u32)> + '_ {
        let start = self.offsets[u as usize] as usize;
        let end = self.offsets[u as usize + 1] as usize;
        self.edges[start..end].iter().copied()
    }

    pub fn minutes(&self, u: StationIndex, v: StationIndex) -> Option<u32> {
        self.neighbors(u).find(|&(w, _)| w == v).map(|(_, m)| m)
    }
}

/// Immutable, shareable timetable: connections, walking adjacency, and the
/// station name/index/coordinate maps the ingestion collaborator hands
/// over.
#[derive(Debug, Clone)]
pub struct TimetableStore {
    connections: Vec<Connection>,
    walk: WalkMatrix,
    station_index: HashMap<Arc<str>, StationIndex>,
    index_station: Vec<Arc<str>>,
    station_coord: HashMap<Arc<str>, (f64, f64)>,
}

impl TimetableStore {
    /// Sorts `connections` by `departure_timestamp` (stable: ties keep
    /// their relative order) and takes ownership of the rest.
    pub fn new(
        mut connections: Vec<Connection>,
        walk: WalkMatrix,
        station_index: HashMap<Arc<str>, StationIndex>,
        index_station: Vec<Arc<str>>,
        station_coord: HashMap<Arc<str>, (f64, f64)>,
    ) -> Self {
        connections.sort_by_key(|c| c.departure_timestamp);
        Self {
            connections,
            walk,
            station_index,
            index_station,
            station_coord,
        }
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn walk_neighbors(&self, u: StationIndex) -> impl Iterator<Item = (StationIndex, u32)> + '_ {
        self.walk.neighbors(u)
    }

    pub fn walk_minutes(&self, u: StationIndex, v: StationIndex) -> Option<u32> {
        self.walk.minutes(u, v)
    }

    pub fn n_stations(&self) -> usize {
        self.index_station.len()
    }

    pub fn station_of(&self, name: &str) -> Option<StationIndex> {
        self.station_index.get(name).copied()
    }

    pub fn name_of(&self, idx: StationIndex) -> Option<&str> {
        self.index_station.get(idx as usize).map(|s| s.as_ref())
    }

    pub fn coord_of(&self, name: &str) -> Option<(f64, f64)> {
        self.station_coord.get(name).copied()
    }
}
