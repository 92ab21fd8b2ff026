use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use stochastic_csa::{Connection, ConnectionKind, StationIndex, TimetableStore, WalkMatrix};

// Synthetic fixtures for the benches and demos. There is no bundled GTFS
// feed in this workspace, so scenarios are generated rather than loaded.

pub fn get_example_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
}

pub fn get_example_start_time() -> NaiveDateTime {
    get_example_date().and_hms_opt(8, 30, 0).unwrap()
}

/// A smooth catch-probability curve: 0 at a zero-minute buffer, climbing to
/// 1.0 well before `cdf_len` minutes. Not a real operator's measured
/// reliability curve, just a plausible monotone shape for benchmarking and
/// demos.
pub fn synthetic_cdf(cdf_len: usize) -> Vec<f64> {
    (0..cdf_len)
        .map(|k| {
            let x = (k + 1) as f64 / cdf_len as f64;
            (1.0 - (1.0 - x).powi(2)).min(1.0)
        })
        .collect()
}

/// Builds a chain of `n_stations` stations joined by `trips_per_link`
/// parallel trips per consecutive pair, each trip departing
/// `headway_mins` apart starting from `get_example_start_time()`, plus a
/// short walk edge between every consecutive pair of stations. Station
/// names are `"Station-0"`, `"Station-1"`, ... so callers can address them
/// by name through `Planner`.
pub fn build_synthetic_store(n_stations: usize, trips_per_link: usize, headway_mins: i64, hop_mins: i64) -> TimetableStore {
    assert!(n_stations >= 2, "need at least an origin and a destination");

    let names: Vec<Arc<str>> = (0..n_stations).map(|i| Arc::from(format!("Station-{i}"))).collect();
    let mut station_index = HashMap::with_capacity(n_stations);
    for (i, name) in names.iter().enumerate() {
        station_index.insert(name.clone(), i as StationIndex);
    }

    let start = get_example_start_time();
    let cdf = synthetic_cdf(10);

    let mut connections = Vec::with_capacity(n_stations * trips_per_link);
    let mut walk_edges = Vec::with_capacity(n_stations.saturating_sub(1));

    for link in 0..n_stations - 1 {
        let from = link as StationIndex;
        let to = (link + 1) as StationIndex;
        walk_edges.push((from, to, 8u32));

        for t in 0..trips_per_link {
            let trip_id: Arc<str> = Arc::from(format!("T{link}-{t}"));
            let departure_timestamp = start + Duration::minutes(link as i64 * 5 + t as i64 * headway_mins);
            let arrival_timestamp = departure_timestamp + Duration::minutes(hop_mins);
            connections.push(Connection {
                trip_id,
                kind: ConnectionKind::Scheduled,
                departure_station: from,
                arrival_station: to,
                departure_timestamp,
                arrival_timestamp,
                cdf: cdf.clone(),
            });
        }
    }

    TimetableStore::new(connections, WalkMatrix::from_edges(n_stations, walk_edges), station_index, names, HashMap::new())
}

/// The scenario the benches exercise by default: a 200-station chain with
/// 3 parallel trips per link on a 10-minute headway, each hop taking 6
/// minutes.
pub fn get_example_scenario() -> (TimetableStore, String, NaiveDateTime, String) {
    let store = build_synthetic_store(200, 3, 10, 6);
    let origin = "Station-0".to_string();
    let destination = format!("Station-{}", 199);
    (store, origin, get_example_start_time(), destination)
}
