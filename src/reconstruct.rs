//! Backward reconstruction of a concrete itinerary from a completed scan:
//! follows predecessor links from the destination back to the origin,
//! inserting synthetic walking segments where the traveler's station
//! changed without a trip to explain it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::frontier::Predecessor;
use crate::scan::Scan;
use crate::timetable::{ConnectionKind, StationIndex, TimetableStore, Timestamp};

/// One leg of a reconstructed route: either a scheduled vehicle
/// connection or a synthesized walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub trip_id: Arc<str>,
    pub kind: ConnectionKind,
    pub departure_station: StationIndex,
    pub arrival_station: StationIndex,
    pub departure_timestamp: Timestamp,
    pub arrival_timestamp: Timestamp,
}

impl Segment {
    fn walk(store: &TimetableStore, departure_station: StationIndex, arrival_station: StationIndex, departure_timestamp: Timestamp) -> Self {
        let minutes = store.walk_minutes(departure_station, arrival_station).unwrap_or(0);
        Self {
            trip_id: Arc::from(""),
            kind: ConnectionKind::Walk,
            departure_station,
            arrival_station,
            departure_timestamp,
            arrival_timestamp: departure_timestamp + chrono::Duration::minutes(minutes as i64),
        }
    }
}

// Defensive bound on reconstructed legs against a malformed predecessor
// chain. A well-formed scan can never actually produce a cycle here.
const MAX_LEGS: usize = 10_000;

/// Follows predecessor links from `destination` back to `origin`,
/// returning the chronological route (possibly empty if `destination` was
/// never reached within tolerance/horizon).
pub fn reconstruct(scan: &Scan, store: &TimetableStore, origin: StationIndex, destination: StationIndex, start_time: Timestamp) -> Vec<Segment> {
    if scan.frontier(destination).earliest_arrival() == scan.max_ts() {
        return Vec::new();
    }

    let (mut conn_idx, mut pred) = scan.frontier(destination).get_indices(0);
    let mut next_station = destination;
    let mut next_trip: Arc<str> = Arc::from("");
    let mut segments = Vec::new();

    let mut legs = 0;
    while let Some(c_idx) = conn_idx {
        legs += 1;
        if legs > MAX_LEGS {
            log::error!("reconstruction exceeded {MAX_LEGS} legs; predecessor chain is likely malformed");
            break;
        }

        let c = &store.connections()[c_idx];

        if c.trip_id != next_trip && c.arrival_station != next_station {
            segments.push(Segment::walk(store, c.arrival_station, next_station, c.arrival_timestamp));
        }

        segments.push(Segment {
            trip_id: c.trip_id.clone(),
            kind: c.kind,
            departure_station: c.departure_station,
            arrival_station: c.arrival_station,
            departure_timestamp: c.departure_timestamp,
            arrival_timestamp: c.arrival_timestamp,
        });
        next_station = c.departure_station;
        next_trip = c.trip_id.clone();

        match pred {
            Predecessor::TripBoarding(k) => {
                let (c2, p2) = scan.trip_table().boarding_at(&c.trip_id, k);
                conn_idx = c2;
                pred = p2;
            }
            Predecessor::Frontier(idx) => {
                let (c2, p2) = scan.frontier(c.departure_station).get_indices(idx);
                conn_idx = c2;
                pred = p2;
            }
            Predecessor::Origin => {
                // Only ever paired with conn_idx == None at the literal
                // origin seed, which already ends the loop; handled here
                // only for exhaustiveness.
                conn_idx = None;
            }
        }
    }

    if next_station != origin {
        segments.push(Segment::walk(store, origin, next_station, start_time));
    }

    segments.reverse();
    segments
}
