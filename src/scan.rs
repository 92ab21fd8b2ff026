//! The forward Connection Scan sweep: propagates Station Frontier labels
//! over the time-ordered connection list, reasoning about trip continuity
//! and inter-station walking, with an early-termination cutoff once the
//! destination (if any) is reached.

use chrono::Duration;

use crate::config::PlannerConfig;
use crate::frontier::{Predecessor, StationFrontier};
use crate::timetable::{StationIndex, TimetableStore, Timestamp};
use crate::trip_continuity::TripContinuityTable;

/// All per-scan state: one Station Frontier per station plus the Trip
/// Continuity Table. Owned exclusively by a single query; the
/// `TimetableStore` it scans over is shared read-only.
pub struct Scan {
    frontiers: Vec<StationFrontier>,
    trip_table: TripContinuityTable,
    max_ts: Timestamp,
    /// Number of connections actually inspected before the sweep stopped,
    /// i.e. up to (but not past) the early-termination cutoff. Exposed so
    /// tests can assert the early-termination behavior without parsing
    /// logs.
    pub connections_examined: usize,
}

impl Scan {
    fn walk_targets<'a>(
        store: &'a TimetableStore,
        station: StationIndex,
    ) -> impl Iterator<Item = (StationIndex, u32)> + 'a {
        let mut seen_self = false;
        let mut neighbors = store.walk_neighbors(station).peekable();
        std::iter::from_fn(move || {
            if let Some((v, mins)) = neighbors.next() {
                if v == station {
                    seen_self = true;
                }
                Some((v, mins))
            } else if !seen_self {
                seen_self = true;
                Some((station, 0))
            } else {
                None
            }
        })
    }

    /// Runs a full forward sweep from `origin` departing at `start_time`,
    /// optionally tracking `destination` for early termination. With no
    /// destination the sweep runs the full horizon, which
    /// `Planner::times_from` uses to compute isochrones in one pass.
    pub fn run(
        store: &TimetableStore,
        origin: StationIndex,
        start_time: Timestamp,
        config: &PlannerConfig,
        destination: Option<StationIndex>,
    ) -> Self {
        let max_ts = start_time + config.horizon();
        let mut frontiers: Vec<StationFrontier> = (0..store.n_stations()).map(|_| StationFrontier::new(max_ts)).collect();

        // The walking matrix carries no diagonal, so a connection departing
        // directly from the origin would otherwise never pass the
        // relevance filter below. Seeding the origin's own frontier
        // alongside its walk neighbors keeps departures at the origin
        // itself reachable.
        frontiers[origin as usize].update(None, start_time, Predecessor::Origin, 1.0);
        for (v, mins) in store.walk_neighbors(origin) {
            frontiers[v as usize].update(None, start_time + Duration::minutes(mins as i64), Predecessor::Origin, 1.0);
        }

        let mut scan = Self {
            frontiers,
            trip_table: TripContinuityTable::new(),
            max_ts,
            connections_examined: 0,
        };

        log::debug!(
            "scan start: origin={origin} start_time={start_time} tolerance={} horizon={}m destination={destination:?}",
            config.tolerance(),
            config.horizon().num_minutes(),
        );

        let mut earliest = max_ts;
        let connections = store.connections();

        for (i, c) in connections.iter().enumerate() {
            if c.departure_timestamp > earliest {
                log::debug!("early termination at connection {i}/{} (earliest={earliest})", connections.len());
                break;
            }
            scan.connections_examined += 1;

            let departure_frontier = &scan.frontiers[c.departure_station as usize];
            let can_board_fresh = c.departure_timestamp >= departure_frontier.earliest_arrival();
            let on_trip_already = scan.trip_table.contains(&c.trip_id);
            if !can_board_fresh && !on_trip_already {
                log::trace!("skip connection {i}: unreachable departure station and trip not yet boarded");
                continue;
            }

            let (fresh_pred_idx, fresh_prob) = departure_frontier.best_connecting(connections, c.departure_timestamp);
            let fresh_pred = fresh_pred_idx.map(Predecessor::Frontier).unwrap_or(Predecessor::Origin);

            let (pred, prob) = scan.trip_table.apply_boarding(&c.trip_id, Some(i), fresh_pred, fresh_prob);

            if prob < config.tolerance() {
                continue;
            }

            for (v, mins) in Self::walk_targets(store, c.arrival_station) {
                let arrival = c.arrival_timestamp + Duration::minutes(mins as i64);
                scan.frontiers[v as usize].update(Some(i), arrival, pred, prob);
                if Some(v) == destination {
                    earliest = scan.frontiers[v as usize].earliest_arrival();
                }
            }
        }

        scan
    }

    pub fn frontier(&self, station: StationIndex) -> &StationFrontier {
        &self.frontiers[station as usize]
    }

    pub fn trip_table(&self) -> &TripContinuityTable {
        &self.trip_table
    }

    pub fn max_ts(&self) -> Timestamp {
        self.max_ts
    }
}
