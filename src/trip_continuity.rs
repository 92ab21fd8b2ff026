//! Per-trip record of the best boarding so far, letting a vehicle be
//! stayed on without re-applying its boarding probability.

use std::collections::HashMap;
use std::sync::Arc;

use crate::frontier::{ConnIdx, Predecessor};

#[derive(Debug, Clone, Copy)]
struct Boarding {
    conn_idx: ConnIdx,
    pred_entry: Predecessor,
    prob: f64,
}

#[derive(Debug, Default)]
pub struct TripContinuityTable {
    trips: HashMap<Arc<str>, Vec<Boarding>>,
}

impl TripContinuityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the trip-continuity rule for a connection `conn_idx` on
    /// trip `trip_id`, given the fresh boarding
    /// `(fresh_pred, fresh_prob)` computed by `StationFrontier::best_connecting`
    /// at the connection's departure station. Returns the effective
    /// `(predecessor, probability)` the Scan Engine should propagate.
    pub fn apply_boarding(
        &mut self,
        trip_id: &Arc<str>,
        conn_idx: ConnIdx,
        fresh_pred: Predecessor,
        fresh_prob: f64,
    ) -> (Predecessor, f64) {
        match self.trips.get_mut(trip_id) {
            None => {
                self.trips.insert(
                    trip_id.clone(),
                    vec![Boarding { conn_idx, pred_entry: fresh_pred, prob: fresh_prob }],
                );
                (fresh_pred, fresh_prob)
            }
            Some(boardings) => {
                debug_assert!(!boardings.is_empty(), "trip record is never empty");
                let trip_prob = boardings.last().unwrap().prob;
                if trip_prob < fresh_prob {
                    boardings.push(Boarding { conn_idx, pred_entry: fresh_pred, prob: fresh_prob });
                    (fresh_pred, fresh_prob)
                } else {
                    (Predecessor::TripBoarding(boardings.len() - 1), trip_prob)
                }
            }
        }
    }

    /// The `k`-th recorded boarding of `trip_id`, as referenced by a
    /// `Predecessor::TripBoarding(k)` during reconstruction.
    pub fn boarding_at(&self, trip_id: &Arc<str>, k: usize) -> (ConnIdx, Predecessor) {
        debug_assert!(self.trips.contains_key(trip_id), "trip record must exist for a TripBoarding predecessor");
        let boarding = &self.trips[trip_id][k];
        (boarding.conn_idx, boarding.pred_entry)
    }

    pub fn contains(&self, trip_id: &Arc<str>) -> bool {
        self.trips.contains_key(trip_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_boarding_is_always_fresh() {
        let mut table = TripContinuityTable::new();
        let trip: Arc<str> = Arc::from("T1");
        let (pred, prob) = table.apply_boarding(&trip, Some(0), Predecessor::Frontier(3), 0.8);
        assert_eq!(pred, Predecessor::Frontier(3));
        assert_eq!(prob, 0.8);
        assert!(table.contains(&trip));
    }

    #[test]
    fn worse_fresh_boarding_stays_on_trip() {
        let mut table = TripContinuityTable::new();
        let trip: Arc<str> = Arc::from("T1");
        table.apply_boarding(&trip, Some(0), Predecessor::Frontier(3), 0.8);

        // A later connection on the same trip with a worse fresh boarding:
        // stay on the vehicle instead, at the trip's best probability.
        let (pred, prob) = table.apply_boarding(&trip, Some(1), Predecessor::Frontier(7), 0.5);
        assert_eq!(pred, Predecessor::TripBoarding(0));
        assert_eq!(prob, 0.8);
    }

    #[test]
    fn better_fresh_boarding_replaces_trip_record() {
        let mut table = TripContinuityTable::new();
        let trip: Arc<str> = Arc::from("T1");
        table.apply_boarding(&trip, Some(0), Predecessor::Frontier(3), 0.4);

        let (pred, prob) = table.apply_boarding(&trip, Some(1), Predecessor::Frontier(9), 0.9);
        assert_eq!(pred, Predecessor::Frontier(9));
        assert_eq!(prob, 0.9);

        let (conn_idx, pred_entry) = table.boarding_at(&trip, 1);
        assert_eq!(conn_idx, Some(1));
        assert_eq!(pred_entry, Predecessor::Frontier(9));
    }
}
