//! Per-station Pareto frontier of (arrival time, route probability) labels.
//!
//! Entries are sorted strictly increasing in both `arr_ts` and `prob`; no
//! entry is dominated; entry 0 is the earliest arrival (and lowest
//! probability) seen so far. A sentinel `(None, max_ts, Predecessor::Origin,
//! 0.0)` is always seeded at construction and acts as the frontier's
//! "nothing reached yet" tail.

use crate::timetable::{Connection, Timestamp};

/// Index into the connection list that delivered a label, or `None` for
/// the synthetic origin seed.
pub type ConnIdx = Option<usize>;

/// Where a frontier entry's label came from, as a tagged sum type instead
/// of a raw sign-and-magnitude integer; reconstruction (`reconstruct`
/// module) matches on this directly instead of decoding a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predecessor {
    /// The synthetic origin seed.
    Origin,
    /// Index of the predecessor entry in the predecessor station's
    /// frontier.
    Frontier(usize),
    /// A trip-continuity hop: boarded the same trip at step `k` of that
    /// trip's continuity record.
    TripBoarding(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierEntry {
    pub conn_idx: ConnIdx,
    pub arr_ts: Timestamp,
    pub pred_entry: Predecessor,
    pub prob: f64,
}

#[derive(Debug, Clone)]
pub struct StationFrontier {
    entries: Vec<FrontierEntry>,
}

impl StationFrontier {
    /// Seeds the `(none, max_ts, origin, 0)` sentinel a fresh scan starts
    /// every station's frontier with.
    pub fn new(max_ts: Timestamp) -> Self {
        Self {
            entries: vec![FrontierEntry {
                conn_idx: None,
                arr_ts: max_ts,
                pred_entry: Predecessor::Origin,
                prob: 0.0,
            }],
        }
    }

    pub fn earliest_arrival(&self) -> Timestamp {
        self.entries[0].arr_ts
    }

    pub fn get_indices(&self, i: usize) -> (ConnIdx, Predecessor) {
        let e = &self.entries[i];
        (e.conn_idx, e.pred_entry)
    }

    pub fn get_probability(&self, i: usize) -> f64 {
        self.entries[i].prob
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn entries(&self) -> &[FrontierEntry] {
        &self.entries
    }

    /// Inserts a candidate label, maintaining F1-F3. Returns whether the
    /// candidate was accepted (callers do not currently need this, but it
    /// mirrors the dominance-check return shape tests assert on).
    ///
    /// Algorithm:
    /// 1. Past the current last arrival time: accept only if it also
    ///    strictly improves on the last probability.
    /// 2. Otherwise find the first entry whose arrival time is `>=` the
    ///    candidate's; reject if the candidate doesn't strictly beat the
    ///    probability immediately preceding that entry.
    /// 3. If the candidate's probability dominates that entry, it
    ///    replaces a (possibly empty) dominated suffix.
    /// 4. Otherwise it is inserted just before that entry, unless the
    ///    arrival times tie (in which case the existing, higher-probability
    ///    entry wins).
    pub fn update(&mut self, conn_idx: ConnIdx, arr_ts: Timestamp, pred_entry: Predecessor, prob: f64) -> bool {
        debug_assert!(!self.entries.is_empty(), "frontier always holds the sentinel");
        let last = self.entries.last().unwrap();
        let candidate = FrontierEntry { conn_idx, arr_ts, pred_entry, prob };

        if arr_ts > last.arr_ts {
            if prob > last.prob {
                self.entries.push(candidate);
                return true;
            }
            return false;
        }

        let i = self
            .entries
            .iter()
            .position(|e| arr_ts <= e.arr_ts)
            .unwrap_or(self.entries.len());
        let prev_prob = if i == 0 { 0.0 } else { self.entries[i - 1].prob };
        if prob <= prev_prob {
            return false;
        }

        if prob >= self.entries[i].prob {
            let mut j = i;
            while j < self.entries.len() && prob >= self.entries[j].prob {
                j += 1;
            }
            self.entries.splice(i..j, std::iter::once(candidate));
            true
        } else if arr_ts == self.entries[i].arr_ts {
            false
        } else {
            self.entries.insert(i, candidate);
            true
        }
    }

    /// Selects the best currently-stored label whose arrival is no later
    /// than `dep_ts`, weighted by the catch probability of boarding at
    /// `dep_ts` from that label's delivering connection. Ties resolve to
    /// the lowest entry index; returns `(None, 0.0)` if no
    /// entry qualifies, or the best extended probability is exactly 0.
    pub fn best_connecting(&self, connections: &[Connection], dep_ts: Timestamp) -> (Option<usize>, f64) {
        let mut best_idx = None;
        let mut best_prob = 0.0;

        for (i, e) in self.entries.iter().enumerate() {
            if e.arr_ts > dep_ts {
                continue;
            }
            let buffer_minutes = (dep_ts - e.arr_ts).num_minutes();
            let catch_prob = match e.conn_idx {
                None => 1.0,
                Some(c) => connections[c].catch_probability(buffer_minutes),
            };
            let extended_prob = e.prob * catch_prob;
            if extended_prob > best_prob {
                best_prob = extended_prob;
                best_idx = Some(i);
            }
        }

        if best_prob > 0.0 {
            (best_idx, best_prob)
        } else {
            (None, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> Timestamp {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn max_ts() -> Timestamp {
        ts("2024-01-01 12:00:00")
    }

    // P1: after any sequence of updates, entries strictly increase in both
    // dimensions, and the sentinel tail is always present.
    fn assert_pareto(frontier: &StationFrontier) {
        let entries = frontier.entries();
        for w in entries.windows(2) {
            assert!(w[0].arr_ts < w[1].arr_ts, "arrival times must strictly increase");
            assert!(w[0].prob < w[1].prob, "probabilities must strictly increase");
        }
    }

    #[test]
    fn fresh_frontier_has_only_sentinel() {
        let f = StationFrontier::new(max_ts());
        assert_eq!(f.len(), 1);
        assert_eq!(f.earliest_arrival(), max_ts());
        assert_pareto(&f);
    }

    #[test]
    fn update_accepts_strictly_better_label() {
        let mut f = StationFrontier::new(max_ts());
        let accepted = f.update(None, ts("2024-01-01 08:10:00"), Predecessor::Origin, 0.9);
        assert!(accepted);
        assert_eq!(f.earliest_arrival(), ts("2024-01-01 08:10:00"));
        assert_pareto(&f);
    }

    #[test]
    fn update_rejects_dominated_label() {
        let mut f = StationFrontier::new(max_ts());
        f.update(None, ts("2024-01-01 08:10:00"), Predecessor::Origin, 0.9);
        // Later and no more probable: dominated, rejected.
        let accepted = f.update(None, ts("2024-01-01 08:20:00"), Predecessor::Origin, 0.5);
        assert!(!accepted);
        assert_eq!(f.len(), 2);
        assert_pareto(&f);
    }

    #[test]
    fn update_replaces_dominated_suffix() {
        let mut f = StationFrontier::new(max_ts());
        f.update(None, ts("2024-01-01 08:10:00"), Predecessor::Origin, 0.3);
        f.update(None, ts("2024-01-01 08:20:00"), Predecessor::Origin, 0.6);
        // Arrives earlier than both, but with higher probability than both:
        // dominates and replaces the whole dominated prefix/suffix.
        f.update(None, ts("2024-01-01 08:05:00"), Predecessor::Origin, 0.95);
        assert_eq!(f.len(), 2); // new entry + sentinel
        assert_eq!(f.get_probability(0), 0.95);
        assert_pareto(&f);
    }

    #[test]
    fn update_inserts_between_existing_entries() {
        let mut f = StationFrontier::new(max_ts());
        f.update(None, ts("2024-01-01 08:10:00"), Predecessor::Origin, 0.3);
        f.update(None, ts("2024-01-01 08:40:00"), Predecessor::Origin, 0.9);
        // Later than the first, earlier than the second, and its
        // probability sits strictly between: inserted in the middle.
        let accepted = f.update(None, ts("2024-01-01 08:20:00"), Predecessor::Origin, 0.6);
        assert!(accepted);
        assert_eq!(f.len(), 4);
        assert_pareto(&f);
    }

    #[test]
    fn update_rejects_same_time_worse_probability() {
        let mut f = StationFrontier::new(max_ts());
        f.update(None, ts("2024-01-01 08:10:00"), Predecessor::Origin, 0.9);
        let accepted = f.update(None, ts("2024-01-01 08:10:00"), Predecessor::Origin, 0.5);
        assert!(!accepted);
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn best_connecting_weights_by_cdf_buffer() {
        use crate::timetable::ConnectionKind;
        use std::sync::Arc;

        let connections = vec![Connection {
            trip_id: Arc::from("T1"),
            kind: ConnectionKind::Scheduled,
            departure_station: 0,
            arrival_station: 1,
            departure_timestamp: ts("2024-01-01 08:00:00"),
            arrival_timestamp: ts("2024-01-01 08:10:00"),
            cdf: vec![0.2, 0.6, 1.0],
        }];

        let mut f = StationFrontier::new(max_ts());
        f.update(Some(0), ts("2024-01-01 08:10:00"), Predecessor::Origin, 0.8);

        // 2-minute buffer -> cdf[2] = 1.0 -> extended prob = 0.8.
        let (idx, prob) = f.best_connecting(&connections, ts("2024-01-01 08:12:00"));
        assert_eq!(idx, Some(0));
        assert!((prob - 0.8).abs() < 1e-9);

        // Before the label even arrives: not a candidate.
        let (idx, prob) = f.best_connecting(&connections, ts("2024-01-01 08:05:00"));
        assert_eq!(idx, None);
        assert_eq!(prob, 0.0);
    }

    #[test]
    fn best_connecting_origin_seed_has_catch_probability_one() {
        let f_empty_conns: Vec<Connection> = vec![];
        let mut f = StationFrontier::new(max_ts());
        f.update(None, ts("2024-01-01 08:00:00"), Predecessor::Origin, 1.0);
        let (idx, prob) = f.best_connecting(&f_empty_conns, ts("2024-01-01 08:30:00"));
        assert_eq!(idx, Some(0));
        assert_eq!(prob, 1.0);
    }
}
