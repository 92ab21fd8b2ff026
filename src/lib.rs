pub mod config;
pub mod error;
pub mod frontier;
pub mod query;
pub mod reconstruct;
pub mod scan;
pub mod timetable;
pub mod trip_continuity;

pub use config::PlannerConfig;
pub use error::{PlannerError, PlannerResult};
pub use frontier::{ConnIdx, FrontierEntry, Predecessor, StationFrontier};
pub use query::{Planner, TimesMap};
pub use reconstruct::{reconstruct, Segment};
pub use scan::Scan;
pub use timetable::{Connection, ConnectionKind, StationIndex, Timestamp, TimetableStore, WalkMatrix};
pub use trip_continuity::TripContinuityTable;
