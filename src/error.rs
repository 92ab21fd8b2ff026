// Input-shape errors rejected at the planner's public boundary. Invariant
// violations inside the scan are programming bugs and use debug_assert!
// instead of this type — they must never be triggered by valid inputs.

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("unknown station: {0}")]
    UnknownStation(String),

    #[error("unknown station index: {0}")]
    UnknownStationIndex(u32),

    #[error("invalid tolerance {0}: must be in (0, 1]")]
    InvalidTolerance(f64),

    #[error("invalid horizon: must be positive")]
    InvalidHorizon,
}

pub type PlannerResult<T> = Result<T, PlannerError>;
