//! Tunables for a planning query: probability tolerance and time horizon.

use chrono::Duration;

use crate::error::{PlannerError, PlannerResult};

/// Default horizon, in hours, used when a caller does not override it.
pub const DEFAULT_HORIZON_HOURS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    tolerance: f64,
    horizon_mins: i64,
}

impl PlannerConfig {
    pub fn new(tolerance: f64, horizon: Duration) -> PlannerResult<Self> {
        if !(tolerance > 0.0 && tolerance <= 1.0) {
            return Err(PlannerError::InvalidTolerance(tolerance));
        }
        let horizon_mins = horizon.num_minutes();
        if horizon_mins <= 0 {
            return Err(PlannerError::InvalidHorizon);
        }
        Ok(Self { tolerance, horizon_mins })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn horizon(&self) -> Duration {
        Duration::minutes(self.horizon_mins)
    }

    /// The "unreachable" sentinel used by `times_from`: the horizon in minutes.
    pub fn unreachable_minutes(&self) -> i64 {
        self.horizon_mins
    }

    pub fn with_tolerance(&self, tolerance: f64) -> PlannerResult<Self> {
        Self::new(tolerance, self.horizon())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            horizon_mins: DEFAULT_HORIZON_HOURS * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.tolerance(), 1.0);
        assert_eq!(config.horizon(), Duration::hours(4));
        assert_eq!(config.unreachable_minutes(), 240);
    }

    #[test]
    fn rejects_bad_tolerance() {
        assert_eq!(
            PlannerConfig::new(0.0, Duration::hours(4)),
            Err(PlannerError::InvalidTolerance(0.0))
        );
        assert_eq!(
            PlannerConfig::new(1.5, Duration::hours(4)),
            Err(PlannerError::InvalidTolerance(1.5))
        );
    }

    #[test]
    fn rejects_bad_horizon() {
        assert_eq!(
            PlannerConfig::new(0.9, Duration::minutes(0)),
            Err(PlannerError::InvalidHorizon)
        );
        assert_eq!(
            PlannerConfig::new(0.9, Duration::minutes(-5)),
            Err(PlannerError::InvalidHorizon)
        );
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(0.75, Duration::hours(2)).unwrap();
        assert_eq!(config.tolerance(), 0.75);
        assert_eq!(config.horizon(), Duration::hours(2));
    }
}
