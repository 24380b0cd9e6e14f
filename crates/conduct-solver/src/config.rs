use crate::{
    error::ConfigError,
    grid::{positive, GridParams},
    region::RegionGeometry,
    thermal::ThermalParams,
};

/// Simulated duration used when none is given, in seconds (20 hours).
pub const DEFAULT_DURATION: f64 = 20.0 * 3600.0;
/// Fraction of the duration at which the default snapshot is taken.
pub const SNAPSHOT_FRACTION: f64 = 0.02;

/// Everything needed to set up a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateConfig {
    pub grid: GridParams,
    pub thermal: ThermalParams,
    pub geometry: RegionGeometry,
    /// Total simulated time, in seconds.
    pub duration: f64,
    /// Simulated time at which the field is written out, in seconds.
    pub snapshot_time: f64,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self::with_duration(DEFAULT_DURATION)
    }
}

impl PlateConfig {
    /// Default plate simulated for `duration` seconds, with the snapshot at the usual fraction of it.
    pub fn with_duration(duration: f64) -> Self {
        Self {
            grid: GridParams::default(),
            thermal: ThermalParams::default(),
            geometry: RegionGeometry::default(),
            duration,
            snapshot_time: SNAPSHOT_FRACTION * duration,
        }
    }

    /// Checks the configuration and derives the time stepping schedule from it.
    pub fn validate(&self) -> Result<Schedule, ConfigError> {
        self.grid.validate()?;
        self.thermal.validate(self.grid.spacing)?;
        positive("duration", self.duration)?;

        let dt = self.thermal.time_step(self.grid.spacing);
        let schedule = Schedule::new(dt, self.duration, self.snapshot_time);

        if !(0.0..=self.duration).contains(&self.snapshot_time) || schedule.snapshot_step > schedule.last_step {
            return Err(ConfigError::SnapshotOutOfRange {
                time: self.snapshot_time,
                duration: self.duration,
            });
        }

        Ok(schedule)
    }
}

/// Slack, in steps, for durations that are a whole number of steps up to rounding.
const STEP_TOLERANCE: f64 = 1e-9;

/// Step counts of a run. Step `k` is taken at simulated time `k·dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    /// Time step, in seconds.
    pub dt: f64,
    /// Index of the last step, the largest `k` with `k·dt <= duration`.
    pub last_step: u64,
    /// Index of the step whose field is written out.
    pub snapshot_step: u64,
}

impl Schedule {
    pub fn new(dt: f64, duration: f64, snapshot_time: f64) -> Self {
        Self {
            dt,
            last_step: (duration / dt + STEP_TOLERANCE).floor() as u64,
            snapshot_step: (snapshot_time / dt).round() as u64,
        }
    }

    /// Number of loop iterations, counting step 0.
    #[inline]
    pub fn iterations(&self) -> u64 {
        self.last_step + 1
    }

    #[inline]
    pub fn time(&self, step: u64) -> f64 {
        step as f64 * self.dt
    }
}
