pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod region;
pub mod simulation;
pub mod stencil;
pub mod thermal;

pub use config::{PlateConfig, Schedule};
pub use error::ConfigError;
pub use simulation::Simulation;

/// Receives the field while a [`Simulation`] runs.
pub trait StepObserver {
    type Error;

    /// Called once, with the field at the snapshot step before it is advanced.
    fn snapshot(&mut self, sim: &Simulation) -> Result<(), Self::Error>;

    /// Called after every step with the number of steps taken so far.
    fn stepped(&mut self, _step: u64) {}
}
