use std::mem;

use ndarray::Array2;
use tracing::{debug, info};

use crate::{
    config::{PlateConfig, Schedule},
    error::ConfigError,
    field::Field,
    grid::GridParams,
    region::Region,
    stencil::{self, StencilCoefficients},
    StepObserver,
};

/// The plate being simulated, with its double buffered temperature field.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: GridParams,
    schedule: Schedule,
    coefficients: StencilCoefficients,
    regions: Array2<Region>,
    /// Field at the current step.
    current: Array2<f64>,
    /// Scratch buffer the next step is written into.
    next: Array2<f64>,
    /// Number of steps taken so far.
    iteration: u64,
}

impl Simulation {
    pub fn new(config: &PlateConfig) -> Result<Self, ConfigError> {
        let schedule = config.validate()?;
        let field = Field::new(&config.grid, &config.geometry, &config.thermal)?;
        let coefficients = config.thermal.coefficients(config.grid.spacing);

        let (nx, ny) = field.temperature.dim();
        info!(
            dt = schedule.dt,
            fo = coefficients.fourier,
            bi = coefficients.biot,
            nx,
            ny,
            iterations = schedule.iterations(),
            snapshot_step = schedule.snapshot_step,
            "initialized plate"
        );

        Ok(Self {
            grid: config.grid,
            schedule,
            coefficients,
            regions: field.regions,
            next: field.temperature.clone(),
            current: field.temperature,
            iteration: 0,
        })
    }

    #[inline]
    pub fn grid(&self) -> &GridParams {
        &self.grid
    }

    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[inline]
    pub fn regions(&self) -> &Array2<Region> {
        &self.regions
    }

    /// Temperature field at the current step.
    #[inline]
    pub fn temperature(&self) -> &Array2<f64> {
        &self.current
    }

    /// Number of steps taken so far.
    #[inline]
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Simulated time of the current field, in seconds.
    #[inline]
    pub fn time(&self) -> f64 {
        self.schedule.time(self.iteration)
    }

    /// Whether every scheduled step has been taken.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.iteration > self.schedule.last_step
    }

    /// Advances the field by one time step.
    pub fn step(&mut self) {
        stencil::step(&self.current, &self.regions, &self.coefficients, &mut self.next);
        mem::swap(&mut self.current, &mut self.next);
        self.iteration += 1;
    }

    /// Runs the remaining schedule, handing the field to `observer` at the snapshot step.
    pub fn run<O: StepObserver>(&mut self, observer: &mut O) -> Result<(), O::Error> {
        while !self.is_finished() {
            if self.iteration == self.schedule.snapshot_step {
                debug!(step = self.iteration, t = self.time(), "taking snapshot");
                observer.snapshot(self)?;
            }

            self.step();
            observer.stepped(self.iteration);
        }

        info!(steps = self.iteration, t = self.time(), "finished");

        Ok(())
    }
}
