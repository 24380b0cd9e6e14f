use thiserror::Error;

use crate::region::Region;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Fourier number {fourier} exceeds the explicit stability limit of {limit}")]
    Unstable { fourier: f64, limit: f64 },
    #[error("convective boundary weight 1 - 4·fo - 2·bi·fo = {weight} is negative (fo = {fourier}, bi = {biot})")]
    NegativeBoundaryWeight { weight: f64, fourier: f64, biot: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("coordinate {coord} is not a multiple of the grid spacing {spacing}")]
    OffGrid { coord: f64, spacing: f64 },
    #[error("coordinate {coord} lies outside the domain [0, {extent}]")]
    OutOfDomain { coord: f64, extent: f64 },
    #[error("grid needs at least 3 points per axis, got {nx}×{ny}")]
    GridTooSmall { nx: u32, ny: u32 },
    #[error("cell ({i}, {j}) is claimed by both {first:?} and {second:?}")]
    RegionConflict { i: usize, j: usize, first: Region, second: Region },
    #[error("snapshot time {time} s is outside the simulated interval [0, {duration}] s")]
    SnapshotOutOfRange { time: f64, duration: f64 },
}
