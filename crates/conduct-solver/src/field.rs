use ndarray::Array2;

use crate::{
    error::ConfigError,
    grid::GridParams,
    region::{Region, RegionGeometry},
    thermal::ThermalParams,
};

/// Initial state of the plate: a region tag and a temperature for every node.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub regions: Array2<Region>,
    pub temperature: Array2<f64>,
}

impl Field {
    pub fn new(
        grid: &GridParams,
        geometry: &RegionGeometry,
        thermal: &ThermalParams,
    ) -> Result<Self, ConfigError> {
        let regions = geometry.classify(grid)?;
        let temperature = regions.mapv(|region| initial_temperature(region, thermal));

        Ok(Self { regions, temperature })
    }
}

/// Temperature a node of the given region starts at. `Outside` nodes carry `NaN`.
#[inline]
pub fn initial_temperature(region: Region, thermal: &ThermalParams) -> f64 {
    match region {
        Region::Cold => thermal.cold_temperature,
        Region::Warm => thermal.warm_temperature,
        Region::Outside => f64::NAN,
        Region::Interior | Region::Convective => thermal.initial_temperature,
    }
}
