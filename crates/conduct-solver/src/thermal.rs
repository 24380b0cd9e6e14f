use crate::{error::ConfigError, grid::positive, stencil::StencilCoefficients};

/// Largest Fourier number for which the explicit 5-point stencil stays stable.
pub const STABILITY_LIMIT: f64 = 0.25;

/// Material constants and boundary temperatures of the plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalParams {
    /// Thermal conductivity λ, in W/(m·K).
    pub conductivity: f64,
    /// Density ρ, in kg/m³.
    pub density: f64,
    /// Specific heat capacity c_p, in J/(kg·K).
    pub specific_heat: f64,
    /// Heat transfer coefficient α between the plate and the fluid, in W/(m²·K).
    pub heat_transfer_coefficient: f64,
    /// Fourier number `a·dt/dx²`. The time step is derived from it, not the other way around.
    pub fourier: f64,

    /// Initial temperature of every free cell, in °C.
    pub initial_temperature: f64,
    /// Temperature of the fluid along the convective boundary.
    pub fluid_temperature: f64,
    /// Temperature held along the warm (green) outline.
    pub warm_temperature: f64,
    /// Temperature held along the cold (black) outline.
    pub cold_temperature: f64,
}

impl Default for ThermalParams {
    fn default() -> Self {
        Self {
            conductivity: 1.05,
            density: 2500.0,
            specific_heat: 840.0,
            heat_transfer_coefficient: 60.0,
            fourier: 0.19,
            initial_temperature: 55.0,
            fluid_temperature: 30.0,
            warm_temperature: 45.0,
            cold_temperature: 15.0,
        }
    }
}

impl ThermalParams {
    /// Thermal diffusivity `a = λ / (ρ·c_p)`, in m²/s.
    #[inline]
    pub fn diffusivity(&self) -> f64 {
        self.conductivity / (self.density * self.specific_heat)
    }

    /// Biot number `α·dx / λ` of a boundary cell.
    #[inline]
    pub fn biot(&self, spacing: f64) -> f64 {
        self.heat_transfer_coefficient * spacing / self.conductivity
    }

    /// Time step `fo·dx² / a`, in seconds.
    #[inline]
    pub fn time_step(&self, spacing: f64) -> f64 {
        self.fourier * spacing * spacing / self.diffusivity()
    }

    pub fn coefficients(&self, spacing: f64) -> StencilCoefficients {
        StencilCoefficients {
            fourier: self.fourier,
            biot: self.biot(spacing),
            fluid_temperature: self.fluid_temperature,
        }
    }

    pub fn validate(&self, spacing: f64) -> Result<(), ConfigError> {
        positive("conductivity", self.conductivity)?;
        positive("density", self.density)?;
        positive("specific heat", self.specific_heat)?;
        positive("Fourier number", self.fourier)?;

        if self.heat_transfer_coefficient < 0.0 || self.heat_transfer_coefficient.is_nan() {
            return Err(ConfigError::NonPositive {
                name: "heat transfer coefficient",
                value: self.heat_transfer_coefficient,
            });
        }

        if self.fourier > STABILITY_LIMIT {
            return Err(ConfigError::Unstable {
                fourier: self.fourier,
                limit: STABILITY_LIMIT,
            });
        }

        let coefficients = self.coefficients(spacing);
        let weight = coefficients.convective_weight();
        if weight < 0.0 {
            return Err(ConfigError::NegativeBoundaryWeight {
                weight,
                fourier: coefficients.fourier,
                biot: coefficients.biot,
            });
        }

        Ok(())
    }

    /// Lowest temperature any free cell can reach, `min(Tc, Tf, T0)`.
    pub fn lower_bound(&self) -> f64 {
        self.cold_temperature
            .min(self.fluid_temperature)
            .min(self.initial_temperature)
    }

    /// Highest temperature any free cell can reach, `max(Tz, T0)`.
    pub fn upper_bound(&self) -> f64 {
        self.warm_temperature.max(self.initial_temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn derived_quantities_match_plate_constants() {
        let params = ThermalParams::default();

        assert!(close(params.diffusivity(), 5.0e-7, 1e-18));
        assert!(close(params.biot(0.005), 60.0 * 0.005 / 1.05, 1e-15));
        assert!(close(params.time_step(0.005), 9.5, 1e-9));
    }

    #[test]
    fn default_parameters_are_stable() {
        assert_eq!(ThermalParams::default().validate(0.005), Ok(()));
    }

    #[test]
    fn fourier_above_limit_is_rejected() {
        let params = ThermalParams { fourier: 0.3, ..Default::default() };
        assert_eq!(
            params.validate(0.005),
            Err(ConfigError::Unstable { fourier: 0.3, limit: STABILITY_LIMIT })
        );
    }

    #[test]
    fn strong_convection_makes_boundary_weight_negative() {
        let params = ThermalParams { heat_transfer_coefficient: 1000.0, ..Default::default() };
        assert!(matches!(
            params.validate(0.005),
            Err(ConfigError::NegativeBoundaryWeight { .. })
        ));
    }

    #[test]
    fn non_physical_material_is_rejected() {
        let params = ThermalParams { density: 0.0, ..Default::default() };
        assert!(matches!(
            params.validate(0.005),
            Err(ConfigError::NonPositive { name: "density", .. })
        ));
    }

    #[test]
    fn bounds_cover_all_prescribed_temperatures() {
        let params = ThermalParams::default();
        assert_eq!(params.lower_bound(), 15.0);
        assert_eq!(params.upper_bound(), 55.0);
    }
}
