use ndarray::Array2;

use crate::region::Region;

/// Dimensionless weights of the explicit update rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StencilCoefficients {
    /// Fourier number `fo`.
    pub fourier: f64,
    /// Biot number `bi` of a convective boundary node.
    pub biot: f64,
    /// Fluid temperature `Tf`.
    pub fluid_temperature: f64,
}

impl StencilCoefficients {
    /// Weight of a free node's own temperature, `1 - 4·fo`.
    #[inline]
    pub fn interior_weight(&self) -> f64 {
        1.0 - 4.0 * self.fourier
    }

    /// Weight of a convective node's own temperature, `1 - 4·fo - 2·bi·fo`.
    #[inline]
    pub fn convective_weight(&self) -> f64 {
        1.0 - 4.0 * self.fourier - 2.0 * self.biot * self.fourier
    }
}

/// Advances `current` by one time step into `next`.
///
/// Only nodes with `0 < i < nx - 1` and `0 < j < ny - 1` are written; the outermost ring of
/// `next` is left untouched and must already hold its initial value.
///
/// An `Outside` neighbour contributes the temperature of the node being updated, i.e. the face
/// between them is adiabatic, so `NaN` never leaks into the body.
pub fn step(
    current: &Array2<f64>,
    regions: &Array2<Region>,
    coefficients: &StencilCoefficients,
    next: &mut Array2<f64>,
) {
    debug_assert_eq!(current.dim(), regions.dim());
    debug_assert_eq!(current.dim(), next.dim());

    let (nx, ny) = current.dim();
    let fo = coefficients.fourier;
    let bi = coefficients.biot;
    let tf = coefficients.fluid_temperature;
    let interior_weight = coefficients.interior_weight();
    let convective_weight = coefficients.convective_weight();

    for i in 1..nx - 1 {
        for j in 1..ny - 1 {
            let t = current[(i, j)];
            let neighbour = |a: usize, b: usize| {
                if regions[(a, b)] == Region::Outside {
                    t
                } else {
                    current[(a, b)]
                }
            };

            next[(i, j)] = match regions[(i, j)] {
                // The node below the boundary is mirrored onto the one above it.
                Region::Convective => {
                    fo * (2.0 * neighbour(i, j + 1) + neighbour(i - 1, j) + neighbour(i + 1, j) + 2.0 * bi * tf)
                        + convective_weight * t
                }
                Region::Cold | Region::Warm | Region::Outside => t,
                Region::Interior => {
                    fo * (neighbour(i + 1, j) + neighbour(i - 1, j) + neighbour(i, j - 1) + neighbour(i, j + 1))
                        + interior_weight * t
                }
            };
        }
    }
}
