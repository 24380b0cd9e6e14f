use std::ops::Range;

use glam::{DVec2, UVec2};

use crate::error::ConfigError;

/// Largest distance from a grid line, in cells, still treated as lying on it.
const GRID_TOLERANCE: f64 = 1e-9;

/// Uniform Cartesian grid over a rectangular domain anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Domain extents `(X, Y)`, in meters.
    pub size: DVec2,
    /// Node spacing, in meters. The same in both directions.
    pub spacing: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            size: DVec2::new(0.6, 0.6),
            spacing: 0.005,
        }
    }
}

impl GridParams {
    pub fn new(size: DVec2, spacing: f64) -> Self {
        Self { size, spacing }
    }

    /// Number of grid points along each axis, `extent / spacing + 1`.
    #[inline]
    pub fn grid_size(&self) -> UVec2 {
        (self.size / self.spacing).round().as_uvec2() + 1
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        let n = self.grid_size();
        (n.x as usize, n.y as usize)
    }

    /// Physical position of node `(i, j)`.
    #[inline]
    pub fn position(&self, i: usize, j: usize) -> DVec2 {
        DVec2::new(i as f64, j as f64) * self.spacing
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("grid spacing", self.spacing)?;
        positive("domain width", self.size.x)?;
        positive("domain height", self.size.y)?;

        self.index_x(self.size.x)?;
        self.index_y(self.size.y)?;

        let n = self.grid_size();
        if n.x < 3 || n.y < 3 {
            return Err(ConfigError::GridTooSmall { nx: n.x, ny: n.y });
        }

        Ok(())
    }

    /// Index of the grid line at `x`.
    pub fn index_x(&self, x: f64) -> Result<usize, ConfigError> {
        grid_index(x, self.spacing, self.size.x)
    }

    /// Index of the grid line at `y`.
    pub fn index_y(&self, y: f64) -> Result<usize, ConfigError> {
        grid_index(y, self.spacing, self.size.y)
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn grid_index(coord: f64, spacing: f64, extent: f64) -> Result<usize, ConfigError> {
    let cells = coord / spacing;
    let index = cells.round();

    if (cells - index).abs() > GRID_TOLERANCE {
        return Err(ConfigError::OffGrid { coord, spacing });
    }
    if index < 0.0 || index > (extent / spacing).round() {
        return Err(ConfigError::OutOfDomain { coord, extent });
    }

    Ok(index as usize)
}

/// A one-dimensional interval with independently open or closed ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
    pub lo_closed: bool,
    pub hi_closed: bool,
}

impl Interval {
    /// `[lo, hi]`
    pub const fn closed(lo: f64, hi: f64) -> Self {
        Self { lo, hi, lo_closed: true, hi_closed: true }
    }

    /// `(lo, hi)`
    pub const fn open(lo: f64, hi: f64) -> Self {
        Self { lo, hi, lo_closed: false, hi_closed: false }
    }

    /// `(lo, hi]`
    pub const fn left_open(lo: f64, hi: f64) -> Self {
        Self { lo, hi, lo_closed: false, hi_closed: true }
    }

    /// `[lo, hi)`
    pub const fn right_open(lo: f64, hi: f64) -> Self {
        Self { lo, hi, lo_closed: true, hi_closed: false }
    }

    /// Converts the interval into the half-open range of grid indices it covers.
    pub(crate) fn indices<F>(&self, index: F) -> Result<Range<usize>, ConfigError>
    where
        F: Fn(f64) -> Result<usize, ConfigError>,
    {
        let start = index(self.lo)? + usize::from(!self.lo_closed);
        let end = index(self.hi)? + usize::from(self.hi_closed);

        Ok(start..end.max(start))
    }
}
