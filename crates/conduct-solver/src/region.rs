use std::ops::Range;

use ndarray::Array2;
use smallvec::{smallvec, SmallVec};

use crate::{
    error::ConfigError,
    grid::{GridParams, Interval},
};

/// Role of a grid node in the update rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Region {
    /// Free node, updated by the 5-point stencil.
    #[default]
    Interior,
    /// Held at the cold temperature `Tc` (black outline).
    Cold,
    /// Held at the warm temperature `Tz` (green outline).
    Warm,
    /// Not part of the body. Carries `NaN` and takes no part in conduction.
    Outside,
    /// Boundary node exchanging heat with the fluid.
    Convective,
}

impl Region {
    /// Whether nodes of this region keep their initial value for the whole run.
    #[inline]
    pub fn is_fixed(self) -> bool {
        matches!(self, Region::Cold | Region::Warm | Region::Outside)
    }
}

/// An axis-aligned set of grid nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Nodes on the grid line at constant `x`.
    Vertical { x: f64, y: Interval },
    /// Nodes on the grid line at constant `y`.
    Horizontal { y: f64, x: Interval },
    Rect { x: Interval, y: Interval },
}

impl Shape {
    /// Index ranges `(i, j)` covered by this shape.
    pub fn cells(&self, grid: &GridParams) -> Result<(Range<usize>, Range<usize>), ConfigError> {
        let ix = |x| grid.index_x(x);
        let iy = |y| grid.index_y(y);

        match *self {
            Shape::Vertical { x, y } => {
                let i = grid.index_x(x)?;
                Ok((i..i + 1, y.indices(iy)?))
            }
            Shape::Horizontal { y, x } => {
                let j = grid.index_y(y)?;
                Ok((x.indices(ix)?, j..j + 1))
            }
            Shape::Rect { x, y } => Ok((x.indices(ix)?, y.indices(iy)?)),
        }
    }
}

pub type Shapes = SmallVec<[Shape; 8]>;

/// Placement of the prescribed regions. Nodes not covered by any shape are [`Region::Interior`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
    pub cold: Shapes,
    pub warm: Shapes,
    pub outside: Shapes,
    pub convective: Shapes,
}

impl Default for RegionGeometry {
    /// The plate: a 0.6 m square with a 0.4 m × 0.1 m notch cut from the bottom-left corner,
    /// cooled by fluid along the top edge of the notch.
    fn default() -> Self {
        use Shape::*;

        Self {
            cold: smallvec![
                Vertical { x: 0.0, y: Interval::closed(0.1, 0.2) },
                Vertical { x: 0.2, y: Interval::closed(0.5, 0.6) },
                Vertical { x: 0.3, y: Interval::left_open(0.4, 0.5) },
                Vertical { x: 0.5, y: Interval::left_open(0.4, 0.5) },
                Vertical { x: 0.5, y: Interval::closed(0.1, 0.3) },
                Vertical { x: 0.4, y: Interval::closed(0.0, 0.1) },
                Vertical { x: 0.6, y: Interval::closed(0.0, 0.1) },
                Horizontal { y: 0.0, x: Interval::open(0.4, 0.6) },
                Horizontal { y: 0.1, x: Interval::open(0.5, 0.6) },
            ],
            warm: smallvec![
                Vertical { x: 0.1, y: Interval::open(0.2, 0.6) },
                Vertical { x: 0.6, y: Interval::open(0.3, 0.5) },
                Horizontal { y: 0.4, x: Interval::open(0.3, 0.5) },
            ],
            outside: smallvec![
                Rect { x: Interval::right_open(0.0, 0.4), y: Interval::right_open(0.0, 0.1) },
            ],
            convective: smallvec![
                Horizontal { y: 0.1, x: Interval::open(0.0, 0.4) },
            ],
        }
    }
}

impl RegionGeometry {
    /// Every shape paired with the region it marks.
    pub fn iter(&self) -> impl Iterator<Item = (Region, &Shape)> {
        tagged(Region::Cold, &self.cold)
            .chain(tagged(Region::Warm, &self.warm))
            .chain(tagged(Region::Outside, &self.outside))
            .chain(tagged(Region::Convective, &self.convective))
    }

    /// Tags every grid node with its region.
    ///
    /// Shapes of one region may overlap each other, but a node claimed by two different
    /// regions is an error.
    pub fn classify(&self, grid: &GridParams) -> Result<Array2<Region>, ConfigError> {
        let mut regions = Array2::from_elem(grid.shape(), Region::Interior);

        for (region, shape) in self.iter() {
            let (is, js) = shape.cells(grid)?;

            for i in is {
                for j in js.clone() {
                    let cell = &mut regions[(i, j)];
                    match *cell {
                        Region::Interior => *cell = region,
                        first if first == region => {}
                        first => {
                            return Err(ConfigError::RegionConflict { i, j, first, second: region });
                        }
                    }
                }
            }
        }

        Ok(regions)
    }
}

fn tagged(region: Region, shapes: &Shapes) -> impl Iterator<Item = (Region, &Shape)> {
    shapes.iter().map(move |shape| (region, shape))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate() -> Array2<Region> {
        RegionGeometry::default().classify(&GridParams::default()).unwrap()
    }

    #[test]
    fn plate_outline_is_tagged() {
        let regions = plate();

        // x = 0, 0.1 <= y <= 0.2
        assert_eq!(regions[(0, 20)], Region::Cold);
        assert_eq!(regions[(0, 40)], Region::Cold);
        assert_eq!(regions[(0, 41)], Region::Interior);
        // x = 0.1, 0.2 < y < 0.6
        assert_eq!(regions[(20, 40)], Region::Interior);
        assert_eq!(regions[(20, 41)], Region::Warm);
        assert_eq!(regions[(20, 119)], Region::Warm);
        assert_eq!(regions[(20, 120)], Region::Interior);
        // y = 0.4, 0.3 < x < 0.5 stops short of the cold segments above it
        assert_eq!(regions[(60, 80)], Region::Interior);
        assert_eq!(regions[(61, 80)], Region::Warm);
        assert_eq!(regions[(60, 81)], Region::Cold);
        assert_eq!(regions[(100, 80)], Region::Interior);
        assert_eq!(regions[(100, 81)], Region::Cold);
        assert_eq!(regions[(100, 60)], Region::Cold);
    }

    #[test]
    fn notch_is_outside_and_its_lid_is_convective() {
        let regions = plate();

        assert_eq!(regions[(0, 0)], Region::Outside);
        assert_eq!(regions[(79, 19)], Region::Outside);
        assert_eq!(regions[(80, 10)], Region::Cold);
        assert_eq!(regions[(0, 20)], Region::Cold);
        assert_eq!(regions[(1, 20)], Region::Convective);
        assert_eq!(regions[(79, 20)], Region::Convective);
        assert_eq!(regions[(80, 20)], Region::Cold);

        let outside = regions.iter().filter(|&&r| r == Region::Outside).count();
        assert_eq!(outside, 80 * 20);
        let convective = regions.iter().filter(|&&r| r == Region::Convective).count();
        assert_eq!(convective, 79);
    }

    #[test]
    fn overlapping_regions_are_rejected() {
        let mut geometry = RegionGeometry::default();
        geometry.warm.push(Shape::Vertical { x: 0.0, y: Interval::closed(0.2, 0.3) });

        let err = geometry.classify(&GridParams::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::RegionConflict { i: 0, j: 40, first: Region::Cold, second: Region::Warm }
        );
    }

    #[test]
    fn overlap_within_one_region_is_allowed() {
        let mut geometry = RegionGeometry::default();
        geometry.cold.push(Shape::Vertical { x: 0.0, y: Interval::closed(0.15, 0.2) });

        assert_eq!(geometry.classify(&GridParams::default()), Ok(plate()));
    }

    #[test]
    fn shapes_off_the_grid_are_rejected() {
        let mut geometry = RegionGeometry::default();
        geometry.cold.push(Shape::Horizontal { y: 0.3333, x: Interval::closed(0.0, 0.6) });

        assert!(matches!(
            geometry.classify(&GridParams::default()),
            Err(ConfigError::OffGrid { .. })
        ));
    }
}
