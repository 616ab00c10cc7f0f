use ndarray::Array2;

use crate::config::setup::GridConfig;
use crate::dynamics::field::potential;

/// Ordered x- and y-sample sequences for the potential surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Grid {
    pub fn from_config(config: &GridConfig) -> Self {
        Grid {
            xs: linspace(config.min, config.max, config.step),
            ys: linspace(config.min, config.max, config.step),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.xs.len(), self.ys.len())
    }
}

/// Linearly spaced samples from `min` to `max` inclusive.
fn linspace(min: f64, max: f64, step: f64) -> Vec<f64> {
    let n = ((max - min) / step).round() as usize + 1;
    (0..n).map(|i| min + i as f64 * step).collect()
}

/// Evaluate V over the grid. Cell (i, j) holds V(xs[i], ys[j]); the array
/// shape equals the grid shape, so the field indexes directly into
/// visualization axes.
pub fn potential_field(grid: &Grid) -> Array2<f64> {
    Array2::from_shape_fn(grid.shape(), |(i, j)| potential(grid.xs[i], grid.ys[j]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_grid() -> Grid {
        Grid::from_config(&GridConfig::default())
    }

    #[test]
    fn default_grid_has_31_samples_per_axis() {
        let grid = default_grid();
        assert_eq!(grid.shape(), (31, 31));
        assert_relative_eq!(grid.xs[0], -0.75, epsilon = 1e-12);
        assert_relative_eq!(*grid.xs.last().unwrap(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(grid.xs[1] - grid.xs[0], 0.05, epsilon = 1e-12);
    }

    #[test]
    fn field_shape_matches_grid() {
        let grid = default_grid();
        let field = potential_field(&grid);
        assert_eq!(field.dim(), grid.shape());
    }

    #[test]
    fn field_cells_follow_grid_ordering() {
        let grid = default_grid();
        let field = potential_field(&grid);
        for &(i, j) in &[(0, 0), (7, 22), (30, 4), (15, 15)] {
            assert_relative_eq!(field[[i, j]], potential(grid.xs[i], grid.ys[j]));
        }
        // Center of the default grid is the origin, where V vanishes.
        assert_relative_eq!(field[[15, 15]], 0.0);
    }

    #[test]
    fn field_is_symmetric_in_x() {
        // V(x, y) = V(−x, y): the potential is even in x.
        let grid = default_grid();
        let field = potential_field(&grid);
        for i in 0..31 {
            for j in 0..31 {
                assert_relative_eq!(field[[i, j]], field[[30 - i, j]], epsilon = 1e-12);
            }
        }
    }
}
