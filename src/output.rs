use std::error::Error;
use std::path::Path;

use ndarray::Array2;

use crate::dynamics::field::hamiltonian;
use crate::state::Trajectory;
use crate::surface::Grid;

/// Write a trajectory as CSV: one row per sample, with the energy alongside
/// the state for drift inspection.
pub fn write_trajectory<P: AsRef<Path>>(path: P, traj: &Trajectory) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["t", "x", "y", "px", "py", "energy"])?;
    for (t, s) in traj.iter() {
        writer.serialize((t, s[0], s[1], s[2], s[3], hamiltonian(s)))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a potential field as long-format CSV (x, y, v), one row per grid
/// cell in (i, j) order.
pub fn write_potential_field<P: AsRef<Path>>(
    path: P,
    grid: &Grid,
    field: &Array2<f64>,
) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["x", "y", "v"])?;
    for i in 0..grid.xs.len() {
        for j in 0..grid.ys.len() {
            writer.serialize((grid.xs[i], grid.ys[j], field[[i, j]]))?;
        }
    }
    writer.flush()?;
    Ok(())
}
