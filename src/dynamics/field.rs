use numeris::{Matrix4, Vector4};

use crate::state::{State, Trajectory};

/// Hénon-Heiles potential V(x, y) = (x² + y²)/2 + x²y − y³/3.
pub fn potential(x: f64, y: f64) -> f64 {
    0.5 * (x * x + y * y) + x * x * y - y * y * y / 3.0
}

/// Total energy H = (p_x² + p_y²)/2 + V(x, y). Conserved along exact
/// trajectories; numerical drift from H(u0) measures integration quality.
pub fn hamiltonian(s: &State) -> f64 {
    0.5 * (s[2] * s[2] + s[3] * s[3]) + potential(s[0], s[1])
}

/// Equations of motion:
///
///   dx/dt   = p_x
///   dy/dt   = p_y
///   dp_x/dt = −∂V/∂x = −x − 2xy
///   dp_y/dt = −∂V/∂y = −y − x² + y²
///
/// The time argument is unused (the system is autonomous) but required by
/// the solver interface.
pub fn vector_field(_t: f64, s: &State) -> State {
    let (x, y, px, py) = (s[0], s[1], s[2], s[3]);
    Vector4::from_array([px, py, -x - 2.0 * x * y, -y - x * x + y * y])
}

/// Analytic Jacobian ∂f/∂y of [`vector_field`], for the Rosenbrock solver.
pub fn jacobian(_t: f64, s: &State) -> Matrix4<f64> {
    let (x, y) = (s[0], s[1]);
    Matrix4::new([
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
        [-1.0 - 2.0 * y, -2.0 * x, 0.0, 0.0],
        [-2.0 * x, -1.0 + 2.0 * y, 0.0, 0.0],
    ])
}

/// Largest |H(state) − H(first state)| over a sampled trajectory.
pub fn max_energy_drift(traj: &Trajectory) -> f64 {
    let h0 = match traj.states.first() {
        Some(y0) => hamiltonian(y0),
        None => return 0.0,
    };
    traj.states
        .iter()
        .map(|y| (hamiltonian(y) - h0).abs())
        .fold(0.0, f64::max)
}
