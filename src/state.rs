use numeris::Vector4;

/// Phase-space state (x, y, p_x, p_y) for the two degrees of freedom.
///
/// The solvers produce a fresh state at every step; nothing mutates one in
/// place.
pub type State = Vector4<f64>;

pub fn state(x: f64, y: f64, px: f64, py: f64) -> State {
    Vector4::from_array([x, y, px, py])
}

/// Sampled (time, state) pairs returned by the driver. Read-only after
/// integration.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    pub t: Vec<f64>,
    pub states: Vec<State>,
}

impl Trajectory {
    pub fn with_capacity(n: usize) -> Self {
        Trajectory {
            t: Vec::with_capacity(n),
            states: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, t: f64, y: State) {
        self.t.push(t);
        self.states.push(y);
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn last(&self) -> Option<(f64, &State)> {
        self.t.last().map(|t| (*t, self.states.last().unwrap()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &State)> {
        self.t.iter().copied().zip(self.states.iter())
    }
}

/// Resource usage reported by the solver, summed over segments where the
/// driver integrates the span piecewise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Derivative evaluations.
    pub evals: usize,
    /// Accepted steps.
    pub accepted: usize,
    /// Rejected trial steps.
    pub rejected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trajectory_push_and_iter() {
        let mut traj = Trajectory::with_capacity(2);
        traj.push(0.0, state(0.2, 0.0, 0.4, 0.0));
        traj.push(0.1, state(0.24, 0.0, 0.38, -0.004));
        assert_eq!(traj.len(), 2);
        let (t_last, y_last) = traj.last().unwrap();
        assert_eq!(t_last, 0.1);
        assert_eq!(y_last[0], 0.24);
        let ts: Vec<f64> = traj.iter().map(|(t, _)| t).collect();
        assert_eq!(ts, vec![0.0, 0.1]);
    }

    #[test]
    fn empty_trajectory() {
        let traj = Trajectory::default();
        assert!(traj.is_empty());
        assert!(traj.last().is_none());
    }
}
