use std::path::PathBuf;

use super::setup::{SetupConfig, SolverConfig};

/// Run-level options assembled from CLI arguments, layered over the setup
/// file.
#[derive(Debug, Clone)]
pub struct RunParams {
    pub t_max: Option<f64>,
    pub solver: Option<SolverConfig>,
    pub output: PathBuf,
}

impl RunParams {
    /// Apply the CLI overrides to a parsed setup.
    pub fn apply(&self, setup: &mut SetupConfig) {
        if let Some(t_max) = self.t_max {
            setup.integration.t_end = t_max;
        }
        if let Some(solver) = self.solver {
            setup.integration.solver = solver;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_what_is_given() {
        let mut setup = SetupConfig::default();
        let run = RunParams {
            t_max: Some(50.0),
            solver: None,
            output: PathBuf::from("out.csv"),
        };
        run.apply(&mut setup);
        assert_eq!(setup.integration.t_end, 50.0);
        assert_eq!(setup.integration.solver, SolverConfig::Tsit54);
    }
}
