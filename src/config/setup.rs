use std::{error::Error, fs::File, io::Read, path::Path};

use crate::state::{state, State};

/// Solver selection. All three choices target the same trajectory; they
/// differ only in step-selection strategy and resource usage.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type")]
pub enum SolverConfig {
    /// Fixed-step classic 4th-order Runge-Kutta.
    FixedRk4 { dt: f64 },
    /// Tsitouras 5(4) adaptive explicit method, the default for this
    /// non-stiff system.
    Tsit54,
    /// RODAS4 linearly-implicit Rosenbrock method. Included for comparison;
    /// costs more per unit time here since nothing in the system is stiff.
    Rodas4,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct IntegrationParams {
    pub t_start: f64,
    pub t_end: f64,
    /// Spacing of recorded trajectory samples.
    pub dt_sample: f64,
    pub abs_tol: f64,
    pub rel_tol: f64,
    /// Step-count limit before the solver gives up.
    pub max_steps: usize,
    pub solver: SolverConfig,
}

impl Default for IntegrationParams {
    fn default() -> Self {
        IntegrationParams {
            t_start: 0.0,
            t_end: 500.0,
            dt_sample: 0.1,
            abs_tol: 1e-8,
            rel_tol: 1e-8,
            max_steps: 100_000,
            solver: SolverConfig::Tsit54,
        }
    }
}

impl IntegrationParams {
    pub fn n_samples(&self) -> usize {
        ((self.t_end - self.t_start) / self.dt_sample).ceil() as usize
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct InitialCondition {
    pub x: f64,
    pub y: f64,
    pub px: f64,
    pub py: f64,
}

impl Default for InitialCondition {
    fn default() -> Self {
        InitialCondition {
            x: 0.2,
            y: 0.0,
            px: 0.4,
            py: 0.0,
        }
    }
}

impl InitialCondition {
    pub fn as_state(&self) -> State {
        state(self.x, self.y, self.px, self.py)
    }
}

/// Square sampling grid for the potential surface.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            min: -0.75,
            max: 0.75,
            step: 0.05,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SetupConfig {
    #[serde(default)]
    pub integration: IntegrationParams,
    #[serde(default)]
    pub initial_condition: InitialCondition,
    #[serde(default)]
    pub grid: GridConfig,
}

impl SetupConfig {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config: SetupConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject setups whose spacings would make the sample count or grid
    /// size meaningless.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if !(self.integration.dt_sample > 0.0) {
            return Err(format!(
                "dt_sample must be positive, got {}",
                self.integration.dt_sample
            )
            .into());
        }
        if !(self.grid.step > 0.0) {
            return Err(format!("grid step must be positive, got {}", self.grid.step).into());
        }
        Ok(())
    }

    pub fn print(&self) {
        let ip = &self.integration;
        let ic = &self.initial_condition;
        println!(
            "\
Integration:
  Span: [{t_start}, {t_end}], sampled every {dt_sample}
  Solver: {solver:?}
  Tolerances: abs={abs_tol:.0e}, rel={rel_tol:.0e}

Initial condition:
  (x, y, p_x, p_y) = ({x}, {y}, {px}, {py})

Potential grid:
  [{gmin}, {gmax}] step {gstep} per axis",
            t_start = ip.t_start,
            t_end = ip.t_end,
            dt_sample = ip.dt_sample,
            solver = ip.solver,
            abs_tol = ip.abs_tol,
            rel_tol = ip.rel_tol,
            x = ic.x,
            y = ic.y,
            px = ic.px,
            py = ic.py,
            gmin = self.grid.min,
            gmax = self.grid.max,
            gstep = self.grid.step,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let config = SetupConfig::default();
        assert_eq!(config.integration.t_end, 500.0);
        assert_eq!(config.integration.solver, SolverConfig::Tsit54);
        let y0 = config.initial_condition.as_state();
        assert_eq!(y0[0], 0.2);
        assert_eq!(y0[2], 0.4);
        assert_eq!(config.integration.n_samples(), 5000);
    }

    #[test]
    fn parse_yaml_with_tagged_solver() {
        let yaml = "\
integration:
  t_start: 0.0
  t_end: 100.0
  dt_sample: 0.5
  abs_tol: 1.0e-6
  rel_tol: 1.0e-6
  max_steps: 10000
  solver:
    type: FixedRk4
    dt: 0.01
initial_condition:
  x: 0.0
  y: 0.1
  px: 0.5
  py: 0.0
";
        let config: SetupConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.integration.t_end, 100.0);
        assert_eq!(
            config.integration.solver,
            SolverConfig::FixedRk4 { dt: 0.01 }
        );
        assert_eq!(config.initial_condition.y, 0.1);
        // Omitted section falls back to the defaults.
        assert_eq!(config.grid, GridConfig::default());
    }

    #[test]
    fn zero_sample_spacing_is_rejected() {
        let mut config = SetupConfig::default();
        config.integration.dt_sample = 0.0;
        assert!(config.validate().is_err());
        config.integration.dt_sample = -0.1;
        assert!(config.validate().is_err());
        config.integration.dt_sample = 0.1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_rejects_nonpositive_grid_step() {
        let yaml = "\
grid:
  min: -0.75
  max: 0.75
  step: 0.0
";
        let path = std::env::temp_dir().join("heiles_setup_bad_grid.yaml");
        std::fs::write(&path, yaml).unwrap();
        let result = SetupConfig::parse(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
