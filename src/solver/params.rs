/// Solver parameters for the fluid simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParams {
    /// Diffusion rate of the transported scalar (density).
    pub diff: f64,
    /// Kinematic viscosity applied to both velocity components.
    pub visc: f64,
    pub dt: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            diff: 0.0001,
            visc: 0.0001,
            dt: 0.1,
        }
    }
}

impl SolverParams {
    pub fn new(diff: f64, visc: f64, dt: f64) -> Self {
        Self { diff, visc, dt }
    }

    /// Same parameters with a different timestep.
    pub fn with_dt(&self, dt: f64) -> Self {
        Self { dt, ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SolverParams::default();
        assert_eq!(params.diff, 0.0001);
        assert_eq!(params.visc, 0.0001);
        assert_eq!(params.dt, 0.1);
    }

    #[test]
    fn test_with_dt_keeps_rates() {
        let params = SolverParams::new(0.5, 0.25, 0.1).with_dt(0.02);
        assert_eq!(params, SolverParams::new(0.5, 0.25, 0.02));
    }
}
