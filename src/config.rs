use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::error::{FluidError, Result};
use crate::solver::SolverParams;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "gridfluid.yaml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub run: RunConfig,
    pub impulse: ImpulseConfig,
    /// Seed one tracer particle per grid cell.
    pub particles: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub size: usize,
    pub diffusion: f64,
    pub viscosity: f64,
    pub dt: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub steps: usize,
    pub log_every: usize,
}

/// Periodic 3×3 injection used by the headless driver in place of pointer drags.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ImpulseConfig {
    /// Grid cell to inject at; unset coordinates default to the grid center.
    pub x: Option<usize>,
    pub y: Option<usize>,
    pub vx: f64,
    pub vy: f64,
    pub density: f64,
    /// Inject every this many steps; 0 injects only before the first step.
    pub every: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            run: RunConfig::default(),
            impulse: ImpulseConfig::default(),
            particles: false,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            size: 100,
            diffusion: 0.0001,
            viscosity: 0.0001,
            dt: 0.1,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { steps: 200, log_every: 20 }
    }
}

impl Default for ImpulseConfig {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            vx: 0.5,
            vy: 0.0,
            density: 10.0,
            every: 10,
        }
    }
}

impl ImpulseConfig {
    /// Injection cell on a `size`×`size` grid.
    pub fn position(&self, size: usize) -> (usize, usize) {
        let center = size / 2;
        (self.x.unwrap_or(center), self.y.unwrap_or(center))
    }
}

impl Config {
    /// Reject combinations the driver cannot run with.
    pub fn validate(&self) -> Result<()> {
        let size = self.physics.size;
        let (x, y) = self.impulse.position(size);
        if x >= size || y >= size {
            return Err(FluidError::Config(format!(
                "impulse at ({x}, {y}) is outside the {size}x{size} grid"
            )));
        }
        Ok(())
    }
}

impl PhysicsConfig {
    pub fn solver_params(&self) -> SolverParams {
        SolverParams::new(self.diffusion, self.viscosity, self.dt)
    }
}

/// Parse a config file, reporting read and parse failures.
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&contents)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `gridfluid.yaml` if present; fall back to defaults on any problem.
pub fn load() -> Config {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        return Config::default();
    }
    match load_from(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("{CONFIG_FILE}: {e}; using defaults");
            Config::default()
        }
    }
}
