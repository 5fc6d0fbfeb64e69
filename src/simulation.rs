use log::{debug, trace};

use crate::config::Config;
use crate::error::{FluidError, Result};
use crate::field::ScalarField;
use crate::solver::{self, SolverParams};
use crate::state::SimState;

/// A fluid box of fixed size: owns every field, takes injections, and advances
/// by one split-operator step at a time.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimState,
    params: SolverParams,
    frame: u64,
}

impl Simulation {
    /// Create an `n`×`n` simulation with zeroed fields.
    pub fn new(n: usize, params: SolverParams) -> Result<Self> {
        Self::build(n, params, false)
    }

    /// Same as [`Simulation::new`] but with one passive tracer per grid cell.
    pub fn with_tracers(n: usize, params: SolverParams) -> Result<Self> {
        Self::build(n, params, true)
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::build(cfg.physics.size, cfg.physics.solver_params(), cfg.particles)
    }

    fn build(n: usize, params: SolverParams, tracers: bool) -> Result<Self> {
        let state = SimState::new(n, tracers)?;
        debug!(
            "simulation {n}x{n}: diff={} visc={} dt={} tracers={}",
            params.diff,
            params.visc,
            params.dt,
            state.particles_x.len()
        );
        Ok(Self { state, params, frame: 0 })
    }

    pub fn size(&self) -> usize {
        self.state.n
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Number of completed steps since construction or the last reset.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    fn check(&self, x: usize, y: usize) -> Result<()> {
        let n = self.state.n;
        if x < n && y < n {
            Ok(())
        } else {
            Err(FluidError::OutOfBounds { x, y, n })
        }
    }

    /// Add velocity at one cell. Takes effect on the next [`Simulation::step`].
    pub fn add_velocity(&mut self, x: usize, y: usize, amount_x: f64, amount_y: f64) -> Result<()> {
        ensure_finite("velocity", &[amount_x, amount_y])?;
        self.check(x, y)?;
        self.state.vx[(x, y)] += amount_x;
        self.state.vy[(x, y)] += amount_y;
        Ok(())
    }

    /// Add density at one cell. Takes effect on the next [`Simulation::step`].
    pub fn add_density(&mut self, x: usize, y: usize, amount: f64) -> Result<()> {
        ensure_finite("density", &[amount])?;
        self.check(x, y)?;
        self.state.density[(x, y)] += amount;
        Ok(())
    }

    /// Add velocity over the 3×3 block centered on `(x, y)`. The center must be on
    /// the grid; neighbors falling off the edge are skipped.
    pub fn splat_velocity(&mut self, x: usize, y: usize, amount_x: f64, amount_y: f64) -> Result<()> {
        ensure_finite("velocity", &[amount_x, amount_y])?;
        self.check(x, y)?;
        for (cx, cy) in self.brush(x, y) {
            self.state.vx[(cx, cy)] += amount_x;
            self.state.vy[(cx, cy)] += amount_y;
        }
        Ok(())
    }

    /// Density counterpart of [`Simulation::splat_velocity`].
    pub fn splat_density(&mut self, x: usize, y: usize, amount: f64) -> Result<()> {
        ensure_finite("density", &[amount])?;
        self.check(x, y)?;
        for (cx, cy) in self.brush(x, y) {
            self.state.density[(cx, cy)] += amount;
        }
        Ok(())
    }

    /// Turn a pointer drag (grid coordinates) into a velocity splat at the press
    /// point. The impulse points along the drag with magnitude `strength`; a
    /// zero-length drag adds nothing.
    pub fn drag(&mut self, from: (f64, f64), to: (f64, f64), strength: f64) -> Result<()> {
        ensure_finite("drag start", &[from.0, from.1])?;
        ensure_finite("drag end", &[to.0, to.1])?;
        ensure_finite("drag strength", &[strength])?;

        let n = self.state.n;
        let (fx, fy) = from;
        if !(fx >= 0.0 && fy >= 0.0 && fx < n as f64 && fy < n as f64) {
            return Err(FluidError::OutOfBounds {
                x: fx.max(0.0) as usize,
                y: fy.max(0.0) as usize,
                n,
            });
        }

        let (mut dx, mut dy) = (to.0 - fx, to.1 - fy);
        let len = dx.hypot(dy);
        if len != 0.0 {
            dx /= len;
            dy /= len;
        }
        dx *= strength;
        dy *= strength;
        trace!("drag from ({fx:.1}, {fy:.1}) -> impulse ({dx:.4}, {dy:.4})");
        self.splat_velocity(fx as usize, fy as usize, dx, dy)
    }

    fn brush(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        let n = self.state.n;
        let xs = x.saturating_sub(1)..=(x + 1).min(n - 1);
        let ys = y.saturating_sub(1)..=(y + 1).min(n - 1);
        ys.flat_map(move |cy| xs.clone().map(move |cx| (cx, cy)))
    }

    /// Advance one step with the configured timestep.
    pub fn step(&mut self) {
        solver::fluid_step(&mut self.state, &self.params);
        self.frame += 1;
    }

    /// Advance one step with an explicit timestep; the configured one is untouched.
    pub fn step_with_dt(&mut self, dt: f64) {
        let params = self.params.with_dt(dt);
        solver::fluid_step(&mut self.state, &params);
        self.frame += 1;
    }

    /// Clear all fields and put tracers back on the lattice.
    pub fn reset(&mut self) {
        self.state.reset();
        self.frame = 0;
        debug!("simulation reset");
    }

    pub fn velocity_x(&self) -> &ScalarField {
        &self.state.vx
    }

    pub fn velocity_y(&self) -> &ScalarField {
        &self.state.vy
    }

    pub fn density(&self) -> &ScalarField {
        &self.state.density
    }

    /// Velocity at a cell, if it is on the grid.
    pub fn velocity_at(&self, x: usize, y: usize) -> Option<(f64, f64)> {
        Some((self.state.vx.get(x, y)?, self.state.vy.get(x, y)?))
    }

    /// Tracer positions as parallel x/y slices.
    pub fn particles(&self) -> (&[f64], &[f64]) {
        (&self.state.particles_x, &self.state.particles_y)
    }

    /// Unit tracer headings from the last step, parallel to [`Simulation::particles`].
    pub fn particle_directions(&self) -> (&[f64], &[f64]) {
        (&self.state.particle_dir_x, &self.state.particle_dir_y)
    }
}

fn ensure_finite(what: &'static str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(FluidError::NonFinite { what })
    }
}
