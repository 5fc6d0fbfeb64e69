use crate::error::Result;
pub use crate::field::MIN_GRID;
use crate::field::ScalarField;

/// All buffers owned by one simulation. Allocated once, zeroed, never resized.
#[derive(Debug, Clone)]
pub struct SimState {
    pub n: usize,
    pub vx: ScalarField,
    pub vy: ScalarField,
    pub vx0: ScalarField,
    pub vy0: ScalarField,
    pub density: ScalarField,
    pub density0: ScalarField,
    /// Scratch buffer for the pressure solve.
    pub scratch_a: ScalarField,
    /// Scratch buffer for the divergence field.
    pub scratch_b: ScalarField,
    /// Passive tracer positions in grid units (empty when tracers are off).
    pub particles_x: Vec<f64>,
    pub particles_y: Vec<f64>,
    /// Unit heading of each tracer after its last move; zero while at rest.
    pub particle_dir_x: Vec<f64>,
    pub particle_dir_y: Vec<f64>,
}

impl SimState {
    pub fn new(n: usize, tracers: bool) -> Result<Self> {
        let count = if tracers { n * n } else { 0 };
        let mut state = Self {
            n,
            vx: ScalarField::new(n)?,
            vy: ScalarField::new(n)?,
            vx0: ScalarField::new(n)?,
            vy0: ScalarField::new(n)?,
            density: ScalarField::new(n)?,
            density0: ScalarField::new(n)?,
            scratch_a: ScalarField::new(n)?,
            scratch_b: ScalarField::new(n)?,
            particles_x: vec![0.0; count],
            particles_y: vec![0.0; count],
            particle_dir_x: vec![0.0; count],
            particle_dir_y: vec![0.0; count],
        };
        state.seed_particles();
        Ok(state)
    }

    /// Zero every field and put tracers back on the lattice.
    pub fn reset(&mut self) {
        for f in [
            &mut self.vx,
            &mut self.vy,
            &mut self.vx0,
            &mut self.vy0,
            &mut self.density,
            &mut self.density0,
            &mut self.scratch_a,
            &mut self.scratch_b,
        ] {
            f.fill(0.0);
        }
        self.particle_dir_x.fill(0.0);
        self.particle_dir_y.fill(0.0);
        self.seed_particles();
    }

    /// One tracer per grid cell, placed on the cell's integer coordinates.
    fn seed_particles(&mut self) {
        let n = self.n;
        for (k, (px, py)) in self.particles_x.iter_mut().zip(self.particles_y.iter_mut()).enumerate() {
            *px = (k % n) as f64;
            *py = (k / n) as f64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FluidError;

    #[test]
    fn test_rejects_grid_without_interior() {
        assert!(matches!(SimState::new(2, false), Err(FluidError::GridTooSmall { n: 2 })));
        assert!(matches!(SimState::new(0, true), Err(FluidError::GridTooSmall { n: 0 })));
        assert!(SimState::new(3, false).is_ok());
    }

    #[test]
    fn test_all_fields_correct_size() {
        let n = 12;
        let state = SimState::new(n, true).unwrap();
        for f in [
            &state.vx,
            &state.vy,
            &state.vx0,
            &state.vy0,
            &state.density,
            &state.density0,
            &state.scratch_a,
            &state.scratch_b,
        ] {
            assert_eq!(f.len(), n * n);
            assert_eq!(f.n(), n);
            assert!(f.as_slice().iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_particles_seeded_on_lattice() {
        let n = 6;
        let state = SimState::new(n, true).unwrap();
        assert_eq!(state.particles_x.len(), n * n);
        assert_eq!((state.particles_x[0], state.particles_y[0]), (0.0, 0.0));
        assert_eq!((state.particles_x[n + 2], state.particles_y[n + 2]), (2.0, 1.0));
        assert_eq!((state.particles_x[n * n - 1], state.particles_y[n * n - 1]), (5.0, 5.0));
    }

    #[test]
    fn test_no_particles_when_disabled() {
        let state = SimState::new(8, false).unwrap();
        assert!(state.particles_x.is_empty());
        assert!(state.particles_y.is_empty());
        assert!(state.particle_dir_x.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let n = 7;
        let mut state = SimState::new(n, true).unwrap();
        state.vx[(3, 3)] = 1.0;
        state.vy0[(2, 4)] = -2.0;
        state.density[(1, 1)] = 5.0;
        state.scratch_b[(5, 5)] = 9.0;
        state.particles_x[4] = 3.25;
        state.particle_dir_y[4] = 1.0;

        state.reset();

        assert!(state.vx.as_slice().iter().all(|&v| v == 0.0));
        assert!(state.vy0.as_slice().iter().all(|&v| v == 0.0));
        assert!(state.density.as_slice().iter().all(|&v| v == 0.0));
        assert!(state.scratch_b.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(state.particles_x[4], 4.0);
        assert_eq!(state.particle_dir_y[4], 0.0);
        assert_eq!(state.vx.len(), n * n);
    }
}
