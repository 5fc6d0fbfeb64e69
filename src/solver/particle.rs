use crate::field::{idx, ScalarField};
use crate::state::SimState;

/// Bilinear sample of `f` at a fractional grid position, clamped to the grid.
pub fn sample(f: &ScalarField, x: f64, y: f64) -> f64 {
    let n = f.n();
    let max = (n - 2) as f64;
    let i0 = x.floor().clamp(0.0, max) as usize;
    let j0 = y.floor().clamp(0.0, max) as usize;
    let sx = (x - i0 as f64).clamp(0.0, 1.0);
    let sy = (y - j0 as f64).clamp(0.0, 1.0);
    let d = f.as_slice();

    (1.0 - sx) * (1.0 - sy) * d[idx(i0, j0, n)]
        + sx * (1.0 - sy) * d[idx(i0 + 1, j0, n)]
        + (1.0 - sx) * sy * d[idx(i0, j0 + 1, n)]
        + sx * sy * d[idx(i0 + 1, j0 + 1, n)]
}

/// Move tracers through the current velocity field and record each one's
/// heading. Positions leaving [0, N-1] wrap periodically with period N-1.
pub fn advect_particles(state: &mut SimState, dt: f64) {
    let dt0 = dt * (state.n - 2) as f64;
    let span = (state.n - 1) as f64;

    let positions = state.particles_x.iter_mut().zip(state.particles_y.iter_mut());
    let headings = state.particle_dir_x.iter_mut().zip(state.particle_dir_y.iter_mut());
    for ((px, py), (hx, hy)) in positions.zip(headings) {
        let u = sample(&state.vx, *px, *py);
        let v = sample(&state.vy, *px, *py);
        *px = wrap(*px + dt0 * u, span);
        *py = wrap(*py + dt0 * v, span);
        (*hx, *hy) = heading(u, v);
    }
}

/// Unit vector along `(u, v)`, or zero when there is no motion.
fn heading(u: f64, v: f64) -> (f64, f64) {
    let len = u.hypot(v);
    if len == 0.0 {
        (0.0, 0.0)
    } else {
        (u / len, v / len)
    }
}

fn wrap(p: f64, span: f64) -> f64 {
    if (0.0..=span).contains(&p) {
        p
    } else {
        p.rem_euclid(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_hits_grid_points() {
        let n = 5;
        let mut f = ScalarField::new(n).unwrap();
        f[(2, 3)] = 4.0;
        assert_eq!(sample(&f, 2.0, 3.0), 4.0);
        assert_eq!(sample(&f, 2.5, 3.0), 2.0);
        assert_eq!(sample(&f, 2.0, 2.5), 2.0);
    }

    #[test]
    fn test_sample_last_row_and_column() {
        let n = 4;
        let mut f = ScalarField::new(n).unwrap();
        f[(3, 3)] = 8.0;
        assert_eq!(sample(&f, 3.0, 3.0), 8.0);
        assert_eq!(sample(&f, 10.0, -4.0), 0.0);
    }

    #[test]
    fn test_zero_velocity_keeps_particles() {
        let mut state = SimState::new(8, true).unwrap();
        let xs = state.particles_x.clone();
        let ys = state.particles_y.clone();
        advect_particles(&mut state, 0.1);
        assert_eq!(state.particles_x, xs);
        assert_eq!(state.particles_y, ys);
    }

    #[test]
    fn test_uniform_velocity_moves_particles() {
        let n = 12;
        let mut state = SimState::new(n, true).unwrap();
        state.vx.fill(0.05);
        let dt = 0.1;
        let k = 5 * n + 4; // starts at (4, 5)
        advect_particles(&mut state, dt);
        let expected = 4.0 + dt * (n - 2) as f64 * 0.05;
        assert!((state.particles_x[k] - expected).abs() < 1e-12, "got {}", state.particles_x[k]);
        assert_eq!(state.particles_y[k], 5.0);
    }

    #[test]
    fn test_headings_follow_flow() {
        let n = 10;
        let mut state = SimState::new(n, true).unwrap();
        state.vx.fill(0.03);
        state.vy.fill(-0.04);
        advect_particles(&mut state, 0.1);
        for (&hx, &hy) in state.particle_dir_x.iter().zip(state.particle_dir_y.iter()) {
            assert!((hx - 0.6).abs() < 1e-12 && (hy + 0.8).abs() < 1e-12, "got ({}, {})", hx, hy);
        }
    }

    #[test]
    fn test_headings_zero_at_rest() {
        let mut state = SimState::new(6, true).unwrap();
        state.particle_dir_x.fill(1.0);
        advect_particles(&mut state, 0.1);
        assert!(state.particle_dir_x.iter().all(|&h| h == 0.0));
        assert!(state.particle_dir_y.iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(3.0, 9.0), 3.0);
        assert_eq!(wrap(9.0, 9.0), 9.0);
        assert_eq!(wrap(-1.5, 9.0), 7.5);
        assert_eq!(wrap(10.0, 9.0), 1.0);
    }

    #[test]
    fn test_particles_wrap_around() {
        let n = 10;
        let mut state = SimState::new(n, true).unwrap();
        state.vx.fill(-1.0);
        state.vy.fill(1.0);
        advect_particles(&mut state, 0.25);
        let span = (n - 1) as f64;
        for (&x, &y) in state.particles_x.iter().zip(state.particles_y.iter()) {
            assert!(x >= 0.0 && x <= span, "x out of range: {}", x);
            assert!(y >= 0.0 && y <= span, "y out of range: {}", y);
        }
    }
}
