use crate::field::{idx, ScalarField};

/// Sum of squared central-difference divergence over interior cells, using the
/// same stencil and `1/N` scaling as the projection step.
pub fn divergence_energy(vx: &ScalarField, vy: &ScalarField) -> f64 {
    let n = vx.n();
    let n_f = n as f64;
    let u = vx.as_slice();
    let v = vy.as_slice();
    let mut sum = 0.0;
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            let d = 0.5
                * (u[idx(i + 1, j, n)] - u[idx(i - 1, j, n)] + v[idx(i, j + 1, n)] - v[idx(i, j - 1, n)])
                / n_f;
            sum += d * d;
        }
    }
    sum
}

/// Interior-averaged kinetic energy: KE = 0.5 * <vx² + vy²>.
pub fn kinetic_energy(vx: &ScalarField, vy: &ScalarField) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for ((_, _, u), (_, _, v)) in vx.interior().zip(vy.interior()) {
        sum += u * u + v * v;
        count += 1;
    }
    if count > 0 { 0.5 * sum / count as f64 } else { 0.0 }
}

/// Largest interior speed |v|.
pub fn max_speed(vx: &ScalarField, vy: &ScalarField) -> f64 {
    vx.interior()
        .zip(vy.interior())
        .map(|((_, _, u), (_, _, v))| (u * u + v * v).sqrt())
        .fold(0.0, f64::max)
}

/// Interior sum of a transported scalar.
pub fn total_mass(field: &ScalarField) -> f64 {
    field.interior().map(|(_, _, v)| v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divergence_energy_zero_for_uniform_flow() {
        let n = 10;
        let vx = ScalarField::from_vec(n, vec![0.7; n * n]).unwrap();
        let vy = ScalarField::from_vec(n, vec![-0.2; n * n]).unwrap();
        assert_eq!(divergence_energy(&vx, &vy), 0.0);
    }

    #[test]
    fn test_divergence_energy_single_impulse() {
        let n = 5;
        let mut vx = ScalarField::new(n).unwrap();
        let vy = ScalarField::new(n).unwrap();
        vx[(2, 2)] = 1.0;
        // Cells (1,2) and (3,2) each see 0.5 / N.
        let expected = 2.0 * (0.5 / 5.0_f64).powi(2);
        assert!((divergence_energy(&vx, &vy) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_kinetic_energy_zero() {
        let vx = ScalarField::new(8).unwrap();
        let vy = ScalarField::new(8).unwrap();
        let ke = kinetic_energy(&vx, &vy);
        assert!(ke.abs() < 1e-15, "KE should be 0 with no flow, got {}", ke);
    }

    #[test]
    fn test_kinetic_energy_uniform_flow() {
        let n = 8;
        let vx = ScalarField::from_vec(n, vec![1.0; n * n]).unwrap();
        let vy = ScalarField::new(n).unwrap();
        let ke = kinetic_energy(&vx, &vy);
        assert!((ke - 0.5).abs() < 1e-10, "KE should be 0.5, got {}", ke);
    }

    #[test]
    fn test_max_speed_ignores_border() {
        let n = 6;
        let mut vx = ScalarField::new(n).unwrap();
        let mut vy = ScalarField::new(n).unwrap();
        vx[(0, 3)] = 100.0;
        vx[(2, 2)] = 3.0;
        vy[(2, 2)] = 4.0;
        assert_eq!(max_speed(&vx, &vy), 5.0);
    }

    #[test]
    fn test_total_mass_sums_interior() {
        let n = 4;
        let mut d = ScalarField::new(n).unwrap();
        d[(1, 1)] = 1.5;
        d[(2, 2)] = 2.5;
        d[(0, 0)] = 10.0;
        assert_eq!(total_mass(&d), 4.0);
    }
}
