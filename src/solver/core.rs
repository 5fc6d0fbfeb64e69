use crate::field::{idx, ScalarField};
use super::boundary::{set_bnd, BoundaryKind};

/// Gauss-Seidel sweeps per implicit solve. Fixed: results are defined by this
/// count and the traversal order, not by a convergence tolerance.
pub const RELAX_ITER: usize = 4;

/// One in-place Gauss-Seidel pass over the interior, rows ascending then columns.
/// Neighbors already updated in this pass are used as-is.
#[inline]
pub(crate) fn relax_sweep(x: &mut [f64], x0: &[f64], a: f64, c_inv: f64, n: usize) {
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            let neighbors = x[idx(i - 1, j, n)]
                + x[idx(i + 1, j, n)]
                + x[idx(i, j - 1, n)]
                + x[idx(i, j + 1, n)];
            x[idx(i, j, n)] = (x0[idx(i, j, n)] + a * neighbors) * c_inv;
        }
    }
}

/// Operators index every operand with one flat stride, so all must share a grid.
#[track_caller]
fn assert_same_grid(n: usize, fields: &[&ScalarField]) {
    for f in fields {
        assert_eq!(f.n(), n, "operand grid {0}x{0} does not match {n}x{n}", f.n());
    }
}

/// Gauss-Seidel iterative linear solver.
/// Solves: x[i,j] = (x0[i,j] + a * (neighbors)) / c
pub fn lin_solve(kind: BoundaryKind, x: &mut ScalarField, x0: &ScalarField, a: f64, c: f64) {
    let n = x.n();
    assert_same_grid(n, &[x0]);
    let c_inv = 1.0 / c;
    for _ in 0..RELAX_ITER {
        relax_sweep(x.as_mut_slice(), x0.as_slice(), a, c_inv, n);
        set_bnd(kind, x);
    }
}

/// Implicit diffusion of `source` into `target`.
/// a = dt * rate * (N-2)^2, c = 1 + 4a
///
/// Negative rates or timesteps are accepted and sharpen instead of smoothing.
/// At `a = -1/4` the system is singular (`c == 0`); `target` is then left as a
/// copy of `source`.
pub fn diffuse(kind: BoundaryKind, target: &mut ScalarField, source: &ScalarField, rate: f64, dt: f64) {
    assert_same_grid(target.n(), &[source]);
    let n2 = (target.n() - 2) as f64;
    let a = dt * rate * n2 * n2;
    let c = 1.0 + 4.0 * a;
    // Seed the relaxation from the pre-diffusion values, never from stale scratch.
    target.copy_from(source);
    if c == 0.0 {
        set_bnd(kind, target);
        return;
    }
    lin_solve(kind, target, source, a, c);
}

/// Semi-Lagrangian advection: traces each interior cell backwards through the
/// velocity field and bilinearly resamples `source` at the origin.
pub fn advect(
    kind: BoundaryKind,
    target: &mut ScalarField,
    source: &ScalarField,
    vx: &ScalarField,
    vy: &ScalarField,
    dt: f64,
) {
    let n = target.n();
    assert_same_grid(n, &[source, vx, vy]);
    let dt0 = dt * (n - 2) as f64;
    // Half-cell padding on both sides keeps i0+1 / j0+1 inside the array.
    let lo = 0.5;
    let hi = n as f64 - 1.5;

    let d = target.as_mut_slice();
    let d0 = source.as_slice();
    let u = vx.as_slice();
    let v = vy.as_slice();

    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            let ii = idx(i, j, n);
            let x = (i as f64 - dt0 * u[ii]).clamp(lo, hi);
            let y = (j as f64 - dt0 * v[ii]).clamp(lo, hi);

            let i0 = x.floor() as usize;
            let j0 = y.floor() as usize;
            let i1 = i0 + 1;
            let j1 = j0 + 1;
            let s1 = x - i0 as f64;
            let s0 = 1.0 - s1;
            let t1 = y - j0 as f64;
            let t0 = 1.0 - t1;

            d[ii] = s0 * (t0 * d0[idx(i0, j0, n)] + t1 * d0[idx(i0, j1, n)])
                + s1 * (t0 * d0[idx(i1, j0, n)] + t1 * d0[idx(i1, j1, n)]);
        }
    }
    set_bnd(kind, target);
}

/// Pressure projection: pushes the velocity field towards divergence-free.
/// Only `RELAX_ITER` sweeps go into the Poisson solve, so divergence is reduced,
/// not eliminated.
pub fn project(vx: &mut ScalarField, vy: &mut ScalarField, p: &mut ScalarField, div: &mut ScalarField) {
    let n = vx.n();
    assert_same_grid(n, &[&*vy, &*p, &*div]);
    let n_f = n as f64;

    {
        let u = vx.as_slice();
        let v = vy.as_slice();
        let dv = div.as_mut_slice();
        let pr = p.as_mut_slice();
        for j in 1..(n - 1) {
            for i in 1..(n - 1) {
                dv[idx(i, j, n)] = -0.5
                    * (u[idx(i + 1, j, n)] - u[idx(i - 1, j, n)] + v[idx(i, j + 1, n)]
                        - v[idx(i, j - 1, n)])
                    / n_f;
                pr[idx(i, j, n)] = 0.0;
            }
        }
    }
    set_bnd(BoundaryKind::None, div);
    set_bnd(BoundaryKind::None, p);

    lin_solve(BoundaryKind::None, p, div, 1.0, 6.0);

    // Subtract pressure gradient from velocity
    {
        let pr = p.as_slice();
        let u = vx.as_mut_slice();
        let v = vy.as_mut_slice();
        for j in 1..(n - 1) {
            for i in 1..(n - 1) {
                u[idx(i, j, n)] -= 0.5 * (pr[idx(i + 1, j, n)] - pr[idx(i - 1, j, n)]) * n_f;
                v[idx(i, j, n)] -= 0.5 * (pr[idx(i, j + 1, n)] - pr[idx(i, j - 1, n)]) * n_f;
            }
        }
    }
    set_bnd(BoundaryKind::NormalX, vx);
    set_bnd(BoundaryKind::NormalY, vy);
}
