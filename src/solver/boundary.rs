use crate::field::{idx, ScalarField};

/// How a field's border cells are rebuilt from the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryKind {
    /// Neumann: copy the neighbor (scalars, pressure, divergence).
    #[default]
    None,
    /// Horizontal velocity: negate across the left/right walls.
    NormalX,
    /// Vertical velocity: negate across the top/bottom walls.
    NormalY,
}

/// Closed-box boundary handler.
///   - rows 0 and N-1 copy the adjacent interior row (negated for `NormalY`)
///   - columns 0 and N-1 copy the adjacent interior column (negated for `NormalX`)
///   - corners average their two freshly written edge neighbors
///
/// Interior cells are never touched.
pub fn set_bnd(kind: BoundaryKind, field: &mut ScalarField) {
    let n = field.n();
    let x = field.as_mut_slice();
    let flip_y = if kind == BoundaryKind::NormalY { -1.0 } else { 1.0 };
    let flip_x = if kind == BoundaryKind::NormalX { -1.0 } else { 1.0 };

    for i in 1..(n - 1) {
        x[idx(i, 0, n)] = flip_y * x[idx(i, 1, n)];
        x[idx(i, n - 1, n)] = flip_y * x[idx(i, n - 2, n)];
    }
    for j in 1..(n - 1) {
        x[idx(0, j, n)] = flip_x * x[idx(1, j, n)];
        x[idx(n - 1, j, n)] = flip_x * x[idx(n - 2, j, n)];
    }

    x[idx(0, 0, n)] = 0.5 * (x[idx(1, 0, n)] + x[idx(0, 1, n)]);
    x[idx(0, n - 1, n)] = 0.5 * (x[idx(1, n - 1, n)] + x[idx(0, n - 2, n)]);
    x[idx(n - 1, 0, n)] = 0.5 * (x[idx(n - 2, 0, n)] + x[idx(n - 1, 1, n)]);
    x[idx(n - 1, n - 1, n)] = 0.5 * (x[idx(n - 2, n - 1, n)] + x[idx(n - 1, n - 2, n)]);
}
