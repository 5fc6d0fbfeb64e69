use std::ops::{Index, IndexMut};

use crate::error::{FluidError, Result};

/// Smallest grid with a non-empty interior.
pub const MIN_GRID: usize = 3;

/// Row-major flat index for cell `(x, y)` on an `n`-wide grid.
/// No wrapping or bounds checks; callers guarantee `x < n` and `y < n`.
#[inline(always)]
pub const fn idx(x: usize, y: usize, n: usize) -> usize {
    x + y * n
}

/// One physical quantity sampled over an `n`×`n` grid.
///
/// The buffer is allocated once, zeroed, and never resized. Operators work on
/// the raw slices; everything else goes through the checked accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    n: usize,
    data: Vec<f64>,
}

impl ScalarField {
    /// Zeroed `n`×`n` field. Grids below [`MIN_GRID`] have no interior and are
    /// rejected.
    pub fn new(n: usize) -> Result<Self> {
        if n < MIN_GRID {
            return Err(FluidError::GridTooSmall { n });
        }
        Ok(Self { n, data: vec![0.0; n * n] })
    }

    /// Build a field from existing row-major values. Returns `None` when the
    /// length is not `n * n` or the grid is below [`MIN_GRID`].
    pub fn from_vec(n: usize, data: Vec<f64>) -> Option<Self> {
        (n >= MIN_GRID && data.len() == n * n).then_some(Self { n, data })
    }

    /// Grid dimension.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.n && y < self.n
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.in_bounds(x, y).then(|| self.data[idx(x, y, self.n)])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut f64> {
        if self.in_bounds(x, y) {
            let n = self.n;
            Some(&mut self.data[idx(x, y, n)])
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Overwrite every cell with `other`'s values. Both fields must share `n`.
    pub fn copy_from(&mut self, other: &ScalarField) {
        debug_assert_eq!(self.n, other.n);
        self.data.copy_from_slice(&other.data);
    }

    /// Iterate over interior cells as `(x, y, value)`.
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.n;
        (1..n - 1).flat_map(move |y| (1..n - 1).map(move |x| (x, y, self.data[idx(x, y, n)])))
    }
}

impl Index<(usize, usize)> for ScalarField {
    type Output = f64;

    fn index(&self, (x, y): (usize, usize)) -> &f64 {
        assert!(self.in_bounds(x, y), "cell ({x}, {y}) outside {0}x{0} grid", self.n);
        &self.data[idx(x, y, self.n)]
    }
}

impl IndexMut<(usize, usize)> for ScalarField {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut f64 {
        assert!(self.in_bounds(x, y), "cell ({x}, {y}) outside {0}x{0} grid", self.n);
        let n = self.n;
        &mut self.data[idx(x, y, n)]
    }
}
