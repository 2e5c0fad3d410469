//! Banded (tridiagonal) systems in O(n) storage.
//!
//! Layout
//! - Row `i` occupies `band[3i..3i+3]` = (sub-diagonal, diagonal, super-diagonal).
//! - Row 0 has no sub-diagonal: slot 0 holds the top-right corner `f`.
//! - Row n-1 has no super-diagonal: slot `3n-1` holds the bottom-left corner `g`.
//! - `f` and `g` are zero for a plain tridiagonal system and couple the first and
//!   last equations in the periodic variant:
//!
//! ```text
//!   b0 c0  0  f
//!   a1 b1 c1  0
//!    0 a2 b2 c2
//!    g  0 a3 b3
//! ```
//!
//! Multi right-hand-side variants take interleaved input: `l[nb * row + k]` is row
//! `row` of right-hand side `k`, and return the solutions in the same layout.

use super::matrix::Matrix;
use crate::cfg::LITTLE_EPSILON;
use crate::error::{GeomError, GeomResult};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TridiagonalMatrix {
    band: Vec<f64>,
}

impl TridiagonalMatrix {
    /// `size × size` system with every band entry zero.
    pub fn new(size: usize) -> Self {
        Self {
            band: vec![0.0; 3 * size],
        }
    }

    /// Builds from a flat band buffer; trailing values beyond a multiple of 3 are dropped.
    pub fn from_band(band: &[f64]) -> Self {
        let size = band.len() / 3;
        Self {
            band: band[..3 * size].to_vec(),
        }
    }

    /// From the three diagonals; `lower[0]` and `upper[n-1]` are the corner terms `g` and `f`
    /// would otherwise occupy, so they are ignored. Use `set_corners` for periodic systems.
    pub fn from_diagonals(lower: &[f64], diag: &[f64], upper: &[f64]) -> GeomResult<Self> {
        let n = diag.len();
        if lower.len() != n || upper.len() != n {
            return Err(GeomError::SizeMismatch {
                caller: "TridiagonalMatrix::from_diagonals",
                expected: (n, n),
                found: (lower.len(), upper.len()),
            });
        }
        let mut m = Self::new(n);
        for i in 0..n {
            if i > 0 {
                m.band[3 * i] = lower[i];
            }
            m.band[3 * i + 1] = diag[i];
            if i + 1 < n {
                m.band[3 * i + 2] = upper[i];
            }
        }
        Ok(m)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.band.len() / 3
    }

    #[inline]
    pub fn band(&self) -> &[f64] {
        &self.band
    }

    pub fn get(&self, k: usize) -> GeomResult<f64> {
        self.band
            .get(k)
            .copied()
            .ok_or_else(|| GeomError::out_of_bounds("TridiagonalMatrix::get", k, self.band.len()))
    }

    pub fn set(&mut self, k: usize, value: f64) -> GeomResult<()> {
        let len = self.band.len();
        let slot = self
            .band
            .get_mut(k)
            .ok_or_else(|| GeomError::out_of_bounds("TridiagonalMatrix::set", k, len))?;
        *slot = value;
        Ok(())
    }

    /// Sets the three band entries of `row` (sub, diag, super).
    pub fn set_row(&mut self, row: usize, sub: f64, diag: f64, sup: f64) -> GeomResult<()> {
        if row >= self.size() {
            return Err(GeomError::out_of_bounds(
                "TridiagonalMatrix::set_row",
                row,
                self.size(),
            ));
        }
        self.band[3 * row] = sub;
        self.band[3 * row + 1] = diag;
        self.band[3 * row + 2] = sup;
        Ok(())
    }

    /// Sets the periodic corners: `f` at (0, n-1), `g` at (n-1, 0).
    pub fn set_corners(&mut self, f: f64, g: f64) {
        let n = self.size();
        if n == 0 {
            return;
        }
        self.band[0] = f;
        self.band[3 * n - 1] = g;
    }

    /// Dense `n × n` form; `periodic` decides whether the corners are placed.
    pub fn to_dense(&self, periodic: bool) -> Matrix {
        let n = self.size();
        let mut m = Matrix::zeros(n, n);
        let dense = m.as_mut_slice();
        for i in 0..n {
            dense[i * n + i] += self.band[3 * i + 1];
            if i > 0 {
                dense[i * n + i - 1] += self.band[3 * i];
            }
            if i + 1 < n {
                dense[i * n + i + 1] += self.band[3 * i + 2];
            }
        }
        if periodic && n > 1 {
            dense[n - 1] += self.band[0];
            dense[(n - 1) * n] += self.band[3 * n - 1];
        }
        m
    }

    /// Thomas algorithm for `A x = l`.
    pub fn syst_solve(&self, l: &[f64]) -> GeomResult<Vec<f64>> {
        self.check_len("TridiagonalMatrix::syst_solve", l.len())?;
        let mut x = l.to_vec();
        self.thomas(&mut x, 1)?;
        Ok(x)
    }

    /// Solves the periodic system (corners `f`, `g` active).
    pub fn syst_solve_period(&self, l: &[f64]) -> GeomResult<Vec<f64>> {
        self.check_len("TridiagonalMatrix::syst_solve_period", l.len())?;
        let mut x = l.to_vec();
        self.periodic(&mut x, 1)?;
        Ok(x)
    }

    /// `nb` right-hand sides at once; a length other than `nb * size` yields an empty result.
    pub fn multi_syst_solve(&self, l: &[f64], nb: usize) -> GeomResult<Vec<f64>> {
        if nb == 0 || l.len() != nb * self.size() {
            return Ok(Vec::new());
        }
        let mut x = l.to_vec();
        self.thomas(&mut x, nb)?;
        Ok(x)
    }

    /// Periodic variant of `multi_syst_solve`, same length contract.
    pub fn multi_syst_solve_period(&self, l: &[f64], nb: usize) -> GeomResult<Vec<f64>> {
        if nb == 0 || l.len() != nb * self.size() {
            return Ok(Vec::new());
        }
        let mut x = l.to_vec();
        self.periodic(&mut x, nb)?;
        Ok(x)
    }

    fn check_len(&self, caller: &'static str, len: usize) -> GeomResult<()> {
        if len != self.size() {
            return Err(GeomError::SizeMismatch {
                caller,
                expected: (self.size(), 1),
                found: (len, 1),
            });
        }
        Ok(())
    }

    /// Forward sweep on a copy of the diagonal, then back substitution, for `nb`
    /// interleaved right-hand sides stored in `x`.
    fn thomas(&self, x: &mut [f64], nb: usize) -> GeomResult<()> {
        let n = self.size();
        if n == 0 {
            return Ok(());
        }
        let a = &self.band;
        let mut d: Vec<f64> = (0..n).map(|i| a[3 * i + 1]).collect();
        for i in 1..n {
            let prev = pivot(d[i - 1], "TridiagonalMatrix::syst_solve")?;
            let coeff = a[3 * i] / prev;
            d[i] -= coeff * a[3 * (i - 1) + 2];
            for k in 0..nb {
                x[nb * i + k] -= coeff * x[nb * (i - 1) + k];
            }
        }
        let last = pivot(d[n - 1], "TridiagonalMatrix::syst_solve")?;
        for k in 0..nb {
            x[nb * (n - 1) + k] /= last;
        }
        for i in (0..n.saturating_sub(1)).rev() {
            for k in 0..nb {
                x[nb * i + k] = (x[nb * i + k] - a[3 * i + 2] * x[nb * (i + 1) + k]) / d[i];
            }
        }
        Ok(())
    }

    /// Bordered elimination: the last unknown is kept apart, `p` tracks the last column
    /// of rows `0..n-1` (fed by `f` and `c[n-2]`), `q` the last row (fed by `g` and
    /// `a[n-1]`), and `s` the bottom-right entry.
    fn periodic(&self, x: &mut [f64], nb: usize) -> GeomResult<()> {
        const CALLER: &str = "TridiagonalMatrix::syst_solve_period";
        let n = self.size();
        if n < 3 {
            return self.periodic_dense(x, nb);
        }
        let a = &self.band;
        let m = n - 1;
        let mut d: Vec<f64> = (0..m).map(|i| a[3 * i + 1]).collect();
        let mut p = vec![0.0; m];
        let mut q = vec![0.0; m];
        p[0] = a[0];
        p[m - 1] += a[3 * (m - 1) + 2];
        q[0] = a[3 * n - 1];
        q[m - 1] += a[3 * m];
        let mut s = a[3 * m + 1];

        for k in 0..m {
            let dk = pivot(d[k], CALLER)?;
            // super-diagonal inside the leading block (the one of row m-1 lives in `p`)
            let ck = if k + 1 < m { a[3 * k + 2] } else { 0.0 };
            if k + 1 < m {
                let coeff = a[3 * (k + 1)] / dk;
                d[k + 1] -= coeff * ck;
                p[k + 1] -= coeff * p[k];
                for r in 0..nb {
                    x[nb * (k + 1) + r] -= coeff * x[nb * k + r];
                }
            }
            let coeff = q[k] / dk;
            if k + 1 < m {
                q[k + 1] -= coeff * ck;
            }
            s -= coeff * p[k];
            for r in 0..nb {
                x[nb * m + r] -= coeff * x[nb * k + r];
            }
        }

        let s = pivot(s, CALLER)?;
        for r in 0..nb {
            x[nb * m + r] /= s;
        }
        for i in (0..m).rev() {
            let ci = if i + 1 < m { a[3 * i + 2] } else { 0.0 };
            for r in 0..nb {
                let next = if i + 1 < m { x[nb * (i + 1) + r] } else { 0.0 };
                x[nb * i + r] = (x[nb * i + r] - ci * next - p[i] * x[nb * m + r]) / d[i];
            }
        }
        Ok(())
    }

    /// Tiny periodic systems (n < 3) overlap their corners with the band; solve densely.
    fn periodic_dense(&self, x: &mut [f64], nb: usize) -> GeomResult<()> {
        let n = self.size();
        if n == 0 {
            return Ok(());
        }
        let dense = self.to_dense(true);
        for r in 0..nb {
            let rhs: Vec<f64> = (0..n).map(|i| x[nb * i + r]).collect();
            let sol = dense
                .solve(&Matrix::column(&rhs))
                .map_err(|_| GeomError::NotSolvable {
                    caller: "TridiagonalMatrix::syst_solve_period",
                })?;
            for (i, v) in sol.as_slice().iter().enumerate() {
                x[nb * i + r] = *v;
            }
        }
        Ok(())
    }
}

#[inline]
fn pivot(value: f64, caller: &'static str) -> GeomResult<f64> {
    if value.abs() < LITTLE_EPSILON {
        return Err(GeomError::NotSolvable { caller });
    }
    Ok(value)
}
