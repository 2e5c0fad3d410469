//! General `cols × rows` matrix over a row-major buffer.
//!
//! Purpose
//! - Variable-size linear algebra: transpose, product, Gauss-Jordan inversion and
//!   Gaussian-elimination solve, both with partial pivoting.
//! - Ownership is carried by the storage type: `Matrix` owns a `Vec<f64>`,
//!   `MatrixView` borrows a foreign slice. Cloning an owned matrix copies the buffer,
//!   cloning a view aliases the same memory.
//!
//! Indexing follows the image convention: `(x, y)` is (column, row), flat index
//! `y * cols + x`.

use super::fixed::guard_scalar;
use crate::error::{GeomError, GeomResult};

/// Heap-backed matrix; `S` is the storage (`Vec<f64>` or a borrowed slice).
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<S = Vec<f64>> {
    cols: usize,
    rows: usize,
    data: S,
}

/// Read-only matrix over memory owned elsewhere.
pub type MatrixView<'a> = Matrix<&'a [f64]>;
/// Mutable matrix over memory owned elsewhere.
pub type MatrixViewMut<'a> = Matrix<&'a mut [f64]>;

/// Parameters of a 2D affine transform, selected by bit flags.
///
/// Slots: `[tx, ty, angle, scale_x, scale_y, shear]`; scales are stored as offsets from 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Xform2DParams {
    pub p: [f64; 6],
    pub flags: u8,
}

impl Xform2DParams {
    pub const TRANS: u8 = 1;
    pub const ROTATE: u8 = 2;
    pub const SCALE: u8 = 4;
    pub const SHEAR: u8 = 8;
    pub const ALL: u8 = 15;

    pub fn new(flags: u8) -> Self {
        Self { p: [0.0; 6], flags }
    }

    /// Number of free parameters enabled by `flags`.
    pub fn nr_params(&self) -> usize {
        let mut n = 0;
        if self.flags & Self::TRANS != 0 {
            n += 2;
        }
        if self.flags & Self::ROTATE != 0 {
            n += 1;
        }
        if self.flags & Self::SCALE != 0 {
            n += 2;
        }
        if self.flags & Self::SHEAR != 0 {
            n += 1;
        }
        n
    }
}

impl Default for Xform2DParams {
    fn default() -> Self {
        Self::new(Self::ALL)
    }
}

impl Matrix<Vec<f64>> {
    /// `cols × rows` matrix with ones on the main diagonal and zeros elsewhere.
    pub fn new(cols: usize, rows: usize) -> Self {
        let mut data = vec![0.0; cols * rows];
        for i in 0..cols.min(rows) {
            data[i * cols + i] = 1.0;
        }
        Self { cols, rows, data }
    }

    pub fn identity(dim: usize) -> Self {
        Self::new(dim, dim)
    }

    pub fn zeros(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            data: vec![0.0; cols * rows],
        }
    }

    /// Single-column matrix holding `values`.
    pub fn column(values: &[f64]) -> Self {
        Self {
            cols: 1,
            rows: values.len(),
            data: values.to_vec(),
        }
    }

    /// 3×3 homogeneous 2D transform composed as `T · R · S · Sh` for the enabled parts.
    pub fn from_xform2d(params: &Xform2DParams) -> Self {
        let p = &params.p;
        let mut m = Self::identity(3);
        let mut compose = |rows: [f64; 9]| {
            let step = Matrix {
                cols: 3,
                rows: 3,
                data: rows.to_vec(),
            };
            m = m.product_unchecked(&step);
        };
        if params.flags & Xform2DParams::TRANS != 0 {
            compose([1.0, 0.0, p[0], 0.0, 1.0, p[1], 0.0, 0.0, 1.0]);
        }
        if params.flags & Xform2DParams::ROTATE != 0 {
            let (s, c) = p[2].sin_cos();
            compose([c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0]);
        }
        if params.flags & Xform2DParams::SCALE != 0 {
            compose([1.0 + p[3], 0.0, 0.0, 0.0, 1.0 + p[4], 0.0, 0.0, 0.0, 1.0]);
        }
        if params.flags & Xform2DParams::SHEAR != 0 {
            compose([1.0, p[5], 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        }
        m
    }

    /// In-place product `self = self · rhs`; the shape may change.
    pub fn mul_assign(&mut self, rhs: &Matrix<impl AsRef<[f64]>>) -> GeomResult<()> {
        *self = self.mul(rhs)?;
        Ok(())
    }
}

impl<S: AsRef<[f64]>> Matrix<S> {
    /// Wraps an existing row-major buffer; its length must be `cols * rows`.
    pub fn from_buffer(cols: usize, rows: usize, data: S) -> GeomResult<Self> {
        let len = data.as_ref().len();
        if len != cols * rows {
            return Err(GeomError::SizeMismatch {
                caller: "Matrix::from_buffer",
                expected: (cols, rows),
                found: (len, 1),
            });
        }
        Ok(Self { cols, rows, data })
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.cols == self.rows
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_ref()
    }

    /// Borrowed view over the same buffer.
    pub fn view(&self) -> MatrixView<'_> {
        Matrix {
            cols: self.cols,
            rows: self.rows,
            data: self.data.as_ref(),
        }
    }

    /// Owned deep copy (whatever the storage).
    pub fn to_owned_matrix(&self) -> Matrix {
        Matrix {
            cols: self.cols,
            rows: self.rows,
            data: self.data.as_ref().to_vec(),
        }
    }

    /// Element at flat index `k`.
    pub fn get(&self, k: usize) -> GeomResult<f64> {
        self.as_slice()
            .get(k)
            .copied()
            .ok_or_else(|| self.out_of_bounds("Matrix::get", k))
    }

    /// Element at column `x`, row `y`.
    pub fn at(&self, x: usize, y: usize) -> GeomResult<f64> {
        if x >= self.cols || y >= self.rows {
            return Err(self.out_of_bounds("Matrix::at", x + y * self.cols));
        }
        Ok(self.as_slice()[y * self.cols + x])
    }

    fn out_of_bounds(&self, caller: &'static str, index: usize) -> GeomError {
        GeomError::PixelOutOfBounds {
            caller,
            index,
            width: self.cols,
            height: self.rows,
        }
    }

    pub fn transpose(&self) -> Matrix {
        let src = self.as_slice();
        let mut data = vec![0.0; src.len()];
        for y in 0..self.rows {
            for x in 0..self.cols {
                data[x * self.rows + y] = src[y * self.cols + x];
            }
        }
        Matrix {
            cols: self.rows,
            rows: self.cols,
            data,
        }
    }

    /// Matrix product `self · rhs` (`self.cols` must equal `rhs.rows`).
    pub fn mul(&self, rhs: &Matrix<impl AsRef<[f64]>>) -> GeomResult<Matrix> {
        if self.cols != rhs.rows {
            return Err(GeomError::SizeMismatch {
                caller: "Matrix::mul",
                expected: (rhs.cols, self.cols),
                found: (rhs.cols, rhs.rows),
            });
        }
        Ok(self.product_unchecked(rhs))
    }

    fn product_unchecked(&self, rhs: &Matrix<impl AsRef<[f64]>>) -> Matrix {
        let (a, b) = (self.as_slice(), rhs.as_slice());
        let mut out = Matrix::zeros(rhs.cols, self.rows);
        for y in 0..self.rows {
            for x in 0..rhs.cols {
                let mut acc = 0.0;
                for k in 0..self.cols {
                    acc += a[y * self.cols + k] * b[k * rhs.cols + x];
                }
                out.data[y * rhs.cols + x] = acc;
            }
        }
        out
    }

    /// Gauss-Jordan inversion with partial pivoting.
    pub fn inverse(&self) -> GeomResult<Matrix> {
        if !self.is_square() {
            return Err(GeomError::SizeMismatch {
                caller: "Matrix::inverse",
                expected: (self.rows, self.rows),
                found: (self.cols, self.rows),
            });
        }
        let n = self.cols;
        let mut mat = self.as_slice().to_vec();
        let mut res = Matrix::identity(n);
        for j0 in 0..n {
            let pindex = pivot_row(&mat, n, j0);
            let pivot = mat[pindex * n + j0];
            if pivot == 0.0 {
                return Err(GeomError::NotInvertible {
                    caller: "Matrix::inverse",
                });
            }
            if pindex != j0 {
                swap_rows(&mut mat, n, j0, pindex);
                swap_rows(&mut res.data, n, j0, pindex);
            }
            for i in 0..n {
                mat[j0 * n + i] /= pivot;
                res.data[j0 * n + i] /= pivot;
            }
            for j in 0..n {
                if j == j0 {
                    continue;
                }
                let k = mat[j * n + j0];
                if k == 0.0 {
                    continue;
                }
                for i in 0..n {
                    mat[j * n + i] -= k * mat[j0 * n + i];
                    res.data[j * n + i] -= k * res.data[j0 * n + i];
                }
            }
        }
        Ok(res)
    }

    /// Solves `self · x = b` for a single-column `b` by Gaussian elimination.
    pub fn solve(&self, b: &Matrix<impl AsRef<[f64]>>) -> GeomResult<Matrix> {
        if !self.is_square() || b.cols != 1 || b.rows != self.rows {
            return Err(GeomError::SizeMismatch {
                caller: "Matrix::solve",
                expected: (1, self.rows),
                found: (b.cols, b.rows),
            });
        }
        let n = self.rows;
        let mut mat = self.as_slice().to_vec();
        let mut vec = b.as_slice().to_vec();
        for j0 in 0..n {
            let pindex = pivot_row(&mat, n, j0);
            let pivot = mat[pindex * n + j0];
            if pivot == 0.0 {
                return Err(GeomError::NotSolvable {
                    caller: "Matrix::solve",
                });
            }
            if pindex != j0 {
                swap_rows(&mut mat, n, j0, pindex);
                vec.swap(j0, pindex);
            }
            for j in j0 + 1..n {
                let k = mat[j * n + j0] / pivot;
                if k == 0.0 {
                    continue;
                }
                for i in j0..n {
                    mat[j * n + i] -= k * mat[j0 * n + i];
                }
                vec[j] -= k * vec[j0];
            }
        }
        for j in (0..n).rev() {
            let mut acc = vec[j];
            for i in j + 1..n {
                acc -= mat[j * n + i] * vec[i];
            }
            vec[j] = acc / mat[j * n + j];
        }
        Ok(Matrix::column(&vec))
    }

    /// Element-wise division by `s`; `DivideByZero` when `|s|` is below `LITTLE_EPSILON`.
    pub fn checked_div(&self, s: f64) -> GeomResult<Matrix> {
        guard_scalar(s, "Matrix::checked_div")?;
        let mut out = self.to_owned_matrix();
        for v in out.data.iter_mut() {
            *v /= s;
        }
        Ok(out)
    }

    /// Smallest element; an empty matrix has none.
    pub fn min(&self) -> GeomResult<f64> {
        super::reduce::min_of(self.as_slice())
            .ok_or_else(|| self.out_of_bounds("Matrix::min", 0))
    }

    /// Largest element; an empty matrix has none.
    pub fn max(&self) -> GeomResult<f64> {
        super::reduce::max_of(self.as_slice())
            .ok_or_else(|| self.out_of_bounds("Matrix::max", 0))
    }

    /// Element-wise closeness.
    pub fn is_close(&self, other: &Matrix<impl AsRef<[f64]>>, eps: f64) -> bool {
        self.cols == other.cols
            && self.rows == other.rows
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(|(a, b)| (a - b).abs() < eps)
    }
}

impl<S: AsRef<[f64]> + AsMut<[f64]>> Matrix<S> {
    pub fn set(&mut self, k: usize, value: f64) -> GeomResult<()> {
        let err = self.out_of_bounds("Matrix::set", k);
        let slot = self.data.as_mut().get_mut(k).ok_or(err)?;
        *slot = value;
        Ok(())
    }

    pub fn set_at(&mut self, x: usize, y: usize, value: f64) -> GeomResult<()> {
        if x >= self.cols || y >= self.rows {
            return Err(self.out_of_bounds("Matrix::set_at", x + y * self.cols));
        }
        let cols = self.cols;
        self.data.as_mut()[y * cols + x] = value;
        Ok(())
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.data.as_mut()
    }

    /// Sets every element to zero.
    pub fn nullify(&mut self) -> &mut Self {
        self.data.as_mut().fill(0.0);
        self
    }

    /// Element-wise `self += rhs`.
    pub fn add_assign(&mut self, rhs: &Matrix<impl AsRef<[f64]>>) -> GeomResult<()> {
        if self.cols != rhs.cols || self.rows != rhs.rows {
            return Err(GeomError::SizeMismatch {
                caller: "Matrix::add_assign",
                expected: (self.cols, self.rows),
                found: (rhs.cols, rhs.rows),
            });
        }
        for (a, b) in self.data.as_mut().iter_mut().zip(rhs.as_slice()) {
            *a += b;
        }
        Ok(())
    }
}

/// Row in `j0..n` holding the largest `|m[j][j0]|`; the first one wins ties.
fn pivot_row(mat: &[f64], n: usize, j0: usize) -> usize {
    let mut pindex = j0;
    let mut best = mat[j0 * n + j0].abs();
    for j in j0 + 1..n {
        let c = mat[j * n + j0].abs();
        if c > best {
            best = c;
            pindex = j;
        }
    }
    pindex
}

fn swap_rows(data: &mut [f64], n: usize, a: usize, b: usize) {
    for i in 0..n {
        data.swap(a * n + i, b * n + i);
    }
}
