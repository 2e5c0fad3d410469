//! Linear algebra building blocks.
//!
//! Purpose
//! - Fixed-size vectors and matrices (2D/3D/4D, stack only) with tolerance-aware
//!   predicates and checked division/inversion.
//! - A general heap-backed `Matrix` (owned or borrowed storage) with pivoting solvers.
//! - A tridiagonal solver (Thomas algorithm, plain and periodic).
//!
//! Code cross-refs: `VectorExt`, `SquareExt`, `Matrix`, `TridiagonalMatrix`

pub mod fixed;
pub mod matrix;
mod reduce;
pub mod tridiagonal;
pub mod vector;

pub(crate) use reduce::{max_of, min_of};

pub use fixed::{Mat2, Mat3, Mat4, SquareExt};
pub use matrix::{Matrix, MatrixView, MatrixViewMut, Xform2DParams};
pub use tridiagonal::TridiagonalMatrix;
pub use vector::{Point2, Point3, Point4, Vec2, Vec3, Vec3Ext, Vec4, VectorExt};
