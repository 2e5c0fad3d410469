//! Fixed-size square matrices (2×2, 3×3, 4×4) on the stack.
//!
//! Inversion uses the closed-form adjugate formulas (no pivoting) and reports a
//! divide-by-zero when `|det| < LITTLE_EPSILON`. Builders for rotations and homogeneous
//! translations live here as free functions.

use nalgebra::{Matrix2, Matrix3, Matrix4};

use super::vector::Vec3;
use crate::cfg::LITTLE_EPSILON;
use crate::error::{GeomError, GeomResult};

pub type Mat2 = Matrix2<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat4 = Matrix4<f64>;

/// Closed-form determinant, checked inverse and checked scalar division.
pub trait SquareExt: Sized {
    fn det(&self) -> f64;
    fn checked_inverse(&self) -> GeomResult<Self>;
    fn checked_div(&self, s: f64) -> GeomResult<Self>;
}

#[inline]
fn guard_det(det: f64, caller: &'static str) -> GeomResult<()> {
    if det.abs() < LITTLE_EPSILON {
        return Err(GeomError::divide_by_zero(caller));
    }
    Ok(())
}

#[inline]
pub(crate) fn guard_scalar(s: f64, caller: &'static str) -> GeomResult<()> {
    if s.abs() < LITTLE_EPSILON {
        return Err(GeomError::divide_by_zero(caller));
    }
    Ok(())
}

impl SquareExt for Mat2 {
    #[inline]
    fn det(&self) -> f64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }

    fn checked_inverse(&self) -> GeomResult<Self> {
        let det = self.det();
        guard_det(det, "Matrix2::inverse")?;
        let m = self;
        Ok(Mat2::new(m[(1, 1)], -m[(0, 1)], -m[(1, 0)], m[(0, 0)]) / det)
    }

    fn checked_div(&self, s: f64) -> GeomResult<Self> {
        guard_scalar(s, "Matrix2::checked_div")?;
        Ok(self / s)
    }
}

impl SquareExt for Mat3 {
    fn det(&self) -> f64 {
        let m = self;
        m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
            + m[(0, 1)] * (m[(1, 2)] * m[(2, 0)] - m[(1, 0)] * m[(2, 2)])
            + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
    }

    fn checked_inverse(&self) -> GeomResult<Self> {
        let det = self.det();
        guard_det(det, "Matrix3::inverse")?;
        let m = self;
        let adj = Mat3::new(
            m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)],
            m[(2, 1)] * m[(0, 2)] - m[(2, 2)] * m[(0, 1)],
            m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)],
            m[(1, 2)] * m[(2, 0)] - m[(1, 0)] * m[(2, 2)],
            m[(2, 2)] * m[(0, 0)] - m[(2, 0)] * m[(0, 2)],
            m[(0, 2)] * m[(1, 0)] - m[(0, 0)] * m[(1, 2)],
            m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)],
            m[(2, 0)] * m[(0, 1)] - m[(2, 1)] * m[(0, 0)],
            m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        );
        Ok(adj / det)
    }

    fn checked_div(&self, s: f64) -> GeomResult<Self> {
        guard_scalar(s, "Matrix3::checked_div")?;
        Ok(self / s)
    }
}

/// 2×2 minors of the top (`a`) and bottom (`b`) row pairs of a 4×4 matrix.
struct Minors4 {
    a: [f64; 6],
    b: [f64; 6],
}

impl Minors4 {
    fn of(m: &Mat4) -> Self {
        let pair = |r0: usize, r1: usize, c0: usize, c1: usize| {
            m[(r0, c0)] * m[(r1, c1)] - m[(r0, c1)] * m[(r1, c0)]
        };
        Self {
            a: [
                pair(0, 1, 0, 1),
                pair(0, 1, 0, 2),
                pair(0, 1, 0, 3),
                pair(0, 1, 1, 2),
                pair(0, 1, 1, 3),
                pair(0, 1, 2, 3),
            ],
            b: [
                pair(2, 3, 0, 1),
                pair(2, 3, 0, 2),
                pair(2, 3, 0, 3),
                pair(2, 3, 1, 2),
                pair(2, 3, 1, 3),
                pair(2, 3, 2, 3),
            ],
        }
    }

    #[inline]
    fn det(&self) -> f64 {
        let (a, b) = (&self.a, &self.b);
        a[0] * b[5] - a[1] * b[4] + a[2] * b[3] + a[3] * b[2] - a[4] * b[1] + a[5] * b[0]
    }
}

impl SquareExt for Mat4 {
    #[inline]
    fn det(&self) -> f64 {
        Minors4::of(self).det()
    }

    fn checked_inverse(&self) -> GeomResult<Self> {
        let minors = Minors4::of(self);
        let det = minors.det();
        guard_det(det, "Matrix4::inverse")?;
        let (a, b) = (&minors.a, &minors.b);
        let m = self;
        let adj = Mat4::new(
            m[(1, 1)] * b[5] - m[(1, 2)] * b[4] + m[(1, 3)] * b[3],
            -m[(0, 1)] * b[5] + m[(0, 2)] * b[4] - m[(0, 3)] * b[3],
            m[(3, 1)] * a[5] - m[(3, 2)] * a[4] + m[(3, 3)] * a[3],
            -m[(2, 1)] * a[5] + m[(2, 2)] * a[4] - m[(2, 3)] * a[3],
            -m[(1, 0)] * b[5] + m[(1, 2)] * b[2] - m[(1, 3)] * b[1],
            m[(0, 0)] * b[5] - m[(0, 2)] * b[2] + m[(0, 3)] * b[1],
            -m[(3, 0)] * a[5] + m[(3, 2)] * a[2] - m[(3, 3)] * a[1],
            m[(2, 0)] * a[5] - m[(2, 2)] * a[2] + m[(2, 3)] * a[1],
            m[(1, 0)] * b[4] - m[(1, 1)] * b[2] + m[(1, 3)] * b[0],
            -m[(0, 0)] * b[4] + m[(0, 1)] * b[2] - m[(0, 3)] * b[0],
            m[(3, 0)] * a[4] - m[(3, 1)] * a[2] + m[(3, 3)] * a[0],
            -m[(2, 0)] * a[4] + m[(2, 1)] * a[2] - m[(2, 3)] * a[0],
            -m[(1, 0)] * b[3] + m[(1, 1)] * b[1] - m[(1, 2)] * b[0],
            m[(0, 0)] * b[3] - m[(0, 1)] * b[1] + m[(0, 2)] * b[0],
            -m[(3, 0)] * a[3] + m[(3, 1)] * a[1] - m[(3, 2)] * a[0],
            m[(2, 0)] * a[3] - m[(2, 1)] * a[1] + m[(2, 2)] * a[0],
        );
        Ok(adj / det)
    }

    fn checked_div(&self, s: f64) -> GeomResult<Self> {
        guard_scalar(s, "Matrix4::checked_div")?;
        Ok(self / s)
    }
}

/// Rotation by `angle` radians about `axis` (Rodrigues; `axis` expected unit length).
pub fn rotation3(angle: f64, axis: &Vec3) -> Mat3 {
    let (x, y, z) = (axis.x, axis.y, axis.z);
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    Mat3::new(
        c + x * x * t,
        x * y * t - z * s,
        x * z * t + y * s,
        y * x * t + z * s,
        c + y * y * t,
        y * z * t - x * s,
        z * x * t - y * s,
        z * y * t + x * s,
        c + z * z * t,
    )
}

/// Homogeneous rotation about an axis through the origin.
pub fn rotation4(angle: f64, axis: &Vec3) -> Mat4 {
    rotation3(angle, axis).to_homogeneous()
}

/// Homogeneous translation by `v`.
pub fn translation4(v: &Vec3) -> Mat4 {
    Mat4::new_translation(v)
}

/// Rotation about X by `angle` radians, in the `(1, 0, 0; 0, c, s; 0, -s, c)` convention.
///
/// The sign convention is the passive (frame) rotation used by the device model.
pub fn frame_rotation_x(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Rotation about Y by `angle` radians, `(c, 0, s; 0, 1, 0; -s, 0, c)`.
pub fn frame_rotation_y(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
}
