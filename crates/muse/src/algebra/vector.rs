//! Fixed-size vectors (2D/3D/4D) and the predicates built on them.
//!
//! - Storage is plain `nalgebra` column vectors of `f64`; a point is the same type.
//! - `VectorExt` adds the tolerance-aware comparisons and checked division used
//!   throughout the geometry modules.
//! - `Vec3Ext` adds the 3D-only helpers (collinearity, rotations, angles).

use nalgebra::{Matrix3, SVector, Vector2, Vector3, Vector4};

use crate::cfg::{EPSILON, LITTLE_EPSILON};
use crate::error::{GeomError, GeomResult};

pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec4 = Vector4<f64>;
pub type Point2 = Vec2;
pub type Point3 = Vec3;
pub type Point4 = Vec4;

/// Unit axes, handy for defaults and frames.
pub const V3_X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const V3_Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const V3_Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Tolerance-aware helpers shared by all fixed-size vectors.
pub trait VectorExt: Sized + Copy {
    /// Every component is below `eps` in magnitude.
    fn is_null(&self, eps: f64) -> bool;
    /// Every component differs from `other` by less than `eps`.
    fn is_close(&self, other: &Self, eps: f64) -> bool;
    /// Component-wise equality within `LITTLE_EPSILON`.
    #[inline]
    fn approx_eq(&self, other: &Self) -> bool {
        self.is_close(other, LITTLE_EPSILON)
    }
    /// Division by a scalar; `|s| < LITTLE_EPSILON` is a divide-by-zero.
    fn checked_div(&self, s: f64) -> GeomResult<Self>;
    /// Unit vector with the same direction.
    fn checked_normalize(&self) -> GeomResult<Self>;
    /// Every component strictly smaller than the matching one of `other`.
    fn all_lt(&self, other: &Self) -> bool;
    /// Every component strictly greater than the matching one of `other`.
    fn all_gt(&self, other: &Self) -> bool;
}

impl<const D: usize> VectorExt for SVector<f64, D> {
    #[inline]
    fn is_null(&self, eps: f64) -> bool {
        self.iter().all(|c| c.abs() < eps)
    }

    #[inline]
    fn is_close(&self, other: &Self, eps: f64) -> bool {
        self.iter().zip(other.iter()).all(|(a, b)| (a - b).abs() < eps)
    }

    #[inline]
    fn checked_div(&self, s: f64) -> GeomResult<Self> {
        if s.abs() < LITTLE_EPSILON {
            return Err(GeomError::divide_by_zero("Vector::checked_div"));
        }
        Ok(self / s)
    }

    #[inline]
    fn checked_normalize(&self) -> GeomResult<Self> {
        let len = self.norm();
        if len < LITTLE_EPSILON {
            return Err(GeomError::divide_by_zero("Vector::normalize"));
        }
        Ok(self / len)
    }

    #[inline]
    fn all_lt(&self, other: &Self) -> bool {
        self.iter().zip(other.iter()).all(|(a, b)| a < b)
    }

    #[inline]
    fn all_gt(&self, other: &Self) -> bool {
        self.iter().zip(other.iter()).all(|(a, b)| a > b)
    }
}

/// 3D-only helpers.
pub trait Vec3Ext {
    /// Parallel (or either vector null) within `eps`.
    fn is_collinear(&self, other: &Vec3, eps: f64) -> bool;
    /// Rotation by Euler angles, applied as `Rz * Ry * Rx * v`.
    fn rotate_euler(&self, x_angle: f64, y_angle: f64, z_angle: f64) -> Vec3;
    /// Rotation by `angle` radians about a unit `axis`.
    fn rotate_about(&self, axis: &Vec3, angle: f64) -> Vec3;
    /// Unsigned angle in `[0, π]` between two non-null vectors.
    fn angle_to(&self, other: &Vec3) -> GeomResult<f64>;
    /// The canonical axis with the largest absolute component (ties favour X, then Y).
    fn main_axis(&self) -> Vec3;
}

impl Vec3Ext for Vec3 {
    fn is_collinear(&self, other: &Vec3, eps: f64) -> bool {
        self.is_null(eps)
            || other.is_null(eps)
            || self.is_close(other, eps)
            || self.cross(other).is_null(eps)
    }

    fn rotate_euler(&self, x_angle: f64, y_angle: f64, z_angle: f64) -> Vec3 {
        euler_rotation(x_angle, y_angle, z_angle) * self
    }

    fn rotate_about(&self, axis: &Vec3, angle: f64) -> Vec3 {
        super::fixed::rotation3(angle, axis) * self
    }

    fn angle_to(&self, other: &Vec3) -> GeomResult<f64> {
        let n1 = self.norm();
        let n2 = other.norm();
        if n1 == 0.0 || n2 == 0.0 {
            return Err(GeomError::divide_by_zero("Vector3::angle_to"));
        }
        let cos = (self.dot(other) / (n1 * n2)).clamp(-1.0, 1.0);
        Ok(cos.acos())
    }

    fn main_axis(&self) -> Vec3 {
        let (ax, ay, az) = (self.x.abs(), self.y.abs(), self.z.abs());
        if ax >= ay && ax >= az {
            V3_X
        } else if ay >= ax && ay >= az {
            V3_Y
        } else {
            V3_Z
        }
    }
}

/// `Rz(z) * Ry(y) * Rx(x)`.
pub fn euler_rotation(x_angle: f64, y_angle: f64, z_angle: f64) -> Matrix3<f64> {
    let (sx, cx) = x_angle.sin_cos();
    let (sy, cy) = y_angle.sin_cos();
    let (sz, cz) = z_angle.sin_cos();
    let rx = Matrix3::new(1.0, 0.0, 0.0, 0.0, cx, -sx, 0.0, sx, cx);
    let ry = Matrix3::new(cy, 0.0, sy, 0.0, 1.0, 0.0, -sy, 0.0, cy);
    let rz = Matrix3::new(cz, -sz, 0.0, sz, cz, 0.0, 0.0, 0.0, 1.0);
    rz * ry * rx
}

/// Closeness with the default `EPSILON`.
#[inline]
pub fn close<const D: usize>(a: &SVector<f64, D>, b: &SVector<f64, D>) -> bool {
    a.is_close(b, EPSILON)
}

/// Homogeneous point `(p, 1)`.
#[inline]
pub fn homogeneous(p: &Point3) -> Point4 {
    Vec4::new(p.x, p.y, p.z, 1.0)
}
