//! Affine coordinate frames (origin + three independent axes).
//!
//! Purpose
//! - Convert points, homogeneous vectors and whole frames between a frame and the
//!   absolute frame, or between two frames, through 4×4 homogeneous matrices.
//!
//! Conventions
//! - `matrix()` puts the axes in columns 0..3 and the origin in the translation column.
//! - "to" maps coordinates expressed in `self` into another frame; "from" is the mirror.
//! - Axis setters validate before writing, so a rejected axis leaves the frame unchanged.

use std::fmt;

use crate::algebra::fixed::{Mat3, Mat4, SquareExt};
use crate::algebra::vector::{homogeneous, Point3, Vec3, Vec4, VectorExt, V3_X, V3_Y, V3_Z};
use crate::cfg::{EPSILON, LITTLE_EPSILON};
use crate::error::{GeomError, GeomResult};

#[derive(Clone, Copy, Debug)]
pub struct Trihedron {
    o: Point3,
    x: Vec3,
    y: Vec3,
    z: Vec3,
}

impl Default for Trihedron {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn axes_independent(x: &Vec3, y: &Vec3, z: &Vec3) -> bool {
    Mat3::from_columns(&[*x, *y, *z]).det() != 0.0
}

impl Trihedron {
    /// Origin at 0 with the canonical axes.
    pub const IDENTITY: Trihedron = Trihedron {
        o: Vec3::new(0.0, 0.0, 0.0),
        x: V3_X,
        y: V3_Y,
        z: V3_Z,
    };

    /// Canonical axes placed at `o`.
    pub fn at_origin(o: Point3) -> Self {
        Self { o, ..Self::IDENTITY }
    }

    pub fn new(o: Point3, x: Vec3, y: Vec3, z: Vec3) -> GeomResult<Self> {
        if !axes_independent(&x, &y, &z) {
            return Err(GeomError::divide_by_zero("Trihedron::new"));
        }
        Ok(Self { o, x, y, z })
    }

    /// Frame of a homogeneous matrix; the bottom row must be `(0, 0, 0, 1)`.
    pub fn from_matrix(m: &Mat4) -> GeomResult<Self> {
        let bottom_ok = m[(3, 0)].abs() < EPSILON
            && m[(3, 1)].abs() < EPSILON
            && m[(3, 2)].abs() < EPSILON
            && (m[(3, 3)] - 1.0).abs() < EPSILON;
        if !bottom_ok {
            return Err(GeomError::invalid(
                "Trihedron::from_matrix",
                "matrix is not homogeneous",
            ));
        }
        if m.det().abs() < LITTLE_EPSILON {
            return Err(GeomError::divide_by_zero("Trihedron::from_matrix"));
        }
        let col = |c: usize| Vec3::new(m[(0, c)], m[(1, c)], m[(2, c)]);
        Ok(Self {
            x: col(0),
            y: col(1),
            z: col(2),
            o: col(3),
        })
    }

    /// Affine frame mapping `o1 → o2`, `a1 → a2`, `b1 → b2`.
    ///
    /// The third basis direction of each triple is the unit normal of its plane, so the
    /// map is rigid when both triples are congruent.
    pub fn transition(
        o1: &Point3,
        a1: &Point3,
        b1: &Point3,
        o2: &Point3,
        a2: &Point3,
        b2: &Point3,
    ) -> GeomResult<Self> {
        let (u1, v1) = (a1 - o1, b1 - o1);
        let (u2, v2) = (a2 - o2, b2 - o2);
        let n1 = u1.cross(&v1).checked_normalize()?;
        let n2 = u2.cross(&v2).checked_normalize()?;
        let src = Mat3::from_columns(&[u1, v1, n1]);
        let dst = Mat3::from_columns(&[u2, v2, n2]);
        let r = dst * src.checked_inverse()?;
        let t = o2 - r * o1;
        Self::new(
            t,
            r.column(0).into_owned(),
            r.column(1).into_owned(),
            r.column(2).into_owned(),
        )
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.o
    }
    #[inline]
    pub fn x_axis(&self) -> Vec3 {
        self.x
    }
    #[inline]
    pub fn y_axis(&self) -> Vec3 {
        self.y
    }
    #[inline]
    pub fn z_axis(&self) -> Vec3 {
        self.z
    }

    #[inline]
    pub fn set_origin(&mut self, o: Point3) {
        self.o = o;
    }

    pub fn set_x(&mut self, x: Vec3) -> GeomResult<()> {
        if !axes_independent(&x, &self.y, &self.z) {
            return Err(GeomError::divide_by_zero("Trihedron::set_x"));
        }
        self.x = x;
        Ok(())
    }

    pub fn set_y(&mut self, y: Vec3) -> GeomResult<()> {
        if !axes_independent(&self.x, &y, &self.z) {
            return Err(GeomError::divide_by_zero("Trihedron::set_y"));
        }
        self.y = y;
        Ok(())
    }

    pub fn set_z(&mut self, z: Vec3) -> GeomResult<()> {
        if !axes_independent(&self.x, &self.y, &z) {
            return Err(GeomError::divide_by_zero("Trihedron::set_z"));
        }
        self.z = z;
        Ok(())
    }

    /// Scales every axis to unit length; all-or-nothing.
    pub fn normalise(&mut self) -> GeomResult<()> {
        let x = self.x.checked_normalize()?;
        let y = self.y.checked_normalize()?;
        let z = self.z.checked_normalize()?;
        self.x = x;
        self.y = y;
        self.z = z;
        Ok(())
    }

    pub fn normalised(&self) -> GeomResult<Self> {
        let mut t = *self;
        t.normalise()?;
        Ok(t)
    }

    pub fn is_close(&self, other: &Trihedron, eps: f64) -> bool {
        self.x.is_close(&other.x, eps)
            && self.y.is_close(&other.y, eps)
            && self.z.is_close(&other.z, eps)
            && self.o.is_close(&other.o, eps)
    }

    /// Homogeneous matrix taking coordinates in this frame to absolute coordinates.
    pub fn matrix(&self) -> Mat4 {
        let (o, x, y, z) = (&self.o, &self.x, &self.y, &self.z);
        Mat4::new(
            x.x, y.x, z.x, o.x, //
            x.y, y.y, z.y, o.y, //
            x.z, y.z, z.z, o.z, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Point given in this frame, expressed in `target`.
    pub fn xform_to(&self, target: &Trihedron, p_in_me: &Point3) -> GeomResult<Point3> {
        Ok(self.xform_to_h(target, &homogeneous(p_in_me))?.xyz())
    }

    /// Homogeneous vector given in this frame, expressed in `target` (w = 0 for directions).
    pub fn xform_to_h(&self, target: &Trihedron, p_in_me: &Vec4) -> GeomResult<Vec4> {
        let abs_to_target = target.matrix().checked_inverse()?;
        Ok(abs_to_target * (self.matrix() * p_in_me))
    }

    /// Absolute homogeneous vector expressed in this frame.
    pub fn from_absolute(&self, p_abs: &Vec4) -> GeomResult<Vec4> {
        Ok(self.matrix().checked_inverse()? * p_abs)
    }

    /// Frame given in absolute coordinates, re-expressed relative to this frame.
    pub fn frame_to(&self, t_abs: &Trihedron) -> GeomResult<Trihedron> {
        let abs_to_me = self.matrix().checked_inverse()?;
        Trihedron::from_matrix(&(abs_to_me * t_abs.matrix()))
    }

    /// Point given in `source`, expressed in this frame.
    pub fn xform_from(&self, source: &Trihedron, p_in_source: &Point3) -> GeomResult<Point3> {
        Ok(self.xform_from_h(source, &homogeneous(p_in_source))?.xyz())
    }

    /// Homogeneous vector given in `source`, expressed in this frame.
    pub fn xform_from_h(&self, source: &Trihedron, p_in_source: &Vec4) -> GeomResult<Vec4> {
        let abs_to_me = self.matrix().checked_inverse()?;
        Ok(abs_to_me * (source.matrix() * p_in_source))
    }

    /// Homogeneous vector given in this frame, expressed in absolute coordinates.
    pub fn to_absolute(&self, p_in_me: &Vec4) -> Vec4 {
        self.matrix() * p_in_me
    }

    /// Frame given relative to this frame, expressed in absolute coordinates.
    pub fn frame_from(&self, t_in_me: &Trihedron) -> GeomResult<Trihedron> {
        Trihedron::from_matrix(&(self.matrix() * t_in_me.matrix()))
    }
}

impl PartialEq for Trihedron {
    fn eq(&self, other: &Self) -> bool {
        self.x.approx_eq(&other.x)
            && self.y.approx_eq(&other.y)
            && self.z.approx_eq(&other.z)
            && self.o.approx_eq(&other.o)
    }
}

impl fmt::Display for Trihedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = |v: &Vec3| format!("{} {} {}", v.x, v.y, v.z);
        write!(
            f,
            "Origin: {} ,X {} ,Y {} ,Z {}",
            v(&self.o),
            v(&self.x),
            v(&self.y),
            v(&self.z)
        )
    }
}
