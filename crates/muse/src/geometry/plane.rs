//! Planes in implicit form `a x + b y + c z + d = 0`.
//!
//! Invariant: `(a, b, c)` has unit length and its first non-zero component is
//! positive, so two planes are the same set iff their coefficients agree.

use std::fmt;

use super::bbox::BoundingBox;
use super::line::Line;
use super::segment::Segment;
use crate::algebra::fixed::{Mat2, SquareExt};
use crate::algebra::vector::{Point3, Vec2, Vec3, VectorExt};
use crate::cfg::EPSILON;
use crate::error::GeomResult;

#[derive(Clone, Copy, Debug)]
pub struct Plane {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Plane {
    /// Plane through `p` with the given normal (any length > 0, either orientation).
    pub fn new(normal: &Vec3, p: &Point3) -> GeomResult<Self> {
        let n = normal.checked_normalize()?;
        let (mut a, mut b, mut c) = (n.x, n.y, n.z);
        let flip = if a.abs() < EPSILON {
            if b.abs() < EPSILON {
                c < 0.0
            } else {
                b < 0.0
            }
        } else {
            a < 0.0
        };
        if flip {
            a = -a;
            b = -b;
            c = -c;
        }
        let d = -(a * p.x + b * p.y + c * p.z);
        Ok(Self { a, b, c, d })
    }

    /// Plane through `p` spanned by `v1` and `v2`.
    pub fn from_vectors(v1: &Vec3, v2: &Vec3, p: &Point3) -> GeomResult<Self> {
        Self::new(&v1.cross(v2), p)
    }

    /// Plane through three non-collinear points.
    pub fn through(p: &Point3, q: &Point3, r: &Point3) -> GeomResult<Self> {
        Self::from_vectors(&(q - p), &(r - p), p)
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::new(self.a, self.b, self.c)
    }

    /// The `d` of `a x + b y + c z + d = 0`.
    #[inline]
    pub fn affine_component(&self) -> f64 {
        self.d
    }

    #[inline]
    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Plane function at `p` (signed distance, positive on the normal side).
    #[inline]
    pub fn apply(&self, p: &Point3) -> f64 {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }

    #[inline]
    pub fn distance_signed(&self, p: &Point3) -> f64 {
        self.apply(p)
    }

    #[inline]
    pub fn distance(&self, p: &Point3) -> f64 {
        self.apply(p).abs()
    }

    #[inline]
    pub fn includes(&self, p: &Point3, eps: f64) -> bool {
        self.distance(p) < eps
    }

    /// Same normal (the planes may still differ by `d`).
    pub fn is_parallel(&self, other: &Plane) -> bool {
        (self.a - other.a).abs() < EPSILON
            && (self.b - other.b).abs() < EPSILON
            && (self.c - other.c).abs() < EPSILON
    }

    /// `v` is parallel to the plane.
    pub fn is_parallel_to(&self, v: &Vec3) -> bool {
        v.dot(&self.normal()).abs() < EPSILON
    }

    /// Orthogonal projection of `p`.
    pub fn projection(&self, p: &Point3) -> Point3 {
        p - self.apply(p) * self.normal()
    }

    /// Projection of `p` along direction `v`; fails when `v` is parallel to the plane.
    pub fn projection_along(&self, p: &Point3, v: &Vec3) -> GeomResult<Point3> {
        let s = Segment::new(*p, p + v);
        Ok(s.at(s.plane_index(self)?))
    }

    /// Crossing point with a line; `None` when the line is parallel or included.
    pub fn line_intersection(&self, line: &Line) -> Option<Point3> {
        let denominator = self.normal().dot(&line.direction());
        if denominator.abs() < EPSILON {
            return None;
        }
        let lambda = -self.apply(&line.origin()) / denominator;
        Some(line.at(lambda))
    }

    /// Intersection line of two planes; `None` for parallel planes.
    ///
    /// The returned origin has one coordinate set to zero (x first, then y, then z),
    /// whichever leaves a solvable 2×2 system.
    pub fn intersection(&self, other: &Plane) -> Option<Line> {
        let (n1, n2) = (self.normal(), other.normal());
        let u = n1.cross(&n2);
        if u.approx_eq(&Vec3::zeros()) {
            return None;
        }
        let rhs = Vec2::new(-self.d, -other.d);
        // solve for two coordinates, the third stays at zero
        for (i, j) in [(1, 2), (0, 2), (0, 1)] {
            let m = Mat2::new(n1[i], n1[j], n2[i], n2[j]);
            if m.det().abs() <= EPSILON {
                continue;
            }
            let sol = m.checked_inverse().ok()? * rhs;
            let mut origin = Point3::zeros();
            origin[i] = sol.x;
            origin[j] = sol.y;
            return Line::new(origin, u).ok();
        }
        None
    }

    /// Some points lie strictly on the positive side and some do not.
    pub fn separate(&self, points: &[Point3]) -> bool {
        let Some(first) = points.first() else {
            return false;
        };
        let positive = self.distance_signed(first) > 0.0;
        points
            .iter()
            .any(|p| (self.distance_signed(p) > 0.0) != positive)
    }

    /// The plane cuts the box (its eight corners are not all on one side).
    pub fn intersects_box(&self, bbox: &BoundingBox) -> bool {
        let (lo, hi) = (bbox.lower3(), bbox.upper3());
        let corners: Vec<Point3> = (0..8)
            .map(|k| {
                Point3::new(
                    if k & 4 == 0 { lo.x } else { hi.x },
                    if k & 2 == 0 { lo.y } else { hi.y },
                    if k & 1 == 0 { lo.z } else { hi.z },
                )
            })
            .collect();
        self.separate(&corners)
    }

    /// Some point of the plane, on the first axis the normal is not orthogonal to.
    pub fn any_point(&self) -> Point3 {
        if self.a.abs() > EPSILON {
            Point3::new(-self.d / self.a, 0.0, 0.0)
        } else if self.b.abs() > EPSILON {
            Point3::new(0.0, -self.d / self.b, 0.0)
        } else if self.c.abs() > EPSILON {
            Point3::new(0.0, 0.0, -self.d / self.c)
        } else {
            Point3::zeros()
        }
    }

    /// Angle between the two planes in `[0, π/2]`.
    pub fn angle(&self, other: &Plane) -> f64 {
        self.normal()
            .dot(&other.normal())
            .abs()
            .min(1.0)
            .acos()
    }
}

impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.is_parallel(other) && (self.d - other.d).abs() < EPSILON
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.a, self.b, self.c, self.d)
    }
}
