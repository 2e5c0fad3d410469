//! Finite segments `[a, b]` and their intersection/distance queries.
//!
//! Parametrization: `at(t) = a + t (b - a)`, so `t ∈ [0, 1]` is inside the segment.

use std::fmt;

use super::line::Line;
use super::plane::Plane;
use crate::algebra::vector::{Point3, Vec3, VectorExt};
use crate::cfg::{EPSILON, LITTLE_EPSILON};
use crate::error::{GeomError, GeomResult};

#[derive(Clone, Copy, Debug)]
pub struct Segment {
    a: Point3,
    b: Point3,
}

impl Segment {
    #[inline]
    pub fn new(from: Point3, to: Point3) -> Self {
        Self { a: from, b: to }
    }

    #[inline]
    pub fn from(&self) -> Point3 {
        self.a
    }

    #[inline]
    pub fn to(&self) -> Point3 {
        self.b
    }

    #[inline]
    pub fn vector(&self) -> Vec3 {
        self.b - self.a
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Same segment, walked the other way.
    #[inline]
    pub fn reversed(&self) -> Segment {
        Segment::new(self.b, self.a)
    }

    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.a + t * self.vector()
    }

    /// Parameter of the projection of `p` on the supporting line.
    ///
    /// A degenerate segment projects everything to 0.
    pub fn index(&self, p: &Point3) -> f64 {
        let v = self.vector();
        let len2 = v.norm_squared();
        if len2 < LITTLE_EPSILON {
            return 0.0;
        }
        (p - self.a).dot(&v) / len2
    }

    /// Same endpoints in either order.
    pub fn is_equivalent(&self, other: &Segment, eps: f64) -> bool {
        (self.a.is_close(&other.a, eps) && self.b.is_close(&other.b, eps))
            || (self.a.is_close(&other.b, eps) && self.b.is_close(&other.a, eps))
    }

    pub fn includes(&self, p: &Point3, eps: f64) -> bool {
        let t = self.index(p);
        (0.0..=1.0).contains(&t) && self.at(t).is_close(p, eps)
    }

    pub fn distance_to_point(&self, p: &Point3) -> f64 {
        let t = self.index(p).clamp(0.0, 1.0);
        (p - self.at(t)).norm()
    }

    /// Distance from `p` to the supporting line.
    pub fn distance_to_point_ext(&self, p: &Point3) -> f64 {
        (p - self.at(self.index(p))).norm()
    }

    pub fn distance_to_segment(&self, other: &Segment) -> f64 {
        let (t1, t2) = self.closest_points_idx(other);
        (self.at(t1.clamp(0.0, 1.0)) - other.at(t2.clamp(0.0, 1.0))).norm()
    }

    /// Distance between the two supporting lines.
    pub fn distance_to_segment_ext(&self, other: &Segment) -> f64 {
        let (t1, t2) = self.closest_points_idx(other);
        (self.at(t1) - other.at(t2)).norm()
    }

    /// Parameters of the closest points of the two supporting lines.
    ///
    /// Parallel segments pick `t1 = 0` and the matching parameter on `other`.
    pub fn closest_points_idx(&self, other: &Segment) -> (f64, f64) {
        let u = self.vector();
        let v = other.vector();
        let w = self.a - other.a;
        let (a, b, c) = (u.dot(&u), u.dot(&v), v.dot(&v));
        let (d, e) = (u.dot(&w), v.dot(&w));
        let denominator = a * c - b * b;
        if denominator < EPSILON {
            let t2 = if c < LITTLE_EPSILON { 0.0 } else { e / c };
            return (0.0, t2);
        }
        ((b * e - c * d) / denominator, (a * e - b * d) / denominator)
    }

    /// `p` lies on the supporting line.
    pub fn is_aligned_point(&self, p: &Point3) -> bool {
        self.at(self.index(p)).approx_eq(p)
    }

    /// Both endpoints of `other` lie on the supporting line.
    pub fn is_aligned(&self, other: &Segment) -> bool {
        self.is_aligned_point(&other.a) && self.is_aligned_point(&other.b)
    }

    pub fn is_parallel(&self, other: &Segment) -> bool {
        self.vector().cross(&other.vector()).is_null(EPSILON)
    }

    pub fn is_parallel_to_plane(&self, plane: &Plane) -> bool {
        plane.normal().dot(&self.vector()).abs() < EPSILON
    }

    pub fn is_coplanar(&self, other: &Segment) -> bool {
        if self.a.approx_eq(&other.a)
            || self.a.approx_eq(&other.b)
            || self.b.approx_eq(&other.a)
            || self.b.approx_eq(&other.b)
            || self.is_parallel(other)
        {
            return true;
        }
        Plane::from_vectors(&self.vector(), &(other.a - self.a), &self.a)
            .map(|p| p.includes(&other.b, EPSILON))
            .unwrap_or(true)
    }

    /// Both endpoints lie in `plane`.
    pub fn lies_in(&self, plane: &Plane, eps: f64) -> bool {
        plane.includes(&self.a, eps) && plane.includes(&self.b, eps)
    }

    /// The segment touches or crosses `plane`.
    pub fn intersects(&self, plane: &Plane) -> bool {
        let pa = plane.apply(&self.a);
        if pa.abs() < EPSILON {
            return true;
        }
        let pb = plane.apply(&self.b);
        if pb.abs() < EPSILON {
            return true;
        }
        if (pa - pb).abs() < EPSILON {
            return false;
        }
        (pa < 0.0) != (pb < 0.0)
    }

    /// Point where the segment meets `plane`.
    ///
    /// An endpoint in the plane is returned as is; otherwise the root of the plane
    /// function along the segment is returned only when the endpoints are on strictly
    /// opposite sides.
    pub fn plane_intersection(&self, plane: &Plane) -> Option<Point3> {
        let pa = plane.apply(&self.a);
        if pa.abs() < EPSILON {
            return Some(self.a);
        }
        let pb = plane.apply(&self.b);
        if pb.abs() < EPSILON {
            return Some(self.b);
        }
        if (pa - pb).abs() < EPSILON {
            return None;
        }
        let crossing = (pa < 0.0 && pb > 0.0) || (pa > 0.0 && pb < 0.0);
        crossing.then(|| self.at(pa / (pa - pb)))
    }

    /// Parameter of the supporting line's crossing with `plane`.
    pub fn plane_index(&self, plane: &Plane) -> GeomResult<f64> {
        let pa = plane.apply(&self.a);
        let pb = plane.apply(&self.b);
        if (pa - pb).abs() < EPSILON {
            return Err(GeomError::divide_by_zero("Segment::plane_index"));
        }
        Ok(pa / (pa - pb))
    }

    /// Intersection with a coplanar line, restricted to the segment (within `eps`).
    pub fn line_intersection(&self, line: &Line, eps: f64) -> Option<Point3> {
        let d1 = self.vector();
        let d2 = line.direction();
        let cross = d1.cross(&d2);
        let d = cross.norm_squared();
        if d < eps {
            return None;
        }
        let w = line.origin() - self.a;
        let t1 = w.cross(&d2).dot(&cross) / d;
        if t1 < -eps || t1 > 1.0 + eps {
            return None;
        }
        let t2 = w.cross(&d1).dot(&cross) / d;
        let p1 = self.at(t1);
        p1.is_close(&line.at(t2), eps).then_some(p1)
    }

    /// Parameters `(t1, t2)` where two coplanar segments cross, solved in the XY plane.
    pub fn intersection_idx(&self, other: &Segment) -> GeomResult<(f64, f64)> {
        let u = self.vector();
        let v = other.vector();
        let det = v.x * u.y - u.x * v.y;
        if det.abs() < EPSILON {
            return Err(GeomError::divide_by_zero("Segment::intersection_idx"));
        }
        let w = other.a - self.a;
        let t1 = v.x * w.y - w.x * v.y;
        let t2 = u.x * w.y - u.y * w.x;
        Ok((t1 / det, t2 / det))
    }

    /// Line through the midpoint, perpendicular to both the segment and `normal`.
    ///
    /// `normal` must be perpendicular to the segment.
    pub fn perpendicular_bisector(&self, normal: &Vec3) -> GeomResult<Line> {
        let dir = self.vector().checked_normalize()?;
        if normal.dot(&dir).abs() > EPSILON {
            return Err(GeomError::invalid(
                "Segment::perpendicular_bisector",
                "normal vector must be perpendicular to the segment",
            ));
        }
        let middle = (self.a + self.b) * 0.5;
        Line::new(middle, normal.cross(&dir).checked_normalize()?)
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.a.approx_eq(&other.a) && self.b.approx_eq(&other.b)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = (&self.a, &self.b);
        write!(f, "[{} {} {}, {} {} {}]", a.x, a.y, a.z, b.x, b.y, b.z)
    }
}
