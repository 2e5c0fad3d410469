//! Infinite straight lines (origin + non-null direction).

use super::segment::Segment;
use crate::algebra::vector::{Point3, Vec3, Vec3Ext, VectorExt, V3_X};
use crate::cfg::{EPSILON, LITTLE_EPSILON};
use crate::error::{GeomError, GeomResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    origin: Point3,
    direction: Vec3,
}

impl Default for Line {
    /// The X axis.
    fn default() -> Self {
        Self {
            origin: Point3::zeros(),
            direction: V3_X,
        }
    }
}

impl Line {
    pub fn new(origin: Point3, direction: Vec3) -> GeomResult<Self> {
        if direction.is_null(LITTLE_EPSILON) {
            return Err(GeomError::invalid(
                "Line::new",
                "direction of a line can't be null",
            ));
        }
        Ok(Self { origin, direction })
    }

    /// Line through `a` and `b` (distinct).
    pub fn through(a: &Point3, b: &Point3) -> GeomResult<Self> {
        Self::new(*a, b - a)
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// Intersection of two coplanar lines.
    ///
    /// `eps` bounds the squared length of `d1 × d2` below which the lines count as
    /// parallel. Skew lines (closest points not within `EPSILON`) have no intersection.
    pub fn intersection(&self, other: &Line, eps: f64) -> Option<Point3> {
        let (d1, d2) = (&self.direction, &other.direction);
        let cross = d1.cross(d2);
        let d = cross.norm_squared();
        if d < eps {
            return None;
        }
        let w = other.origin - self.origin;
        let t1 = w.cross(d2).dot(&cross) / d;
        let t2 = w.cross(d1).dot(&cross) / d;
        let p1 = self.at(t1);
        let p2 = other.at(t2);
        p1.is_close(&p2, EPSILON).then_some(p1)
    }

    pub fn contains(&self, p: &Point3, eps: f64) -> bool {
        (p - self.origin).is_collinear(&self.direction, eps)
    }

    /// Orthogonal projection of `p` onto the line.
    pub fn projection(&self, p: &Point3) -> Point3 {
        let u = self.direction.normalize();
        self.origin + (p - self.origin).dot(&u) * u
    }

    /// Same geometric line (parallel and sharing a point).
    pub fn is_equivalent(&self, other: &Line, eps: f64) -> bool {
        self.direction.is_collinear(&other.direction, eps) && self.contains(&other.origin, eps)
    }

    /// Shortest segment joining the two lines, `from` on `self` and `to` on `other`.
    ///
    /// Intersecting lines give a zero-length segment at the intersection; parallel lines
    /// project this line's origin onto `other`.
    pub fn perpendicular_segment(&self, other: &Line) -> Segment {
        if let Some(p) = self.intersection(other, EPSILON) {
            return Segment::new(p, p);
        }
        let (u, v) = (&self.direction, &other.direction);
        let ab = other.origin - self.origin;
        let uv = u.dot(v);
        let (uu, vv) = (u.norm_squared(), v.norm_squared());
        let delta = uu * vv - uv * uv;
        if delta < LITTLE_EPSILON {
            return Segment::new(self.origin, other.projection(&self.origin));
        }
        let (u_ab, v_ab) = (u.dot(&ab), v.dot(&ab));
        let alpha = (vv * u_ab - uv * v_ab) / delta;
        let beta = (uv * u_ab - uu * v_ab) / delta;
        Segment::new(self.at(alpha), other.at(beta))
    }

    pub fn distance_to_point(&self, p: &Point3) -> f64 {
        (p - self.projection(p)).norm()
    }

    pub fn distance_to_line(&self, other: &Line) -> f64 {
        self.perpendicular_segment(other).length()
    }

    pub fn distance_to_segment(&self, s: &Segment) -> f64 {
        let Ok(support) = Line::through(&s.from(), &s.to()) else {
            return self.distance_to_point(&s.from());
        };
        if s.from().is_close(&s.to(), EPSILON) {
            return self.distance_to_point(&s.from());
        }
        let perp = self.perpendicular_segment(&support);
        if s.includes(&perp.to(), EPSILON) {
            perp.length()
        } else {
            self.distance_to_point(&s.from())
                .min(self.distance_to_point(&s.to()))
        }
    }
}
