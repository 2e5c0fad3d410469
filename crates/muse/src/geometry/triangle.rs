//! Triangles: a fixed three-vertex `Polygonal` with triangle-only queries.

use super::line::Line;
use super::plane::Plane;
use super::polygon::{edges, Polygonal};
use super::segment::Segment;
use crate::algebra::vector::{Point3, VectorExt};
use crate::cfg::{EPSILON, LITTLE_EPSILON};
use crate::error::GeomResult;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    v: [Point3; 3],
}

/// How a plane meets a triangle.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaneCut {
    /// The triangle lies in the plane; its three vertices.
    Coplanar([Point3; 3]),
    /// The plane crosses the triangle along a segment.
    Segment(Point3, Point3),
    /// The plane misses the triangle or touches it in a single point.
    Touch(Vec<Point3>),
}

impl Triangle {
    #[inline]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { v: [a, b, c] }
    }

    #[inline]
    pub fn a(&self) -> Point3 {
        self.v[0]
    }

    #[inline]
    pub fn b(&self) -> Point3 {
        self.v[1]
    }

    #[inline]
    pub fn c(&self) -> Point3 {
        self.v[2]
    }

    /// Isobarycentre.
    pub fn centroid(&self) -> Point3 {
        (self.v[0] + self.v[1] + self.v[2]) / 3.0
    }

    /// Centre of the circumscribed circle; `None` for a flat triangle.
    pub fn circumcenter(&self) -> Option<Point3> {
        let normal = (self.b() - self.a()).cross(&(self.c() - self.a()));
        if normal.is_null(LITTLE_EPSILON) {
            return None;
        }
        let normal = normal.checked_normalize().ok()?;
        let l1 = Segment::new(self.a(), self.b()).perpendicular_bisector(&normal).ok()?;
        let l2 = Segment::new(self.a(), self.c()).perpendicular_bisector(&normal).ok()?;
        l1.intersection(&l2, EPSILON)
    }

    /// Where `line` pierces the triangle (edges included, within `eps` in barycentric terms).
    ///
    /// A flat triangle falls back to intersecting the line with its edges.
    pub fn line_intersection(&self, line: &Line, eps: f64) -> Option<Point3> {
        let u = self.b() - self.a();
        let v = self.c() - self.a();
        let n = u.cross(&v);
        if n.is_null(EPSILON) {
            return edges(&self.v).find_map(|s| s.line_intersection(line, eps));
        }
        let dir = line.direction();
        let w0 = line.origin() - self.a();
        let b = n.dot(&dir);
        if b.abs() < eps {
            return None;
        }
        let r = -n.dot(&w0) / b;
        let hit = line.at(r);

        let (uu, uv, vv) = (u.dot(&u), u.dot(&v), v.dot(&v));
        let w = hit - self.a();
        let (wu, wv) = (w.dot(&u), w.dot(&v));
        let d = uv * uv - uu * vv;
        let s = (uv * wv - vv * wu) / d;
        if s < -eps || s > 1.0 + eps {
            return None;
        }
        let t = (uv * wu - uu * wv) / d;
        if t < -eps || s + t > 1.0 + eps {
            return None;
        }
        Some(hit)
    }

    /// Classifies the cut of the triangle by `plane`.
    pub fn plane_cut(&self, plane: &Plane, eps: f64) -> PlaneCut {
        if self.lies_in(plane, EPSILON) {
            return PlaneCut::Coplanar(self.v);
        }
        let mut hits: Vec<Point3> = Vec::with_capacity(3);
        for s in edges(&self.v) {
            if s.intersects(plane) && !s.lies_in(plane, EPSILON) {
                if let Ok(t) = s.plane_index(plane) {
                    hits.push(s.at(t));
                }
            }
        }
        match hits.as_slice() {
            [p, q] if !p.is_close(q, eps) => PlaneCut::Segment(*p, *q),
            [p, _] => PlaneCut::Touch(vec![*p]),
            [p, q, r] if p.is_close(q, eps) || p.is_close(r, eps) => PlaneCut::Segment(*q, *r),
            [p, q, r] if q.is_close(r, eps) => PlaneCut::Segment(*p, *q),
            _ => PlaneCut::Touch(hits),
        }
    }

    /// Supporting plane; fails for a flat triangle.
    pub fn plane(&self) -> GeomResult<Plane> {
        Plane::through(&self.v[0], &self.v[1], &self.v[2])
    }
}

impl Polygonal for Triangle {
    #[inline]
    fn vertices(&self) -> &[Point3] {
        &self.v
    }

    /// Heron's formula.
    fn area(&self) -> f64 {
        let ab = (self.b() - self.a()).norm();
        let bc = (self.c() - self.b()).norm();
        let ca = (self.a() - self.c()).norm();
        let s = (ab + bc + ca) / 2.0;
        (s * (s - ab) * (s - bc) * (s - ca)).max(0.0).sqrt()
    }

    fn gravity_center(&self) -> GeomResult<Point3> {
        Ok(self.centroid())
    }
}
