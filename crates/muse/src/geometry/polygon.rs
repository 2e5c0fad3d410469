//! Planar polygons: the `Polygonal` capability set and the general vertex-list type.
//!
//! Purpose
//! - `Polygonal` holds every query that only needs the ordered vertex cycle (area,
//!   perimeter, winding-number containment, plane cuts, normals, bounding boxes).
//!   `Polygon` and `Triangle` both implement it; `Triangle` overrides area and centre.
//! - Vertex order is the boundary traversal; the closing edge `last → first` is implicit.
//!
//! Tolerances
//! - Vertex and edge membership use `EPSILON`; equality strips pass-through vertices
//!   (vertices on the segment joining their neighbours) before comparing cycles.

use super::bbox::BoundingBox;
use super::plane::Plane;
use super::segment::Segment;
use super::triangle::Triangle;
use super::triangulate::triangulate;
use crate::algebra::vector::{Point3, Vec3, VectorExt};
use crate::cfg::{EPSILON, LITTLE_EPSILON, SEGMENT_SAMPLES};
use crate::error::{GeomError, GeomResult};
use crate::trihedron::Trihedron;

/// Rectangle aligned with two in-plane directions, expressed as a box in space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingRectangle {
    pub bbox: BoundingBox,
    /// Unit direction of the first edge.
    pub u: Vec3,
    /// Unit in-plane direction orthogonal to `u`.
    pub v: Vec3,
}

/// Corners of the box an ellipse is inscribed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipseBox {
    pub upper_left: Point3,
    pub upper_right: Point3,
    pub lower_left: Point3,
    pub lower_right: Point3,
}

/// Edges of a vertex cycle, closing edge included.
pub(crate) fn edges(v: &[Point3]) -> impl Iterator<Item = Segment> + '_ {
    let n = v.len();
    (0..n).map(move |i| Segment::new(v[i], v[(i + 1) % n]))
}

/// `½ Σ pᵢ × pᵢ₊₁`: normal to the polygon plane, length = area, sign = winding.
pub(crate) fn area_vector(v: &[Point3]) -> Vec3 {
    if v.len() < 3 {
        return Vec3::zeros();
    }
    edges(v).fold(Vec3::zeros(), |acc, s| acc + s.from().cross(&s.to())) * 0.5
}

/// First vertex and two edge vectors from it that are not parallel.
fn spanning_pair(v: &[Point3]) -> Option<(Point3, Vec3, Vec3)> {
    if v.len() < 3 {
        return None;
    }
    let origin = v[0];
    let s1 = Segment::new(v[1], origin);
    v[2..]
        .iter()
        .find(|p| !s1.is_parallel(&Segment::new(**p, origin)))
        .map(|p| (origin, v[1] - origin, p - origin))
}

/// `> 0` when `p` is left of the directed edge `a → b` (XY components only).
#[inline]
fn is_left(a: &Point3, b: &Point3, p: &Point3) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

fn strip_pass_through(v: &[Point3], eps: f64) -> Vec<Point3> {
    let n = v.len();
    (0..n)
        .filter(|&i| {
            let prev = v[(i + n - 1) % n];
            let next = v[(i + 1) % n];
            !Segment::new(prev, next).includes(&v[i], eps)
        })
        .map(|i| v[i])
        .collect()
}

/// Same cycle up to the starting vertex and the traversal direction.
fn same_cycle(a: &[Point3], b: &[Point3], same: impl Fn(&Point3, &Point3) -> bool) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let n = a.len();
    if n == 0 {
        return true;
    }
    let Some(start) = b.iter().position(|q| same(&a[0], q)) else {
        return false;
    };
    (0..n).all(|k| same(&a[k], &b[(start + k) % n]))
        || (0..n).all(|k| same(&a[k], &b[(start + n - k) % n]))
}

/// Queries shared by every ordered planar vertex cycle.
pub trait Polygonal {
    fn vertices(&self) -> &[Point3];

    #[inline]
    fn len(&self) -> usize {
        self.vertices().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.vertices().is_empty()
    }

    fn vertex(&self, index: usize) -> GeomResult<Point3> {
        self.vertices()
            .get(index)
            .copied()
            .ok_or_else(|| GeomError::out_of_bounds("Polygon::vertex", index, self.len()))
    }

    /// Enclosed area (zero below three vertices).
    fn area(&self) -> f64 {
        area_vector(self.vertices()).norm()
    }

    /// Length of the closed boundary (zero below three vertices).
    fn perimeter(&self) -> f64 {
        if self.len() < 3 {
            return 0.0;
        }
        edges(self.vertices()).map(|s| s.length()).sum()
    }

    /// Position of the first vertex within `eps` of `p`.
    fn index_of(&self, p: &Point3, eps: f64) -> Option<usize> {
        self.vertices().iter().position(|v| v.is_close(p, eps))
    }

    fn has_vertex(&self, p: &Point3, eps: f64) -> bool {
        self.index_of(p, eps).is_some()
    }

    /// Winding-number test; points on the boundary are inside.
    fn contains(&self, p: &Point3) -> bool {
        let v = self.vertices();
        if v.len() < 3 {
            return false;
        }
        if self.has_vertex(p, EPSILON) {
            return true;
        }
        let Some((origin, v1, v2)) = spanning_pair(v) else {
            // every vertex on one line
            return edges(v).any(|s| s.includes(p, EPSILON));
        };
        let normal = v1.cross(&v2);
        let Ok(plane) = Plane::new(&normal, &origin) else {
            return false;
        };
        if !plane.includes(p, EPSILON) {
            return false;
        }

        let (nx, ny, nz) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
        let mut dropped = if nx <= ny { 1 } else { 0 };
        if normal[dropped].abs() <= nz {
            dropped = 2;
        }
        let flat = |q: &Point3| match dropped {
            0 => Point3::new(q.y, q.z, 0.0),
            1 => Point3::new(q.x, q.z, 0.0),
            _ => Point3::new(q.x, q.y, 0.0),
        };
        let fp = flat(p);
        let projected: Vec<Point3> = v.iter().map(flat).collect();

        let mut wn = 0i32;
        for edge in edges(&projected) {
            let (cur, next) = (edge.from(), edge.to());
            if edge.includes(&fp, EPSILON)
                || fp.is_close(&cur, EPSILON)
                || fp.is_close(&next, EPSILON)
            {
                return true;
            }
            if cur.y <= fp.y {
                if next.y > fp.y && is_left(&cur, &next, &fp) > 0.0 {
                    wn += 1;
                }
            } else if next.y <= fp.y && is_left(&cur, &next, &fp) < 0.0 {
                wn -= 1;
            }
        }
        wn != 0
    }

    /// Samples the segment (start included, end excluded) and tests each sample.
    fn contains_segment(&self, s: &Segment) -> bool {
        (0..SEGMENT_SAMPLES).all(|k| self.contains(&s.at(k as f64 / SEGMENT_SAMPLES as f64)))
    }

    /// Every vertex lies in `plane`; an empty polygon lies nowhere.
    fn lies_in(&self, plane: &Plane, eps: f64) -> bool {
        !self.is_empty() && self.vertices().iter().all(|p| plane.includes(p, eps))
    }

    /// Points where the boundary meets `plane`, without duplicates.
    ///
    /// Edges lying in the plane contribute both endpoints, crossing edges their
    /// crossing point.
    fn plane_intersection(&self, plane: &Plane) -> Vec<Point3> {
        let mut out: Vec<Point3> = Vec::new();
        let mut push = |p: Point3| {
            if !out.iter().any(|q| q.approx_eq(&p)) {
                out.push(p);
            }
        };
        for s in edges(self.vertices()) {
            if s.lies_in(plane, EPSILON) {
                push(s.from());
                push(s.to());
            } else if s.intersects(plane) {
                if let Ok(t) = s.plane_index(plane) {
                    push(s.at(t));
                }
            }
        }
        out
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices())
    }

    /// Centre of the bounding box, projected onto the polygon plane when there is one.
    fn bounding_box_center(&self) -> Point3 {
        let center = self.bounding_box().center();
        match (self.normal(), self.vertices().first()) {
            (Some(n), Some(p0)) => Plane::new(&n, p0)
                .map(|plane| plane.projection(&center))
                .unwrap_or(center),
            _ => center,
        }
    }

    /// Box of the vertices in the frame (first vertex, first edge, in-plane normal).
    fn bounding_rectangle(&self) -> Option<BoundingRectangle> {
        let v = self.vertices();
        if v.len() < 2 {
            return None;
        }
        let first = v[0];
        let u = (v[1] - first).checked_normalize().ok()?;
        let normal = self.normal()?;
        let w = normal.cross(&u).checked_normalize().ok()?;
        let (mut min_u, mut max_u, mut min_v, mut max_v) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
        for p in &v[1..] {
            let d = p - first;
            let (pu, pv) = (d.dot(&u), d.dot(&w));
            min_u = min_u.min(pu);
            max_u = max_u.max(pu);
            min_v = min_v.min(pv);
            max_v = max_v.max(pv);
        }
        let lower = first + min_u * u + min_v * w;
        let upper = first + max_u * u + max_v * w;
        Some(BoundingRectangle {
            bbox: BoundingBox::from_corners(&lower, &upper),
            u,
            v: w,
        })
    }

    /// Unit normal of the supporting plane (sign canonicalized like `Plane`).
    ///
    /// `None` for fewer than three vertices, collinear vertices, or a non-planar cycle.
    fn normal(&self) -> Option<Vec3> {
        let (origin, v1, v2) = spanning_pair(self.vertices())?;
        let plane = Plane::from_vectors(&v1, &v2, &origin).ok()?;
        self.lies_in(&plane, EPSILON).then(|| plane.normal())
    }

    /// Unit normal oriented by the first non-degenerate corner (right-hand rule).
    fn oriented_normal(&self) -> Option<Vec3> {
        let (origin, v1, v2) = spanning_pair(self.vertices())?;
        let plane = Plane::from_vectors(&v1, &v2, &origin).ok()?;
        if !self.lies_in(&plane, EPSILON) {
            return None;
        }
        v1.cross(&v2).checked_normalize().ok()
    }

    /// Area-weighted centre of the triangulation.
    fn gravity_center(&self) -> GeomResult<Point3> {
        let mut v = self.vertices();
        if v.len() > 1 && v[0].approx_eq(&v[v.len() - 1]) {
            v = &v[..v.len() - 1];
        }
        let total = area_vector(v).norm();
        if total < LITTLE_EPSILON {
            return Err(GeomError::divide_by_zero("Polygon::gravity_center"));
        }
        Ok(triangulate(v)
            .iter()
            .fold(Point3::zeros(), |acc, t| acc + (t.area() / total) * t.centroid()))
    }

    /// Same outline within `eps`, ignoring start vertex, direction and pass-through vertices.
    fn is_close_to(&self, other: &impl Polygonal, eps: f64) -> bool
    where
        Self: Sized,
    {
        let a = strip_pass_through(self.vertices(), eps);
        let b = strip_pass_through(other.vertices(), eps);
        same_cycle(&a, &b, |p, q| p.is_close(q, eps))
    }
}

/// General polygon over an ordered vertex list.
#[derive(Clone, Debug, Default)]
pub struct Polygon {
    vertices: Vec<Point3>,
}

impl Polygon {
    #[inline]
    pub fn new(vertices: Vec<Point3>) -> Self {
        Self { vertices }
    }

    /// `n` vertices at the origin.
    pub fn with_len(n: usize) -> Self {
        Self {
            vertices: vec![Point3::zeros(); n],
        }
    }

    /// Ellipse inscribed in `bounds`, sampled with `n_seg` vertices.
    ///
    /// Degenerate bounds (flat box or zero radius) give an empty polygon.
    pub fn ellipse(bounds: &EllipseBox, n_seg: usize) -> GeomResult<Self> {
        let center = (bounds.upper_left + bounds.lower_right) / 2.0;
        let v1 = bounds.upper_right - bounds.upper_left;
        let v2 = bounds.upper_left - bounds.lower_left;
        let v3 = v1.cross(&v2);
        if v3.norm() == 0.0 {
            return Ok(Self::default());
        }
        let frame = Trihedron::new(
            center,
            v1.checked_normalize()?,
            v2.checked_normalize()?,
            v3.checked_normalize()?,
        )?;
        let world = Trihedron::IDENTITY;
        let ul = frame.xform_from(&world, &bounds.upper_left)?;
        let lr = frame.xform_from(&world, &bounds.lower_right)?;
        let ra = ((ul.x - lr.x) / 2.0).abs();
        let rb = ((ul.y - lr.y) / 2.0).abs();
        if ra == 0.0 || rb == 0.0 {
            return Ok(Self::default());
        }
        let vertices = (0..n_seg)
            .map(|i| {
                let phi = i as f64 / n_seg as f64 * std::f64::consts::TAU;
                frame.xform_to(&world, &Point3::new(ra * phi.sin(), rb * phi.cos(), 0.0))
            })
            .collect::<GeomResult<Vec<_>>>()?;
        Ok(Self { vertices })
    }

    pub fn vertex_mut(&mut self, index: usize) -> GeomResult<&mut Point3> {
        let len = self.vertices.len();
        self.vertices
            .get_mut(index)
            .ok_or_else(|| GeomError::out_of_bounds("Polygon::vertex_mut", index, len))
    }

    pub fn push(&mut self, p: Point3) {
        self.vertices.push(p);
    }

    /// Inserts `p` before position `index`; indices past the end append.
    pub fn add_vertex(&mut self, p: Point3, index: usize) {
        let at = index.min(self.vertices.len());
        self.vertices.insert(at, p);
    }

    /// Removes the vertex at `index`, if any.
    pub fn delete_vertex(&mut self, index: usize) -> Option<Point3> {
        (index < self.vertices.len()).then(|| self.vertices.remove(index))
    }

    /// Removes the first vertex within `eps` of `p`.
    pub fn delete_point(&mut self, p: &Point3, eps: f64) -> bool {
        match self.index_of(p, eps) {
            Some(i) => {
                self.vertices.remove(i);
                true
            }
            None => false,
        }
    }

    /// Replaces the first vertex within `eps` of `old`.
    pub fn replace_vertex(&mut self, old: &Point3, new: Point3, eps: f64) -> bool {
        match self.index_of(old, eps) {
            Some(i) => {
                self.vertices[i] = new;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Truncates, or pads with origin vertices.
    pub fn resize(&mut self, n: usize) {
        self.vertices.resize(n, Point3::zeros());
    }

    /// Reverses the traversal direction.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// Ear-clipping triangulation; a closing duplicate of the first vertex is ignored.
    pub fn triangulate(&self) -> Vec<Triangle> {
        let mut v = self.vertices.as_slice();
        if v.len() > 1 && v[0].approx_eq(&v[v.len() - 1]) {
            v = &v[..v.len() - 1];
        }
        triangulate(v)
    }

    pub fn into_vertices(self) -> Vec<Point3> {
        self.vertices
    }
}

impl Polygonal for Polygon {
    #[inline]
    fn vertices(&self) -> &[Point3] {
        &self.vertices
    }
}

impl From<Vec<Point3>> for Polygon {
    fn from(vertices: Vec<Point3>) -> Self {
        Self { vertices }
    }
}

impl FromIterator<Point3> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        Self {
            vertices: iter.into_iter().collect(),
        }
    }
}

impl From<Triangle> for Polygon {
    fn from(t: Triangle) -> Self {
        Self {
            vertices: t.vertices().to_vec(),
        }
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        let a = strip_pass_through(&self.vertices, EPSILON);
        let b = strip_pass_through(&other.vertices, EPSILON);
        same_cycle(&a, &b, |p, q| p.approx_eq(q))
    }
}
