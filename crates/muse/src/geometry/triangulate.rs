//! Ear-clipping triangulation of simple polygons.
//!
//! A vertex is an ear when it is convex (with respect to the winding of the whole
//! cycle), the diagonal joining its neighbours stays inside the original outline, and
//! no other remaining vertex lies in the triangle it cuts off. After clipping an ear
//! only its two neighbours are re-classified.

use tracing::warn;

use super::polygon::{area_vector, Polygon, Polygonal};
use super::segment::Segment;
use super::triangle::Triangle;
use crate::algebra::vector::{Point3, Vec3};
use crate::cfg::EPSILON;

struct EarClipper<'a> {
    points: &'a [Point3],
    outline: Polygon,
    winding: Vec3,
    remaining: Vec<usize>,
}

impl EarClipper<'_> {
    fn neighbours(&self, pos: usize) -> (usize, usize) {
        let n = self.remaining.len();
        (self.remaining[(pos + n - 1) % n], self.remaining[(pos + 1) % n])
    }

    fn is_ear(&self, k: usize) -> bool {
        let Some(pos) = self.remaining.iter().position(|&j| j == k) else {
            return false;
        };
        let (prev, next) = self.neighbours(pos);
        let (p, c, n) = (self.points[prev], self.points[k], self.points[next]);
        if (c - p).cross(&(n - c)).dot(&self.winding) <= 0.0 {
            return false;
        }
        if !self.outline.contains_segment(&Segment::new(p, n)) {
            return false;
        }
        let ear = Triangle::new(p, c, n);
        self.remaining.iter().all(|&j| {
            let q = &self.points[j];
            ear.has_vertex(q, EPSILON) || !ear.contains(q)
        })
    }
}

/// Triangles covering the polygon `points` (non-periodic: first ≠ last).
///
/// A simple polygon with `n` vertices yields `n - 2` triangles. If no ear can be found
/// the triangles clipped so far are returned.
pub fn triangulate(points: &[Point3]) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(points.len().saturating_sub(2));
    if points.len() < 3 {
        return triangles;
    }
    let mut clipper = EarClipper {
        points,
        outline: Polygon::new(points.to_vec()),
        winding: area_vector(points),
        remaining: (0..points.len()).collect(),
    };
    let mut ears: Vec<usize> = (0..points.len()).filter(|&k| clipper.is_ear(k)).collect();

    while clipper.remaining.len() > 3 {
        let Some(&ear) = ears.first() else {
            warn!(
                remaining = clipper.remaining.len(),
                "triangulation stopped: no ear left"
            );
            return triangles;
        };
        let Some(pos) = clipper.remaining.iter().position(|&j| j == ear) else {
            ears.remove(0);
            continue;
        };
        let (prev, next) = clipper.neighbours(pos);
        triangles.push(Triangle::new(points[prev], points[ear], points[next]));
        clipper.remaining.remove(pos);
        if clipper.remaining.len() == 3 {
            break;
        }
        ears.remove(0);
        for k in [prev, next] {
            let was_ear = ears.iter().position(|&e| e == k);
            match (was_ear, clipper.is_ear(k)) {
                (Some(i), false) => {
                    ears.remove(i);
                }
                (None, true) => ears.push(k),
                _ => {}
            }
        }
    }

    if let [a, b, c] = clipper.remaining[..] {
        triangles.push(Triangle::new(points[a], points[b], points[c]));
    }
    triangles
}
