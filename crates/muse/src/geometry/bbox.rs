//! Axis-aligned bounding boxes.
//!
//! Corners are 4-component points; the fourth coordinate is carried along (and compared
//! by `contains`) but geometry only uses the first three. "Empty" means `upper < lower`
//! on one of the first three axes.

use crate::algebra::vector::{Point3, Point4, VectorExt};
use crate::cfg::EPSILON;

#[derive(Clone, Copy, Debug)]
pub struct BoundingBox {
    pub lower: Point4,
    pub upper: Point4,
}

impl Default for BoundingBox {
    /// The canonical empty box.
    fn default() -> Self {
        Self {
            lower: Point4::zeros(),
            upper: Point4::new(-1.0, 0.0, 0.0, 0.0),
        }
    }
}

impl BoundingBox {
    #[inline]
    pub fn new(lower: Point4, upper: Point4) -> Self {
        Self { lower, upper }
    }

    /// Box from 3D corners (fourth coordinate 0).
    #[inline]
    pub fn from_corners(lower: &Point3, upper: &Point3) -> Self {
        Self {
            lower: Point4::new(lower.x, lower.y, lower.z, 0.0),
            upper: Point4::new(upper.x, upper.y, upper.z, 0.0),
        }
    }

    /// Smallest box holding every point; empty for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut it = points.into_iter();
        let Some(first) = it.next() else {
            return Self::default();
        };
        let (lo, hi) = it.fold((*first, *first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
        Self::from_corners(&lo, &hi)
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.upper[i] < self.lower[i] || self.upper[i].is_nan())
    }

    /// Inclusive containment on all four components.
    pub fn contains(&self, p: &Point4) -> bool {
        (0..4).all(|i| p[i] >= self.lower[i] && p[i] <= self.upper[i])
    }

    #[inline]
    pub fn lower3(&self) -> Point3 {
        self.lower.xyz()
    }

    #[inline]
    pub fn upper3(&self) -> Point3 {
        self.upper.xyz()
    }

    /// Middle of the first three axes.
    pub fn center(&self) -> Point3 {
        (self.lower3() + self.upper3()) / 2.0
    }

    /// Component-wise `max(lower)`, `min(upper)`; may be empty.
    pub fn intersection(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            lower: self.lower.sup(&other.lower),
            upper: self.upper.inf(&other.upper),
        }
    }

    /// Component-wise `min(lower)`, `max(upper)`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            lower: self.lower.inf(&other.lower),
            upper: self.upper.sup(&other.upper),
        }
    }
}

impl PartialEq for BoundingBox {
    fn eq(&self, other: &Self) -> bool {
        self.lower.is_close(&other.lower, EPSILON) && self.upper.is_close(&other.upper, EPSILON)
    }
}
