//! Geometric primitives and planar polygons in 3D.
//!
//! Purpose
//! - `BoundingBox`, `Line`, `Segment`, `Plane`: primitives with pairwise intersection
//!   and distance queries.
//! - `Polygonal` (capability set) implemented by `Polygon` and `Triangle`: area,
//!   perimeter, winding-number containment, ear-clipping triangulation, plane cuts.
//!
//! Conventions
//! - Points are `Point3`; queries that can miss return `Option`, queries that can hit a
//!   degenerate configuration return `GeomResult`.
//!
//! Code cross-refs: `Polygonal::contains`, `triangulate`, `Segment::plane_intersection`

pub mod bbox;
pub mod line;
pub mod plane;
pub mod polygon;
pub mod rand;
pub mod segment;
pub mod triangle;
mod triangulate;

pub use bbox::BoundingBox;
pub use line::Line;
pub use plane::Plane;
pub use polygon::{BoundingRectangle, EllipseBox, Polygon, Polygonal};
pub use segment::Segment;
pub use triangle::{PlaneCut, Triangle};
pub use triangulate::triangulate;

#[cfg(test)]
mod tests;
