//! Geometry and linear-algebra kernel of the Muse targeting tool.
//!
//! Layout
//! - `algebra`: fixed-size vectors/matrices, the general `Matrix`, tridiagonal solvers.
//! - `trihedron`: affine frames and transforms between them.
//! - `geometry`: bounding boxes, lines, segments, planes, polygons, triangles.
//! - `image`: generic rasters and the boolean `Mask` with cached statistics.
//! - `targeting`: device settings, focus computation and calibration.
//! - `text`: whitespace-separated import/export.
//!
//! Errors are `GeomError` values; the kernel never panics on caller input.

pub mod algebra;
pub mod api;
pub mod cfg;
pub mod error;
pub mod geometry;
pub mod image;
pub mod targeting;
pub mod text;
pub mod trihedron;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{GeomError, GeomResult};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algebra::{
        Mat2, Mat3, Mat4, Matrix, Point2, Point3, Point4, SquareExt, TridiagonalMatrix, Vec2,
        Vec3, Vec3Ext, Vec4, VectorExt,
    };
    pub use crate::cfg::{EPSILON, LITTLE_EPSILON, MRI_EPSILON};
    pub use crate::error::{GeomError, GeomResult};
    pub use crate::geometry::{
        triangulate, BoundingBox, Line, Plane, Polygon, Polygonal, Segment, Triangle,
    };
    pub use crate::image::{Image, Mask, MaskView};
    pub use crate::targeting::{DeviceGeometry, Pose, Settings, TargetingModel};
    pub use crate::trihedron::Trihedron;
}
