//! Curated surface for callers outside the kernel (CLI, front ends).
//!
//! The two operations a front end needs:
//! - `focus_from_settings`: device settings → theoretical focus (display frame).
//! - `suggest_settings`: desired focus → settings that reach it.
//!
//! Both are pure; `TargetingModel` wraps them with session state.

use crate::algebra::vector::{Point3, Vec3};
use crate::error::GeomResult;
use crate::targeting::{DeviceGeometry, Settings};

pub use crate::algebra::{Mat3, Mat4, Matrix, Point4, TridiagonalMatrix, Vec2, VectorExt};
pub use crate::error::GeomError;
pub use crate::geometry::{BoundingBox, Line, Plane, Polygon, Polygonal, Segment, Triangle};
pub use crate::image::{Image, Mask};
pub use crate::targeting::{Dof, Pose, TargetingModel};
pub use crate::trihedron::Trihedron;

/// Theoretical focus for `settings`, offset by `calibration`.
pub fn focus_from_settings(
    settings: &Settings,
    geometry: &DeviceGeometry,
    calibration: &Vec3,
) -> GeomResult<Point3> {
    let pose = settings.pose()?;
    Ok(geometry.theoretical_focus(&pose, calibration))
}

/// Settings reaching `desired` from `current`; ranges are those of `current`.
pub fn suggest_settings(
    current: &Settings,
    desired: &Point3,
    geometry: &DeviceGeometry,
    calibration: &Vec3,
) -> GeomResult<Settings> {
    let pose = geometry.suggest(&current.pose()?, desired, calibration)?;
    let mut suggested = current.clone();
    suggested.apply_pose(&pose);
    Ok(suggested)
}
