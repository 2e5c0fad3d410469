//! Device geometry and the forward/inverse focus computations.
//!
//! Frames
//! - Transducer frame: the focus sits at `(0, 0, focal_length)`.
//! - Scanner frame: the transducer is tilted by `alpha` (about Y, inverse sense) then `psi`
//!   (about X), shifted by the rotation centre and the slider, rotated by `theta` (about Y)
//!   and finally translated by the trolleys and the calibration offset.
//! - Display frame: the scanner frame with X negated, rounded to whole millimetres.
//!
//! Code cross-refs: `frame_rotation_x`, `frame_rotation_y`, `TargetingModel`

use tracing::debug;

use super::settings::Pose;
use crate::algebra::fixed::{frame_rotation_x, frame_rotation_y};
use crate::algebra::vector::{Point3, Vec3};
use crate::error::{GeomError, GeomResult};

/// Residual (mm) above which the suggested psi gets one correction step.
pub const PSI_CORRECTION_THRESHOLD: f64 = 0.5;

/// Transducer constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceGeometry {
    /// Distance from the transducer to its focus.
    pub focal_length: f64,
    /// Slider length at which the focus sits on the rotation centre.
    pub null_length: f64,
    /// Rotation centre offsets.
    pub x_centre: f64,
    pub y_centre: f64,
    pub z_centre: f64,
}

impl Default for DeviceGeometry {
    fn default() -> Self {
        Self::new(106.8, 20.2, 0.0, -55.0)
    }
}

impl DeviceGeometry {
    /// Geometry with `z_centre = -(focal_length + null_length)`.
    pub fn new(focal_length: f64, null_length: f64, x_centre: f64, y_centre: f64) -> Self {
        Self {
            focal_length,
            null_length,
            x_centre,
            y_centre,
            z_centre: -(focal_length + null_length),
        }
    }

    /// Rotation centre shifted by the slider, before the theta rotation.
    #[inline]
    fn centre(&self, lslider: f64) -> Vec3 {
        Vec3::new(self.x_centre, self.y_centre, lslider + self.z_centre)
    }

    /// Focus in the scanner frame, unrounded.
    pub fn scanner_focus(&self, pose: &Pose, calibration: &Vec3) -> Point3 {
        let r_psi = frame_rotation_x(pose.psi.to_radians());
        let r_alpha = frame_rotation_y(-pose.alpha.to_radians());
        let r_theta = frame_rotation_y(pose.theta.to_radians());
        let focus = Vec3::new(0.0, 0.0, self.focal_length);

        let transducer = self.centre(pose.lslider) + r_psi * (r_alpha * focus);
        let trolleys = Vec3::new(
            pose.x_trolley - calibration.x,
            calibration.y,
            calibration.z - pose.z_trolley,
        );
        trolleys + r_theta * transducer
    }

    /// Focus in the display frame: X negated, every component rounded.
    pub fn theoretical_focus(&self, pose: &Pose, calibration: &Vec3) -> Point3 {
        to_display(&self.scanner_focus(pose, calibration))
    }

    /// Settings that bring the focus onto `desired` (display frame), starting from `current`.
    ///
    /// Psi comes from the Y target, with one correction step when the predicted focus
    /// misses by more than [`PSI_CORRECTION_THRESHOLD`]. The trolleys absorb the X and Z
    /// residuals. Theta, alpha and the slider are kept.
    pub fn suggest(
        &self,
        current: &Pose,
        desired: &Point3,
        calibration: &Vec3,
    ) -> GeomResult<Pose> {
        let sine = (desired.y - calibration.y - self.y_centre) / self.focal_length;
        if !(-1.0..=1.0).contains(&sine) {
            return Err(GeomError::invalid(
                "DeviceGeometry::suggest",
                format!("desired y {} is out of reach of the transducer", desired.y),
            ));
        }
        let mut psi = sine.asin().to_degrees();

        let probe = Pose { psi, ..*current };
        let predicted = self.scanner_focus(&probe, calibration);
        let residual = Vec3::new(
            -desired.x - predicted.x,
            desired.y - predicted.y,
            desired.z - predicted.z,
        );

        let miss = residual.norm();
        if miss > PSI_CORRECTION_THRESHOLD {
            let step = (residual.y / self.focal_length).to_degrees();
            debug!(miss, step, "correcting suggested psi");
            psi += step;
        }

        Ok(Pose {
            psi,
            x_trolley: current.x_trolley + residual.x,
            z_trolley: current.z_trolley - residual.z,
            ..*current
        })
    }
}

/// Scanner frame to display frame.
pub fn to_display(scanner: &Point3) -> Point3 {
    Point3::new(-scanner.x.round(), scanner.y.round(), scanner.z.round())
}
