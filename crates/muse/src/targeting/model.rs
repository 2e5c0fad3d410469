//! Stateful targeting session: current and suggested settings, foci and calibration.

use tracing::debug;

use super::device::DeviceGeometry;
use super::settings::Settings;
use crate::algebra::vector::{Point3, Vec3};
use crate::error::GeomResult;

/// Theoretical focus of the default settings.
const DEFAULT_FOCUS: Point3 = Point3::new(0.0, -55.0, 0.0);

#[derive(Clone, Debug)]
pub struct TargetingModel {
    geometry: DeviceGeometry,
    current: Settings,
    suggested: Settings,
    observed: Point3,
    theoretical: Point3,
    desired: Point3,
    calibration: Vec3,
    observed_set: bool,
    calibrated: bool,
}

impl Default for TargetingModel {
    fn default() -> Self {
        Self::new(DeviceGeometry::default())
    }
}

impl TargetingModel {
    pub fn new(geometry: DeviceGeometry) -> Self {
        Self {
            geometry,
            current: Settings::default(),
            suggested: Settings::default(),
            observed: Point3::zeros(),
            theoretical: DEFAULT_FOCUS,
            desired: Point3::zeros(),
            calibration: Vec3::zeros(),
            observed_set: false,
            calibrated: false,
        }
    }

    #[inline]
    pub fn geometry(&self) -> &DeviceGeometry {
        &self.geometry
    }

    #[inline]
    pub fn current_settings(&self) -> &Settings {
        &self.current
    }

    #[inline]
    pub fn suggested_settings(&self) -> &Settings {
        &self.suggested
    }

    #[inline]
    pub fn observed_focus(&self) -> Point3 {
        self.observed
    }

    #[inline]
    pub fn theoretical_focus(&self) -> Point3 {
        self.theoretical
    }

    #[inline]
    pub fn desired_focus(&self) -> Point3 {
        self.desired
    }

    #[inline]
    pub fn calibration(&self) -> Vec3 {
        self.calibration
    }

    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Replaces the current settings and recomputes the theoretical focus.
    ///
    /// The first update after an observation also calibrates.
    pub fn update_current_settings(&mut self, settings: Settings) -> GeomResult<()> {
        self.current = settings;
        self.compute_theoretical_focus()?;
        if self.observed_set && !self.calibrated {
            self.calibrate()?;
        }
        Ok(())
    }

    /// Records where the focus was actually seen and recalibrates from scratch.
    pub fn update_observed_focus(&mut self, observed: Point3) -> GeomResult<()> {
        self.observed = observed;
        self.observed_set = true;
        self.calibration = Vec3::zeros();
        self.compute_theoretical_focus()?;
        self.calibrate()
    }

    /// Records the target and computes the suggested settings for it.
    pub fn update_desired_focus(&mut self, desired: Point3) -> GeomResult<()> {
        self.desired = desired;
        self.compute_suggested_settings()
    }

    fn compute_theoretical_focus(&mut self) -> GeomResult<()> {
        let pose = self.current.pose()?;
        self.theoretical = self.geometry.theoretical_focus(&pose, &self.calibration);
        Ok(())
    }

    fn compute_suggested_settings(&mut self) -> GeomResult<()> {
        let pose = self.current.pose()?;
        let suggestion = self.geometry.suggest(&pose, &self.desired, &self.calibration)?;
        self.suggested.apply_pose(&suggestion);
        Ok(())
    }

    /// Per differing component, the offset that moves the theoretical focus onto the
    /// observed one; the theoretical focus is recomputed with it.
    fn calibrate(&mut self) -> GeomResult<()> {
        for i in 0..3 {
            let (theo, obs) = (self.theoretical[i], self.observed[i]);
            if theo == obs {
                continue;
            }
            self.calibration[i] = if theo > 0.0 {
                (obs - theo.abs()).round()
            } else {
                (obs + theo.abs()).round()
            };
        }
        self.calibrated = true;
        debug!(
            x = self.calibration.x,
            y = self.calibration.y,
            z = self.calibration.z,
            "calibration applied"
        );
        self.compute_theoretical_focus()
    }

    /// Back to the device defaults, uncalibrated.
    pub fn reset(&mut self) {
        *self = Self::new(self.geometry);
    }
}
