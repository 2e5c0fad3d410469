//! Ordered collection of degrees of freedom and the six-value pose read from it.

use super::dof::Dof;
use crate::error::{GeomError, GeomResult};

pub const PSI: &str = "Psi";
pub const THETA: &str = "Theta";
pub const ALPHA: &str = "Alpha";
pub const LSLIDER: &str = "LSlider";
pub const XTROLLEY: &str = "XTrolley";
pub const ZTROLLEY: &str = "ZTrolley";

/// Device defaults: `(name, lower, upper, value)`.
const DEFAULTS: [(&str, f64, f64, f64); 6] = [
    (PSI, 0.0, 40.0, 0.0),
    (THETA, 0.0, 360.0, 0.0),
    (ALPHA, -10.0, 10.0, 0.0),
    (LSLIDER, 0.0, 40.0, 20.0),
    (XTROLLEY, -20.0, 20.0, 0.0),
    (ZTROLLEY, -20.0, 20.0, 0.0),
];

/// Angles in degrees, slider and trolleys in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub psi: f64,
    pub theta: f64,
    pub alpha: f64,
    pub lslider: f64,
    pub x_trolley: f64,
    pub z_trolley: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            psi: 0.0,
            theta: 0.0,
            alpha: 0.0,
            lslider: 20.0,
            x_trolley: 0.0,
            z_trolley: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    dofs: Vec<Dof>,
}

impl Default for Settings {
    fn default() -> Self {
        let dofs = DEFAULTS
            .iter()
            .map(|&(name, lower, upper, value)| Dof::new(name, lower, upper, value))
            .collect();
        Self { dofs }
    }
}

impl Settings {
    /// Settings without any degree of freedom.
    pub fn empty() -> Self {
        Self { dofs: Vec::new() }
    }

    /// Device defaults with the values of `pose`.
    pub fn from_pose(pose: &Pose) -> Self {
        let mut settings = Self::default();
        settings.apply_pose(pose);
        settings
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dofs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dofs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dof> {
        self.dofs.iter()
    }

    /// Appends a degree of freedom; names are expected to be unique, lookups use the first.
    pub fn add(&mut self, name: impl Into<String>, lower: f64, upper: f64, value: f64) {
        self.dofs.push(Dof::new(name, lower, upper, value));
    }

    pub fn get(&self, name: &str) -> GeomResult<&Dof> {
        self.dofs
            .iter()
            .find(|d| d.name() == name)
            .ok_or_else(|| unknown(name))
    }

    fn get_mut(&mut self, name: &str) -> GeomResult<&mut Dof> {
        self.dofs
            .iter_mut()
            .find(|d| d.name() == name)
            .ok_or_else(|| unknown(name))
    }

    pub fn value(&self, name: &str) -> GeomResult<f64> {
        self.get(name).map(Dof::value)
    }

    pub fn min(&self, name: &str) -> GeomResult<f64> {
        self.get(name).map(Dof::min)
    }

    pub fn max(&self, name: &str) -> GeomResult<f64> {
        self.get(name).map(Dof::max)
    }

    pub fn set_value(&mut self, name: &str, value: f64) -> GeomResult<()> {
        self.get_mut(name)?.set_value(value);
        Ok(())
    }

    /// Restores the six device defaults, dropping any added degree of freedom.
    pub fn reset_to_default(&mut self) {
        *self = Self::default();
    }

    /// Names of the degrees of freedom whose value left its range.
    pub fn out_of_range(&self) -> Vec<&str> {
        self.dofs.iter().filter(|d| !d.in_range()).map(Dof::name).collect()
    }

    /// The six device values; fails when one of them is missing.
    pub fn pose(&self) -> GeomResult<Pose> {
        Ok(Pose {
            psi: self.value(PSI)?,
            theta: self.value(THETA)?,
            alpha: self.value(ALPHA)?,
            lslider: self.value(LSLIDER)?,
            x_trolley: self.value(XTROLLEY)?,
            z_trolley: self.value(ZTROLLEY)?,
        })
    }

    /// Writes the six device values; missing names are appended with an open range.
    pub fn apply_pose(&mut self, pose: &Pose) {
        let values = [
            (PSI, pose.psi),
            (THETA, pose.theta),
            (ALPHA, pose.alpha),
            (LSLIDER, pose.lslider),
            (XTROLLEY, pose.x_trolley),
            (ZTROLLEY, pose.z_trolley),
        ];
        for (name, value) in values {
            if self.set_value(name, value).is_err() {
                self.add(name, f64::NEG_INFINITY, f64::INFINITY, value);
            }
        }
    }
}

fn unknown(name: &str) -> GeomError {
    GeomError::invalid("Settings::get", format!("no setting named {name:?}"))
}
