//! Targeting model: device settings to focus and back.
//!
//! Purpose
//! - `Dof`/`Settings`: the named, ranged values an operator dials on the device.
//! - `DeviceGeometry`: transducer constants plus the forward (settings → focus) and
//!   inverse (focus → suggested settings) computations.
//! - `TargetingModel`: a session holding both setting sets, the observed, theoretical and
//!   desired foci, and the calibration offset learnt from an observation.
//!
//! Code cross-refs: `crate::api`, `crate::algebra::fixed::frame_rotation_x`

mod device;
mod dof;
mod model;
mod settings;

pub use device::{to_display, DeviceGeometry, PSI_CORRECTION_THRESHOLD};
pub use dof::Dof;
pub use model::TargetingModel;
pub use settings::{Pose, Settings, ALPHA, LSLIDER, PSI, THETA, XTROLLEY, ZTROLLEY};
