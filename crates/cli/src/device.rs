//! JSON override of the transducer constants.
//!
//! Every field is optional; missing ones keep the device default. When the focal or null
//! length is given without `z_centre`, the centre follows `-(focal_length + null_length)`.

use anyhow::{Context, Result};
use muse::targeting::DeviceGeometry;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeometryFile {
    pub focal_length: Option<f64>,
    pub null_length: Option<f64>,
    pub x_centre: Option<f64>,
    pub y_centre: Option<f64>,
    pub z_centre: Option<f64>,
}

impl GeometryFile {
    pub fn resolve(&self) -> DeviceGeometry {
        let base = DeviceGeometry::default();
        let mut g = DeviceGeometry::new(
            self.focal_length.unwrap_or(base.focal_length),
            self.null_length.unwrap_or(base.null_length),
            self.x_centre.unwrap_or(base.x_centre),
            self.y_centre.unwrap_or(base.y_centre),
        );
        if let Some(z) = self.z_centre {
            g.z_centre = z;
        }
        g
    }
}

/// Device geometry from `path`, or the defaults when no file is given.
pub fn load(path: Option<&Path>) -> Result<DeviceGeometry> {
    let Some(path) = path else {
        return Ok(DeviceGeometry::default());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: GeometryFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing geometry {}", path.display()))?;
    Ok(file.resolve())
}

impl From<&DeviceGeometry> for GeometryFile {
    fn from(g: &DeviceGeometry) -> Self {
        Self {
            focal_length: Some(g.focal_length),
            null_length: Some(g.null_length),
            x_centre: Some(g.x_centre),
            y_centre: Some(g.y_centre),
            z_centre: Some(g.z_centre),
        }
    }
}

/// Geometry as a JSON object in the same shape `load` reads.
pub fn to_json(g: &DeviceGeometry) -> Result<serde_json::Value> {
    serde_json::to_value(GeometryFile::from(g)).context("serializing geometry")
}
