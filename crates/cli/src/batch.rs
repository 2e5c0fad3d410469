//! Focus for every row of a settings CSV.
//!
//! Input columns: `psi, theta, alpha, lslider, xtrolley, ztrolley` (any numeric type;
//! extra columns are ignored). Output: the six settings followed by `focus_x`,
//! `focus_y`, `focus_z` in the display frame.

use anyhow::{anyhow, Context, Result};
use muse::algebra::Vec3;
use muse::targeting::{DeviceGeometry, Pose};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

pub const COLUMNS: [&str; 6] = ["psi", "theta", "alpha", "lslider", "xtrolley", "ztrolley"];

/// Reads the settings columns as `f64`.
pub fn read_poses(input: &Path) -> Result<Vec<Pose>> {
    let df = LazyCsvReader::new(input)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", input.display()))?
        .select(
            COLUMNS
                .iter()
                .map(|&c| col(c).cast(DataType::Float64))
                .collect::<Vec<_>>(),
        )
        .collect()
        .with_context(|| format!("reading settings columns from {}", input.display()))?;

    let columns = COLUMNS
        .iter()
        .map(|&c| Ok(df.column(c)?.f64()?.clone()))
        .collect::<PolarsResult<Vec<Float64Chunked>>>()?;

    (0..df.height())
        .map(|row| {
            let mut v = [0.0; 6];
            for (slot, (values, name)) in v.iter_mut().zip(columns.iter().zip(COLUMNS)) {
                *slot = values
                    .get(row)
                    .ok_or_else(|| anyhow!("row {row}: missing {name}"))?;
            }
            Ok(Pose {
                psi: v[0],
                theta: v[1],
                alpha: v[2],
                lslider: v[3],
                x_trolley: v[4],
                z_trolley: v[5],
            })
        })
        .collect()
}

/// Settings plus theoretical focus, one row per pose.
pub fn focus_frame(
    poses: &[Pose],
    geometry: &DeviceGeometry,
    calibration: &Vec3,
) -> Result<DataFrame> {
    let foci: Vec<_> = poses
        .iter()
        .map(|p| geometry.theoretical_focus(p, calibration))
        .collect();
    let settings = |f: fn(&Pose) -> f64| poses.iter().map(f).collect::<Vec<f64>>();
    let focus = |i: usize| foci.iter().map(|p| p[i]).collect::<Vec<f64>>();

    let df = DataFrame::new(vec![
        Series::new(COLUMNS[0].into(), settings(|p| p.psi)),
        Series::new(COLUMNS[1].into(), settings(|p| p.theta)),
        Series::new(COLUMNS[2].into(), settings(|p| p.alpha)),
        Series::new(COLUMNS[3].into(), settings(|p| p.lslider)),
        Series::new(COLUMNS[4].into(), settings(|p| p.x_trolley)),
        Series::new(COLUMNS[5].into(), settings(|p| p.z_trolley)),
        Series::new("focus_x".into(), focus(0)),
        Series::new("focus_y".into(), focus(1)),
        Series::new("focus_z".into(), focus(2)),
    ])?;
    Ok(df)
}

pub fn write_csv(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
