use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use muse::algebra::{Point3, Vec3};
use muse::targeting::{DeviceGeometry, Pose, Settings, TargetingModel};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod batch;
mod device;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Transducer targeting: settings to focus and back")]
struct Cmd {
    /// JSON file overriding the transducer geometry
    #[arg(long, global = true)]
    geometry: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

/// Current device settings; unset values keep the device defaults.
#[derive(Args, Clone, Debug)]
struct PoseArgs {
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    psi: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    theta: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    alpha: f64,
    #[arg(long, default_value_t = 20.0, allow_hyphen_values = true)]
    lslider: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    xtrolley: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    ztrolley: f64,
}

impl PoseArgs {
    fn pose(&self) -> Pose {
        Pose {
            psi: self.psi,
            theta: self.theta,
            alpha: self.alpha,
            lslider: self.lslider,
            x_trolley: self.xtrolley,
            z_trolley: self.ztrolley,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Theoretical focus for the given settings
    Focus {
        #[command(flatten)]
        pose: PoseArgs,
        /// Observed focus `x,y,z`; calibrates before reporting
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        observed: Option<Point3>,
    },
    /// Settings that move the focus onto a target
    Suggest {
        /// Desired focus `x,y,z`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        target: Point3,
        #[command(flatten)]
        pose: PoseArgs,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        observed: Option<Point3>,
    },
    /// Focus for every row of a settings CSV, with a provenance sidecar
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Calibration offset `x,y,z` applied to every row
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        calibration: Option<Vec3>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let geometry = device::load(cmd.geometry.as_deref())?;
    let out = match cmd.action {
        Action::Focus { pose, observed } => focus(&geometry, &pose, observed)?,
        Action::Suggest {
            target,
            pose,
            observed,
        } => suggest(&geometry, &pose, target, observed)?,
        Action::Batch {
            input,
            out,
            calibration,
        } => run_batch(&geometry, &input, &out, calibration.unwrap_or_else(Vec3::zeros))?,
        Action::Report => report(&geometry)?,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// `x,y,z` with optional spaces.
fn parse_point(s: &str) -> Result<Point3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got {} values", parts.len())),
    }
}

/// Adding 0.0 turns a rounded -0 into 0.
fn point_json(p: &Point3) -> Value {
    json!([p.x + 0.0, p.y + 0.0, p.z + 0.0])
}

fn settings_json(s: &Settings) -> Value {
    let map: serde_json::Map<String, Value> = s
        .iter()
        .map(|d| (d.name().to_string(), json!(d.value())))
        .collect();
    Value::Object(map)
}

fn model_for(
    geometry: &DeviceGeometry,
    pose: &PoseArgs,
    observed: Option<Point3>,
) -> Result<TargetingModel> {
    let mut model = TargetingModel::new(*geometry);
    model
        .update_current_settings(Settings::from_pose(&pose.pose()))
        .context("applying current settings")?;
    if let Some(obs) = observed {
        model
            .update_observed_focus(obs)
            .context("calibrating on the observed focus")?;
    }
    Ok(model)
}

fn focus(geometry: &DeviceGeometry, pose: &PoseArgs, observed: Option<Point3>) -> Result<Value> {
    tracing::info!(pose = ?pose.pose(), observed = ?observed, "focus");
    let model = model_for(geometry, pose, observed)?;
    Ok(json!({
        "settings": settings_json(model.current_settings()),
        "out_of_range": model.current_settings().out_of_range(),
        "theoretical_focus": point_json(&model.theoretical_focus()),
        "calibration": point_json(&model.calibration()),
        "calibrated": model.is_calibrated(),
    }))
}

fn suggest(
    geometry: &DeviceGeometry,
    pose: &PoseArgs,
    target: Point3,
    observed: Option<Point3>,
) -> Result<Value> {
    tracing::info!(target = ?target, pose = ?pose.pose(), observed = ?observed, "suggest");
    let mut model = model_for(geometry, pose, observed)?;
    model
        .update_desired_focus(target)
        .context("computing suggested settings")?;
    let suggested = model.suggested_settings();
    Ok(json!({
        "desired_focus": point_json(&model.desired_focus()),
        "suggested": settings_json(suggested),
        "out_of_range": suggested.out_of_range(),
        "calibration": point_json(&model.calibration()),
    }))
}

fn run_batch(
    geometry: &DeviceGeometry,
    input: &Path,
    out: &Path,
    calibration: Vec3,
) -> Result<Value> {
    tracing::info!(input = %input.display(), out = %out.display(), "batch");
    let poses = batch::read_poses(input)?;
    let mut df = batch::focus_frame(&poses, geometry, &calibration)?;
    batch::write_csv(&mut df, out)?;
    tracing::info!(rows = df.height(), cols = df.width(), "batch_written");

    let params = json!({
        "rows": df.height(),
        "geometry": device::to_json(geometry)?,
        "calibration": point_json(&calibration),
    });
    let payload = provenance::Payload::new(params.clone()).with_input(input.to_string_lossy());
    let sidecar = provenance::write_sidecar(out, payload)?;
    Ok(json!({
        "params": params,
        "outputs": [out.to_string_lossy(), sidecar.to_string_lossy()],
    }))
}

fn report(geometry: &DeviceGeometry) -> Result<Value> {
    let mut doc = provenance::header();
    doc["geometry"] = device::to_json(geometry)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn defaults() -> PoseArgs {
        PoseArgs {
            psi: 0.0,
            theta: 0.0,
            alpha: 0.0,
            lslider: 20.0,
            xtrolley: 0.0,
            ztrolley: 0.0,
        }
    }

    #[test]
    fn points_parse_from_comma_lists() {
        assert_eq!(parse_point("1, -2.5,3").unwrap(), Point3::new(1.0, -2.5, 3.0));
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,a,3").is_err());
    }

    #[test]
    fn cli_parses_negative_targets() {
        let cmd = Cmd::try_parse_from(["cli", "suggest", "--target", "-5,-20,3", "--psi", "10"])
            .unwrap();
        match cmd.action {
            Action::Suggest { target, pose, .. } => {
                assert_eq!(target, Point3::new(-5.0, -20.0, 3.0));
                assert_eq!(pose.psi, 10.0);
                assert_eq!(pose.lslider, 20.0);
            }
            _ => panic!("expected suggest"),
        }
    }

    #[test]
    fn focus_reports_calibration_when_observed() {
        let g = DeviceGeometry::default();
        let plain = focus(&g, &defaults(), None).unwrap();
        assert_eq!(plain["theoretical_focus"], json!([0.0, -55.0, 0.0]));
        assert_eq!(plain["calibrated"], false);

        let calibrated = focus(&g, &defaults(), Some(Point3::new(2.0, -50.0, 4.0))).unwrap();
        assert_eq!(calibrated["theoretical_focus"], json!([2.0, -50.0, 4.0]));
        assert_eq!(calibrated["calibration"], json!([2.0, 5.0, 4.0]));
    }

    #[test]
    fn suggest_moves_the_trolleys() {
        let g = DeviceGeometry::default();
        let out = suggest(&g, &defaults(), Point3::new(-5.0, -55.0, -3.2), None).unwrap();
        let s = &out["suggested"];
        assert!(s["Psi"].as_f64().unwrap().abs() < 1e-9);
        assert!((s["XTrolley"].as_f64().unwrap() - 5.0).abs() < 1e-9);
        assert!((s["ZTrolley"].as_f64().unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn batch_writes_csv_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("settings.csv");
        std::fs::write(
            &input,
            "psi,theta,alpha,lslider,xtrolley,ztrolley\n0,0,0,20,5,3\n30,0,0,20,0,0\n",
        )
        .unwrap();
        let out = dir.path().join("out").join("focus.csv");
        let summary = run_batch(&DeviceGeometry::default(), &input, &out, Vec3::zeros()).unwrap();
        assert_eq!(summary["params"]["rows"], 2);
        assert!(out.exists());
        assert!(dir.path().join("out").join("focus.provenance.json").exists());

        let written = std::fs::read_to_string(&out).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("psi,theta,alpha,lslider,xtrolley,ztrolley,focus_x,focus_y,focus_z")
        );
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn report_carries_geometry() {
        let doc = report(&DeviceGeometry::default()).unwrap();
        assert_eq!(doc["geometry"]["focal_length"], 106.8);
        assert_eq!(doc["muse_version"], muse::VERSION);
    }
}
