//! Builds a rig, applies drags and colors, and writes a PNG snapshot.
//!
//! ```text
//! climb-snapshot --width 390 --height 720 --photo wall.jpg \
//!     --drag left-hand:-40,-60 --drag right-foot:20,35 \
//!     --joint-color '#00aaff' --out beta.png
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use climb_rig::{
    Configurable, JointId, Point, Rig, RigConfig, RigError, Snapshotter, StyleProfile,
    StyleTarget,
};

#[derive(Debug, Parser)]
#[command(name = "climb-snapshot", about = "Render a stick-figure climb annotation to PNG")]
struct Args {
    /// Surface width in points.
    #[arg(long, default_value_t = 390.0)]
    width: f32,

    /// Surface height in points.
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Background photo, fitted to the surface.
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Rig config JSON (sizes, default colors, glyph table).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Style profile JSON applied before the color flags.
    #[arg(long)]
    profile: Option<PathBuf>,

    #[arg(long)]
    joint_color: Option<String>,

    #[arg(long)]
    limb_color: Option<String>,

    /// Drag a joint by a delta, e.g. `left-hand:-40,-60`. Repeatable.
    #[arg(long = "drag", value_parser = parse_drag)]
    drags: Vec<(JointId, Point)>,

    /// Output PNG path.
    #[arg(long, default_value = "snapshot.png")]
    out: PathBuf,
}

fn parse_drag(s: &str) -> Result<(JointId, Point), String> {
    let (joint, delta) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <joint>:<dx>,<dy>, got {s:?}"))?;
    let joint: JointId = joint.parse().map_err(|e: RigError| e.to_string())?;
    let (dx, dy) = delta
        .split_once(',')
        .ok_or_else(|| format!("expected <dx>,<dy>, got {delta:?}"))?;
    let dx: f32 = dx.trim().parse().map_err(|_| format!("bad dx {dx:?}"))?;
    let dy: f32 = dy.trim().parse().map_err(|_| format!("bad dy {dy:?}"))?;
    Ok((joint, Point::new(dx, dy)))
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => RigConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => RigConfig::default(),
    };
    let mut rig = Rig::with_config(args.width, args.height, &config)?;

    if let Some(path) = &args.profile {
        let profile = StyleProfile::from_json(&std::fs::read_to_string(path)?)?;
        rig.apply_profile(&profile);
    }
    if let Some(hex) = &args.joint_color {
        rig.apply_style_hex(StyleTarget::Joints, hex)?;
    }
    if let Some(hex) = &args.limb_color {
        rig.apply_style_hex(StyleTarget::Limbs, hex)?;
    }

    for (joint, delta) in &args.drags {
        let start = rig.position(*joint);
        rig.on_drag_start(*joint, start)?;
        let moved = rig.on_drag_end(start + *delta)?;
        if moved.clamped {
            eprintln!("{joint} clamped to ({}, {})", moved.position.x, moved.position.y);
        }
    }

    let mut snapshotter = Snapshotter::new();
    if let Some(path) = &args.photo {
        snapshotter.set_photo(Some(image::open(path)?.to_rgba8()));
    }

    let image = snapshotter.rasterize(&rig)?;
    image.save(&args.out)?;
    println!(
        "wrote {} ({}x{})",
        args.out.display(),
        image.width(),
        image.height()
    );
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
