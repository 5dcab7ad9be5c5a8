//! Info command implementation.
//!
//! Prints the sprite's size and, per layer, which cel a frame export would use.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::export::{layer_status, LayerStatus};
use crate::load::load_sprite;
use crate::output::{display_path, plural, Printer};

/// Show how the layers of a frame would be exported
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Sprite manifest (.yaml) or .png image
    pub input: PathBuf,

    /// 1-based frame to inspect
    #[arg(long, short, default_value = "1")]
    pub frame: u32,
}

pub fn run(args: InfoArgs, printer: &Printer) -> Result<()> {
    let sprite = load_sprite(&args.input)?;

    printer.info(
        "Sprite",
        &format!(
            "{} ({}x{}, {}, {})",
            display_path(&args.input),
            sprite.width(),
            sprite.height(),
            plural(sprite.frame_count() as usize, "frame", "frames"),
            plural(sprite.layers().len(), "layer", "layers"),
        ),
    );

    for layer in sprite.layers() {
        let status = layer_status(layer, args.frame);
        let line = format!("{} {}", layer.name, printer.dim(&describe(status, args.frame)));
        if status.is_selected() {
            printer.status("Layer", &line);
        } else {
            printer.warning("Layer", &line);
        }
    }

    Ok(())
}

fn describe(status: LayerStatus, frame: u32) -> String {
    match status {
        LayerStatus::Selected { frame: used } if used != frame => {
            format!("(frame {} cel, fallback)", used)
        }
        LayerStatus::Selected { frame: used } => format!("(frame {} cel)", used),
        other => format!("({})", other),
    }
}
