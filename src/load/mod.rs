//! Sprite loading from disk.
//!
//! Stands in for a host application: a sprite is either a YAML manifest
//! listing layers and cel images, or a single image file.

mod manifest;
mod png;

use std::path::Path;

use crate::error::{PxSvgError, Result};
use crate::types::Sprite;

pub use manifest::{CelEntry, LayerEntry, SpriteManifest};
pub use png::{png_sprite, read_png};

/// Load a sprite from a manifest (`.yaml`/`.yml`) or an image file (`.png`).
pub fn load_sprite(path: &Path) -> Result<Sprite> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => {
            let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
            SpriteManifest::load(path)?.into_sprite(base_dir)
        }
        "png" => png_sprite(path),
        _ => Err(PxSvgError::Parse {
            message: format!("Unsupported input: {}", path.display()),
            help: Some("Pass a sprite manifest (.yaml) or a .png image".to_string()),
        }),
    }
}
