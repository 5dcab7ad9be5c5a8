//! Sprite manifest (YAML) describing layers, cels and frames.
//!
//! ```yaml
//! width: 16
//! height: 16
//! frames: 2
//! palette: ["#00000000", "#ff0000"]
//! layers:
//!   - name: Background
//!     visible: true
//!     cels:
//!       - frame: 1
//!         file: bg.png
//!         x: 0
//!         y: 0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PxSvgError, Result};
use crate::types::{Cel, Layer, Palette, Sprite};

use super::png::read_png;

/// A sprite described on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpriteManifest {
    pub width: u32,
    pub height: u32,

    #[serde(default = "default_frames")]
    pub frames: u32,

    /// Hex colours for indexed images, index 0 first.
    #[serde(default)]
    pub palette: Vec<String>,

    /// Layers, bottom first.
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
}

fn default_frames() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerEntry {
    pub name: String,

    #[serde(default)]
    pub visible: Option<bool>,

    /// `false` for group or other non-image layers.
    #[serde(default)]
    pub image: Option<bool>,

    #[serde(default)]
    pub cels: Vec<CelEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CelEntry {
    /// 1-based frame index.
    pub frame: u32,

    /// Image file, relative to the manifest. A cel without a file has no image.
    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub x: i32,

    #[serde(default)]
    pub y: i32,
}

impl SpriteManifest {
    /// Load a manifest from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PxSvgError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read sprite manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a manifest from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| PxSvgError::Parse {
            message: format!("Invalid sprite manifest: {}", e),
            help: Some("A manifest needs width, height and a list of layers".to_string()),
        })
    }

    /// Build the sprite, reading cel images relative to `base_dir`.
    pub fn into_sprite(self, base_dir: &Path) -> Result<Sprite> {
        let palette = Palette::from_hex(&self.palette)?;
        let mut sprite = Sprite::new(self.width, self.height)?
            .with_frames(self.frames)
            .with_palette(palette);

        for entry in self.layers {
            let mut layer = Layer::new(entry.name);
            layer.visible = entry.visible;
            layer.is_image = entry.image;

            for cel in entry.cels {
                let image = match &cel.file {
                    Some(file) => Some(read_png(&base_dir.join(file))?),
                    None => None,
                };
                layer.insert_cel(
                    cel.frame,
                    Cel {
                        position: (cel.x, cel.y),
                        image,
                    },
                );
            }

            sprite.add_layer(layer);
        }

        Ok(sprite)
    }
}
