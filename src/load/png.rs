//! PNG input.

use std::path::Path;

use crate::error::{PxSvgError, Result};
use crate::types::{Cel, Image, Layer, Sprite};

/// Read a PNG (or any format the `image` crate decodes) as an RGBA image.
pub fn read_png(path: &Path) -> Result<Image> {
    let decoded = image::open(path).map_err(|e| PxSvgError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read image: {}", e),
    })?;

    Ok(Image::from_rgba8(&decoded.to_rgba8()))
}

/// Treat a single image file as a one-layer, one-frame sprite.
///
/// The layer is named after the file stem.
pub fn png_sprite(path: &Path) -> Result<Sprite> {
    let image = read_png(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("layer")
        .to_string();

    Ok(Sprite::new(image.width(), image.height())?
        .with_layer(Layer::new(name).with_cel(1, Cel::new(image))))
}
