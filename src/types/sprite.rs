//! Sprite data model: sprites, layers, cels and image buffers.
//!
//! These types are the boundary with whatever application owns the artwork.
//! They are read-only to the exporter.

use std::collections::BTreeMap;

use image::RgbaImage;

use crate::error::{PxSvgError, Result};

use super::{Colour, Palette};

/// Encoding of the raw `u32` values stored in an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// `r` in bits 0-7, `g` in 8-15, `b` in 16-23, `a` in 24-31.
    #[default]
    Rgba,
    /// `b` in bits 0-7, `g` in 8-15, `r` in 16-23, `a` in 24-31.
    Argb,
    /// Grey value in bits 0-7, alpha in bits 8-15.
    GrayAlpha,
    /// Index into the sprite palette.
    Indexed,
}

/// A rectangular buffer of raw pixel values (row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u32>,
}

impl Image {
    /// Create an image from raw pixel values.
    ///
    /// Fails if `data` does not hold exactly `width * height` values.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(PxSvgError::InvalidSprite {
                message: format!(
                    "Image buffer holds {} pixels, expected {} for {}x{}",
                    data.len(),
                    expected,
                    width,
                    height
                ),
                help: None,
            });
        }

        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Create an image where every pixel holds the same raw value.
    pub fn filled(width: u32, height: u32, format: PixelFormat, value: u32) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Create an RGBA image from rows of colours.
    ///
    /// Every row must have the same length.
    pub fn from_colours(rows: &[Vec<Colour>]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.len()) as u32;
        let data = rows
            .iter()
            .flat_map(|row| row.iter().map(|&c| pack_rgba(c)))
            .collect();
        Self::new(width, height, PixelFormat::Rgba, data)
    }

    /// Convert a decoded 8-bit RGBA image.
    pub fn from_rgba8(img: &RgbaImage) -> Self {
        let data = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                pack_rgba(Colour::new(r, g, b, a))
            })
            .collect();

        Self {
            width: img.width(),
            height: img.height(),
            format: PixelFormat::Rgba,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Get the raw value at a position, or `None` outside the image.
    pub fn raw(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

/// Pack a colour into the [`PixelFormat::Rgba`] layout.
pub fn pack_rgba(c: Colour) -> u32 {
    u32::from_le_bytes([c.r, c.g, c.b, c.a])
}

/// Pack a colour into the [`PixelFormat::Argb`] layout.
pub fn pack_argb(c: Colour) -> u32 {
    u32::from_le_bytes([c.b, c.g, c.r, c.a])
}

/// The content of one layer at one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cel {
    /// Offset of the image's top-left pixel on the sprite canvas.
    pub position: (i32, i32),

    /// Pixel content, if any.
    pub image: Option<Image>,
}

impl Cel {
    /// Create a cel at the canvas origin.
    pub fn new(image: Image) -> Self {
        Self {
            position: (0, 0),
            image: Some(image),
        }
    }

    /// Set the canvas offset.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = (x, y);
        self
    }

    /// A cel without an image.
    pub fn empty() -> Self {
        Self {
            position: (0, 0),
            image: None,
        }
    }
}

/// A named layer holding one cel per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub name: String,

    /// Visibility flag. `None` means the host did not say; treated as visible.
    pub visible: Option<bool>,

    /// Whether this is an image layer. `None` is treated as an image layer.
    pub is_image: Option<bool>,

    /// Cels keyed by 1-based frame index.
    cels: BTreeMap<u32, Cel>,
}

impl Layer {
    /// Create an empty image layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: None,
            is_image: None,
            cels: BTreeMap::new(),
        }
    }

    /// Add a cel at a 1-based frame index.
    pub fn with_cel(mut self, frame: u32, cel: Cel) -> Self {
        self.insert_cel(frame, cel);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn with_image_flag(mut self, is_image: bool) -> Self {
        self.is_image = Some(is_image);
        self
    }

    pub fn insert_cel(&mut self, frame: u32, cel: Cel) {
        self.cels.insert(frame, cel);
    }

    /// Get the cel stored at a frame, without fallback.
    pub fn cel(&self, frame: u32) -> Option<&Cel> {
        self.cels.get(&frame)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn is_image_layer(&self) -> bool {
        self.is_image.unwrap_or(true)
    }
}

/// A layered sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    frames: u32,
    layers: Vec<Layer>,
    palette: Palette,
}

impl Sprite {
    /// Create an empty sprite with one frame.
    ///
    /// Fails if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PxSvgError::InvalidSprite {
                message: format!("Sprite dimensions must be non-zero, got {}x{}", width, height),
                help: Some("Both width and height must be at least 1".to_string()),
            });
        }

        Ok(Self {
            width,
            height,
            frames: 1,
            layers: Vec::new(),
            palette: Palette::default(),
        })
    }

    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames.max(1);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of frames declared by the sprite.
    pub fn frame_count(&self) -> u32 {
        self.frames
    }

    /// Layers in declaration order (bottom first).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
