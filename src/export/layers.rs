//! Layer selection and pixel collection for one frame.

use std::fmt;

use crate::types::{Colour, Image, Layer, Sprite};
use crate::vector::{Coord, HostDecoder, Sampler};

use super::report::{
    ExportReport, CEL_FALLBACK, CLAMPED_CHANNELS, CLIPPED_PIXELS, LAYER_SKIPPED, MALFORMED_PIXELS,
};

/// Frame used when a layer has no cel at the requested frame.
pub const FALLBACK_FRAME: u32 = 1;

/// Whether a layer takes part in an export, and why not if it doesn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerStatus {
    /// Exported using the cel at `frame`.
    Selected { frame: u32 },
    Hidden,
    NotImage,
    NoCel,
    NoImage,
}

impl LayerStatus {
    pub fn is_selected(self) -> bool {
        matches!(self, LayerStatus::Selected { .. })
    }
}

impl fmt::Display for LayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerStatus::Selected { frame } => write!(f, "frame {}", frame),
            LayerStatus::Hidden => write!(f, "hidden"),
            LayerStatus::NotImage => write!(f, "not an image layer"),
            LayerStatus::NoCel => write!(f, "no cel"),
            LayerStatus::NoImage => write!(f, "cel has no image"),
        }
    }
}

/// Decide whether a layer is exported at `frame`.
///
/// Hidden and non-image layers are skipped; missing flags count as visible
/// image layers. A missing cel falls back to frame 1.
pub fn layer_status(layer: &Layer, frame: u32) -> LayerStatus {
    if !layer.is_image_layer() {
        return LayerStatus::NotImage;
    }
    if !layer.is_visible() {
        return LayerStatus::Hidden;
    }

    let resolved = if layer.cel(frame).is_some() {
        frame
    } else {
        FALLBACK_FRAME
    };

    match layer.cel(resolved) {
        None => LayerStatus::NoCel,
        Some(cel) if cel.image.is_none() => LayerStatus::NoImage,
        Some(_) => LayerStatus::Selected { frame: resolved },
    }
}

/// A layer chosen for export, with its effective cel resolved.
#[derive(Debug, Clone, Copy)]
pub struct SelectedLayer<'a> {
    pub name: &'a str,
    pub image: &'a Image,
    /// Cel position on the sprite canvas.
    pub offset: (i32, i32),
    /// Frame the cel was taken from.
    pub frame: u32,
}

/// Pick the layers to export at `frame`, in declaration order.
pub fn select_layers<'a>(
    sprite: &'a Sprite,
    frame: u32,
    report: &mut ExportReport,
) -> Vec<SelectedLayer<'a>> {
    let mut selected = Vec::new();

    for layer in sprite.layers() {
        let status = layer_status(layer, frame);
        let LayerStatus::Selected { frame: resolved } = status else {
            report.info(
                LAYER_SKIPPED,
                format!("Layer '{}' skipped: {}", layer.name, status),
            );
            continue;
        };

        let Some(cel) = layer.cel(resolved) else {
            continue;
        };
        let Some(image) = cel.image.as_ref() else {
            continue;
        };

        if resolved != frame {
            report.info(
                CEL_FALLBACK,
                format!(
                    "Layer '{}' has no cel at frame {}; using frame {}",
                    layer.name, frame, resolved
                ),
            );
        }

        selected.push(SelectedLayer {
            name: &layer.name,
            image,
            offset: cel.position,
            frame: resolved,
        });
    }

    selected
}

/// Pixels sharing one colour key, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourGroup {
    pub key: String,
    pub pixels: Vec<Coord>,
}

/// The visible pixels of one selected layer, in sprite canvas coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPixels {
    pub name: String,
    /// Non-transparent pixels in row-major scan order of the cel image.
    pub pixels: Vec<(Coord, Colour)>,
}

impl LayerPixels {
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Group pixels by colour key, ordered by each key's first appearance.
    pub fn colour_groups(&self) -> Vec<ColourGroup> {
        let mut groups: Vec<ColourGroup> = Vec::new();

        for &(coord, colour) in &self.pixels {
            let key = colour.key();
            match groups.iter_mut().find(|g| g.key == key) {
                Some(group) => group.pixels.push(coord),
                None => groups.push(ColourGroup {
                    key,
                    pixels: vec![coord],
                }),
            }
        }

        groups
    }
}

/// Sample a selected layer and move its visible pixels onto the canvas.
///
/// Pixels that land outside the sprite after the cel offset is applied are
/// dropped and reported.
pub fn collect_pixels(
    sprite: &Sprite,
    layer: &SelectedLayer<'_>,
    host: Option<&dyn HostDecoder>,
    report: &mut ExportReport,
) -> LayerPixels {
    let mut sampler = Sampler::new(layer.image, sprite.palette());
    if let Some(host) = host {
        sampler = sampler.with_host_decoder(host);
    }

    let (ox, oy) = (i64::from(layer.offset.0), i64::from(layer.offset.1));
    let (w, h) = (i64::from(sprite.width()), i64::from(sprite.height()));

    let mut pixels = Vec::new();
    let mut clipped = 0usize;

    for p in sampler.opaque_pixels() {
        let x = ox + i64::from(p.x);
        let y = oy + i64::from(p.y);
        if (0..w).contains(&x) && (0..h).contains(&y) {
            pixels.push(((x as u32, y as u32), p.colour));
        } else {
            clipped += 1;
        }
    }

    if clipped > 0 {
        report.warning(
            CLIPPED_PIXELS,
            format!(
                "Layer '{}': {} pixel(s) outside the {}x{} canvas were dropped",
                layer.name,
                clipped,
                sprite.width(),
                sprite.height()
            ),
        );
    }
    if sampler.malformed_count() > 0 {
        report.warning(
            MALFORMED_PIXELS,
            format!(
                "Layer '{}': {} pixel(s) could not be decoded as given",
                layer.name,
                sampler.malformed_count()
            ),
        );
    }
    if sampler.clamped_count() > 0 {
        report.warning(
            CLAMPED_CHANNELS,
            format!(
                "Layer '{}': {} pixel(s) had out-of-range channels clamped",
                layer.name,
                sampler.clamped_count()
            ),
        );
    }

    LayerPixels {
        name: layer.name.to_string(),
        pixels,
    }
}
