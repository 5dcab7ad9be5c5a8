//! Per-layer JSON document.
//!
//! Wraps one standalone SVG per layer, together with the sprite size and
//! frame, into a pretty-printed JSON object.

use serde::Serialize;

use crate::error::{PxSvgError, Result};

/// One layer's encoded SVG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSvg {
    pub name: String,
    pub svg: String,
}

#[derive(Serialize)]
struct LayersDocument<'a> {
    width: u32,
    height: u32,
    frame: u32,
    layers: &'a [LayerSvg],
}

/// Serialize layer SVGs as `{"width", "height", "frame", "layers": [{"name", "svg"}]}`.
///
/// Keys keep this order and the output uses two-space indentation.
pub fn layers_to_json(width: u32, height: u32, frame: u32, layers: &[LayerSvg]) -> Result<String> {
    let doc = LayersDocument {
        width,
        height,
        frame,
        layers,
    };
    serde_json::to_string_pretty(&doc).map_err(|e| PxSvgError::Export {
        message: format!("Failed to serialize layer document: {}", e),
        help: None,
    })
}
