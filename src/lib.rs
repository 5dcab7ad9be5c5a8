//! pxsvg - Layered pixel-art sprites to SVG
//!
//! Converts one frame of a layered sprite into an SVG document, either one
//! `<rect>` per pixel or merged region paths with inline or CSS-class fills,
//! or into a JSON document holding one standalone SVG per layer.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod load;
pub mod output;
pub mod types;
pub mod vector;

pub use config::{Config, OutputFormat};
pub use error::{PxSvgError, Result};
pub use export::{
    export_layers_json, export_svg, Diagnostic, ExportOptions, ExportReport, Exporter,
    JsonExport, Severity, Strategy, SvgExport,
};
pub use load::{load_sprite, SpriteManifest};
pub use types::{Cel, Colour, Image, Layer, Palette, PixelFormat, Sprite};
pub use vector::{find_regions, region_to_path, HostDecoder, Region, Sampler};
