//! Core domain types for pxsvg.
//!
//! This module contains the data the exporter reads:
//! - `Colour` - RGBA colour values and their canonical keys
//! - `Palette` - Indexed colour lookup
//! - `Sprite`, `Layer`, `Cel`, `Image` - The layered artwork itself

mod colour;
mod palette;
mod sprite;

pub use colour::{Colour, TRANSPARENT_KEY};
pub use palette::Palette;
pub use sprite::{pack_argb, pack_rgba, Cel, Image, Layer, PixelFormat, Sprite};
