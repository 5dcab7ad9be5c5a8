//! Raster-to-vector building blocks.
//!
//! Sampling pixels, naming colours, finding connected regions and
//! compacting them into path data. The export layer strings these together.

mod classes;
mod path;
mod regions;
mod sampler;

pub use classes::{
    sanitize_identifier, ClassTable, CssClass, IdAllocator, NamedColours, DEFAULT_CLASS_NAME,
    DEFAULT_LAYER_ID,
};
pub use path::{region_rects, region_to_path, Rect};
pub use regions::{find_regions, Coord, Region};
pub use sampler::{HostDecoder, Pixel, Sampler};
