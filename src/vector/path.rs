//! Path compaction for connected regions.
//!
//! A region is emitted as a union of axis-aligned rectangles: horizontal runs
//! per row, stacked vertically while consecutive rows repeat the same run.
//! This is not an outline trace; L-shapes and the like become several
//! rectangles, but the covered cells always equal the region exactly.

use std::collections::HashMap;

use super::regions::Region;

/// An axis-aligned rectangle of whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Path command: absolute move, then relative right, down, left and close.
    pub fn to_path_command(self) -> String {
        format!(
            "M{},{}h{}v{}h-{}z",
            self.x, self.y, self.width, self.height, self.width
        )
    }

    /// Iterate the pixels covered by this rectangle.
    pub fn cells(self) -> impl Iterator<Item = (u32, u32)> {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// Split a region into rectangles.
///
/// Rectangles are ordered by their top row, then by `x`.
pub fn region_rects(region: &Region) -> Vec<Rect> {
    let mut rects: Vec<Rect> = Vec::new();
    // (x, width) of runs on the previous row -> index into `rects`
    let mut open: HashMap<(u32, u32), usize> = HashMap::new();

    let pixels = region.pixels();
    let mut i = 0;
    while i < pixels.len() {
        let y = pixels[i].1;
        let mut next_open = HashMap::new();

        while i < pixels.len() && pixels[i].1 == y {
            let start = pixels[i].0;
            let mut end = start;
            i += 1;
            while i < pixels.len() && pixels[i].1 == y && pixels[i].0 == end + 1 {
                end += 1;
                i += 1;
            }

            let run = (start, end - start + 1);
            let continued = open
                .get(&run)
                .copied()
                .filter(|&idx| rects[idx].y + rects[idx].height == y);

            let idx = match continued {
                Some(idx) => {
                    rects[idx].height += 1;
                    idx
                }
                None => {
                    rects.push(Rect::new(run.0, y, run.1, 1));
                    rects.len() - 1
                }
            };
            next_open.insert(run, idx);
        }

        open = next_open;
    }

    rects
}

/// Encode a region as path data.
///
/// A single pixel becomes one unit square; larger regions become one
/// command per merged rectangle, separated by spaces. Empty regions
/// produce an empty string.
pub fn region_to_path(region: &Region) -> String {
    region_rects(region)
        .into_iter()
        .map(Rect::to_path_command)
        .collect::<Vec<_>>()
        .join(" ")
}
