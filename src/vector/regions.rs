//! Connected-region discovery.
//!
//! Splits a set of same-coloured pixels into maximal 4-connected regions
//! using an iterative flood fill over an occupancy grid.

/// A pixel coordinate on the sprite canvas.
pub type Coord = (u32, u32);

/// A maximal set of 4-connected pixels.
///
/// Pixels are stored in row-major order (by `y`, then `x`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pixels: Vec<Coord>,
}

impl Region {
    /// Build a region from pixels, sorting them into row-major order.
    pub fn new(mut pixels: Vec<Coord>) -> Self {
        pixels.sort_unstable_by_key(|&(x, y)| (y, x));
        pixels.dedup();
        Self { pixels }
    }

    pub fn pixels(&self) -> &[Coord] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The first pixel in row-major order.
    pub fn first(&self) -> Option<Coord> {
        self.pixels.first().copied()
    }
}

/// Occupancy state of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Occupied,
    Visited,
}

/// Partition `pixels` into 4-connected regions inside a `width` x `height` grid.
///
/// Regions come back in row-major order of their first pixel. Pixels outside
/// the grid are ignored; duplicates collapse into one.
pub fn find_regions(pixels: &[Coord], width: u32, height: u32) -> Vec<Region> {
    let w = width as usize;
    let h = height as usize;
    let mut grid = vec![Cell::Empty; w * h];

    for &(x, y) in pixels {
        if x < width && y < height {
            grid[y as usize * w + x as usize] = Cell::Occupied;
        }
    }

    let mut regions = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..grid.len() {
        if grid[start] != Cell::Occupied {
            continue;
        }

        grid[start] = Cell::Visited;
        stack.push(start);
        let mut members = Vec::new();

        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % w, idx / w);
            members.push((x as u32, y as u32));

            let neighbours = [
                (x > 0).then(|| idx - 1),
                (x + 1 < w).then(|| idx + 1),
                (y > 0).then(|| idx - w),
                (y + 1 < h).then(|| idx + w),
            ];

            for n in neighbours.into_iter().flatten() {
                if grid[n] == Cell::Occupied {
                    grid[n] = Cell::Visited;
                    stack.push(n);
                }
            }
        }

        regions.push(Region::new(members));
    }

    regions
}
