use crate::foundation::error::{DissolveError, DissolveResult};

/// Rectangular pixel grid a transition runs over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Domain {
    /// Width in pixels, always > 0.
    pub width: u32,
    /// Height in pixels, always > 0.
    pub height: u32,
}

impl Domain {
    /// Build a domain, rejecting zero-sized grids.
    pub fn new(width: u32, height: u32) -> DissolveResult<Self> {
        if width == 0 || height == 0 {
            return Err(DissolveError::invalid_domain(format!(
                "width and height must be > 0 (got {width}x{height})"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels in the grid.
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether `c` lies inside the grid.
    pub fn contains(self, c: Coord) -> bool {
        c.x < self.width && c.y < self.height
    }

    /// Map a linear index over rows of `row_stride` to a coordinate.
    ///
    /// Returns `None` when the index lands in row padding or below the last row.
    pub fn coord_at(self, index: u64, row_stride: u64) -> Option<Coord> {
        if row_stride == 0 {
            return None;
        }
        let x = index % row_stride;
        let y = index / row_stride;
        if x >= u64::from(self.width) || y >= u64::from(self.height) {
            return None;
        }
        Some(Coord {
            x: x as u32,
            y: y as u32,
        })
    }

    /// Row-major offset of `c` in a tightly packed buffer of this domain.
    pub fn offset_of(self, c: Coord) -> usize {
        (c.y as usize) * (self.width as usize) + (c.x as usize)
    }
}

/// Pixel position inside a [`Domain`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Coord {
    /// Column, `0 <= x < width`.
    pub x: u32,
    /// Row, `0 <= y < height`.
    pub y: u32,
}

impl Coord {
    /// Shorthand constructor.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
