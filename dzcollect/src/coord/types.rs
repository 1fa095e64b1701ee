//! Coordinate type definitions

use std::fmt;

/// Side length of every collection tile in pixels.
///
/// Tiles smaller than this only exist as padded content inside a full-size
/// canvas, never as partially encoded files.
pub const TILE_SIZE: u32 = 256;

/// Grid position derived from an item id by Morton bit interleaving.
///
/// For a fixed bit depth `l`, ids in `[0, 2^(2l))` map injectively into
/// `[0, 2^l) × [0, 2^l)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MortonCoord {
    /// Row index, fed by the even bit planes of the item id
    pub row: u32,
    /// Column index, fed by the odd bit planes of the item id
    pub col: u32,
}

/// A tile's identity within the collection pyramid.
///
/// Level 0 is the coarsest (root) level; `max_level` the finest. On disk a
/// tile lives at `{level}/{row}_{col}.{format}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Pyramid level (0 = root)
    pub level: u32,
    /// Row within the level grid
    pub row: u32,
    /// Column within the level grid
    pub col: u32,
}

impl TileCoord {
    /// Creates a tile coordinate.
    #[inline]
    pub fn new(level: u32, row: u32, col: u32) -> Self {
        Self { level, row, col }
    }

    /// Returns the on-disk file stem for this tile (`row_col`).
    #[inline]
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.row, self.col)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}_{}", self.level, self.row, self.col)
    }
}
