//! Sparse quad-tree level reduction.
//!
//! Level `L` is produced from level `L+1` by scanning 2×2 blocks of child
//! tiles across the collection grid. Each existing child is loaded at half
//! resolution and placed in its quadrant of a fresh 256×256 parent canvas;
//! blocks with no children produce no parent, which is how occupancy shrinks
//! level by level.
//!
//! Blocks are independent of each other within a level, but a level must be
//! complete before the next coarser one starts; the orchestrator enforces
//! that barrier.

use crate::coord::{TileCoord, TILE_SIZE};
use crate::error::BuildError;
use crate::raster;
use crate::store::TileStore;
use image::RgbaImage;
use tracing::trace;

/// Reduces one collection level into the next coarser one, block by block.
pub struct LevelReducer<'a> {
    store: &'a dyn TileStore,
    grid_size: u32,
}

impl<'a> LevelReducer<'a> {
    /// Creates a reducer scanning an even `grid_size × grid_size` grid.
    pub fn new(store: &'a dyn TileStore, grid_size: u32) -> Self {
        debug_assert!(grid_size % 2 == 0 || grid_size <= 1);
        Self { store, grid_size }
    }

    /// Anchors `(i, j)` of every 2×2 block in scan order. The same grid
    /// bound applies at every level; occupancy, not geometry, thins out.
    pub fn blocks(&self) -> Vec<(u32, u32)> {
        let mut anchors = Vec::new();
        let mut i = 1;
        while i <= self.grid_size {
            let mut j = 1;
            while j <= self.grid_size {
                anchors.push((i, j));
                j += 2;
            }
            i += 2;
        }
        anchors
    }

    /// Composes the parent tile for the block anchored at `(i, j)` of the
    /// given child level.
    ///
    /// The four child positions are `(i-1, j-1)` top-left, `(i, j-1)`
    /// top-right, `(i-1, j)` bottom-left and `(i, j)` bottom-right; any
    /// non-empty subset composes, with absent quadrants left as background.
    /// Returns whether a parent tile was written.
    pub fn reduce_block(&self, child_level: u32, i: u32, j: u32) -> Result<bool, BuildError> {
        debug_assert!(child_level > 0 && i % 2 == 1 && j % 2 == 1);
        let half = TILE_SIZE / 2;
        let mut canvas: Option<RgbaImage> = None;

        for (dr, dc) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let child = TileCoord::new(child_level, i - 1 + dr, j - 1 + dc);
            if !self.store.exists(child) {
                continue;
            }
            let shrunk = raster::halve(&self.store.read(child)?);
            let target = canvas.get_or_insert_with(|| {
                RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, raster::BACKGROUND)
            });
            // The row axis runs left-to-right in collection tile naming.
            raster::blit(target, &shrunk, dr * half, dc * half);
        }

        match canvas {
            Some(parent) => {
                let coord = TileCoord::new(child_level - 1, i >> 1, j >> 1);
                trace!(%coord, "writing composed parent tile");
                self.store.write(coord, &parent)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Reduces one whole level serially, returning the number of parent
    /// tiles written.
    pub fn reduce_level(&self, child_level: u32) -> Result<u32, BuildError> {
        let mut written = 0;
        for (i, j) in self.blocks() {
            if self.reduce_block(child_level, i, j)? {
                written += 1;
            }
        }
        Ok(written)
    }
}
