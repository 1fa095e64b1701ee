//! Tile storage abstraction.
//!
//! The reduction algorithm treats level occupancy as a queryable capability
//! rather than probing the filesystem directly: a [`TileStore`] answers
//! `exists` / `read` / `write` for `(level, row, col)` keys, which lets the
//! whole pyramid construction run against an in-memory store in tests.
//!
//! Writes are create-don't-overwrite: tiles are write-once,
//! read-once-per-consumer artifacts.

mod disk;
mod memory;

pub use disk::DiskTileStore;
pub use memory::MemoryTileStore;

use crate::coord::TileCoord;
use crate::error::BuildError;
use image::RgbaImage;
use std::sync::Arc;

/// Storage capability for collection tiles.
///
/// Implementations must be thread-safe: base-level placement and per-level
/// reduction both write from multiple workers (never to the same key).
pub trait TileStore: Send + Sync {
    /// Returns whether a tile exists at the given coordinate.
    fn exists(&self, coord: TileCoord) -> bool;

    /// Reads a stored tile.
    fn read(&self, coord: TileCoord) -> Result<RgbaImage, BuildError>;

    /// Stores a tile. Fails with [`BuildError::TileExists`] if the
    /// coordinate is already occupied.
    fn write(&self, coord: TileCoord, image: &RgbaImage) -> Result<(), BuildError>;
}

/// Blanket implementation so `Arc<dyn TileStore>` and `Arc<ConcreteStore>`
/// can be used wherever a store is expected.
impl<T: TileStore + ?Sized> TileStore for Arc<T> {
    fn exists(&self, coord: TileCoord) -> bool {
        (**self).exists(coord)
    }

    fn read(&self, coord: TileCoord) -> Result<RgbaImage, BuildError> {
        (**self).read(coord)
    }

    fn write(&self, coord: TileCoord, image: &RgbaImage) -> Result<(), BuildError> {
        (**self).write(coord, image)
    }
}
