//! In-memory tile store for tests and dry runs.

use super::TileStore;
use crate::coord::TileCoord;
use crate::error::BuildError;
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::Mutex;

/// Tile store backed by a hash map.
///
/// Mirrors the disk store's create-don't-overwrite contract so reduction
/// logic behaves identically against either backend.
#[derive(Default)]
pub struct MemoryTileStore {
    tiles: Mutex<HashMap<TileCoord, RgbaImage>>,
}

impl MemoryTileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tiles currently stored, across all levels.
    pub fn len(&self) -> usize {
        self.tiles.lock().unwrap().len()
    }

    /// Returns whether the store holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All occupied coordinates at a level, unordered.
    pub fn coords_at_level(&self, level: u32) -> Vec<TileCoord> {
        self.tiles
            .lock()
            .unwrap()
            .keys()
            .filter(|c| c.level == level)
            .copied()
            .collect()
    }
}

impl TileStore for MemoryTileStore {
    fn exists(&self, coord: TileCoord) -> bool {
        self.tiles.lock().unwrap().contains_key(&coord)
    }

    fn read(&self, coord: TileCoord) -> Result<RgbaImage, BuildError> {
        self.tiles
            .lock()
            .unwrap()
            .get(&coord)
            .cloned()
            .ok_or_else(|| BuildError::Io {
                path: format!("<memory:{coord}>").into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "tile not found"),
            })
    }

    fn write(&self, coord: TileCoord, image: &RgbaImage) -> Result<(), BuildError> {
        let mut tiles = self.tiles.lock().unwrap();
        if tiles.contains_key(&coord) {
            return Err(BuildError::TileExists { coord });
        }
        tiles.insert(coord, image.clone());
        Ok(())
    }
}
