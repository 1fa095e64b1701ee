//! Disk-backed tile store.

use super::TileStore;
use crate::codec;
use crate::config::TileFormat;
use crate::coord::TileCoord;
use crate::error::BuildError;
use image::RgbaImage;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Tile store rooted at a `{name}_files` directory.
///
/// Tiles live at `{root}/{level}/{row}_{col}.{ext}`. Level directories are
/// created on first write; tile files are created with `create_new`, so a
/// colliding write surfaces as [`BuildError::TileExists`] instead of
/// silently clobbering a sibling worker's output.
pub struct DiskTileStore {
    root: PathBuf,
    format: TileFormat,
    jpeg_quality: u8,
}

impl DiskTileStore {
    /// Creates a store rooted at `root`, creating the directory if needed.
    pub fn create(
        root: impl Into<PathBuf>,
        format: TileFormat,
        jpeg_quality: u8,
    ) -> Result<Self, BuildError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| BuildError::io(&root, e))?;
        Ok(Self {
            root,
            format,
            jpeg_quality,
        })
    }

    /// Absolute path of a tile file.
    pub fn tile_path(&self, coord: TileCoord) -> PathBuf {
        self.root.join(coord.level.to_string()).join(format!(
            "{}.{}",
            coord.file_stem(),
            self.format.extension()
        ))
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TileStore for DiskTileStore {
    fn exists(&self, coord: TileCoord) -> bool {
        self.tile_path(coord).is_file()
    }

    fn read(&self, coord: TileCoord) -> Result<RgbaImage, BuildError> {
        codec::read_image(&self.tile_path(coord))
    }

    fn write(&self, coord: TileCoord, image: &RgbaImage) -> Result<(), BuildError> {
        let path = self.tile_path(coord);
        let level_dir = path.parent().expect("tile path has a level directory");
        fs::create_dir_all(level_dir).map_err(|e| BuildError::io(level_dir, e))?;

        match codec::write_image_new(&path, image, self.format, self.jpeg_quality) {
            Err(BuildError::Io { source, .. }) if source.kind() == ErrorKind::AlreadyExists => {
                Err(BuildError::TileExists { coord })
            }
            other => other,
        }
    }
}
